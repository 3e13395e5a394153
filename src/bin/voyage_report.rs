use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use u_voyage::chat::{ChatEvent, ChatRequest};
use u_voyage::error::VoyageError;
use u_voyage::logging::setup_logging;
use u_voyage::service::{FleetService, PortDelayScenarioRequest, ScenarioRequest, VoyageCalcRequest};
use u_voyage::settings::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Voyage economics and fleet portfolio reports")]
struct Cli {
    /// Path to settings file (default: voyage.* detection)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the dataset path from settings.
    #[arg(long)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Optimal vessel-cargo portfolio at default parameters.
    Portfolio,
    /// Every vessel-cargo voyage at default parameters.
    Voyages,
    /// One voyage under custom parameters.
    Voyage {
        vessel: String,
        cargo: String,
        /// Sail at full speed instead of eco speed.
        #[arg(long, default_value_t = false)]
        normal_speed: bool,
        /// Extra waiting days at the load port.
        #[arg(long, default_value_t = 0.0)]
        delay: f64,
        /// Bunker price multiplier.
        #[arg(long, default_value_t = 1.0)]
        bunker: f64,
    },
    /// Portfolio re-optimized across a bunker price multiplier range.
    BunkerSweep {
        #[arg(long, default_value_t = 0.8)]
        min: f64,
        #[arg(long, default_value_t = 1.5)]
        max: f64,
        #[arg(long, default_value_t = 15)]
        steps: usize,
    },
    /// Portfolio re-optimized for each extra port delay day.
    DelaySweep {
        #[arg(long, default_value_t = 15)]
        max_days: i64,
    },
    /// Bunker price and port delay values at which the portfolio changes.
    TippingPoints,
    /// Delay predictions for every port with features.
    PortDelays,
    /// Metadata of the loaded delay model.
    ModelInfo,
    /// Asks the fleet briefing a question and streams the answer.
    Chat { message: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), VoyageError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

async fn stream_chat(service: &FleetService, message: String) -> Result<(), VoyageError> {
    let mut stream = service.chat(ChatRequest::new(message))?;
    let mut stdout = std::io::stdout();
    while let Some(event) = stream.next().await {
        match event {
            ChatEvent::Chunk(text) => {
                let _ = write!(stdout, "{text}");
                let _ = stdout.flush();
            }
            ChatEvent::Error(reason) => return Err(VoyageError::UpstreamGeneration(reason)),
            ChatEvent::Done => break,
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), VoyageError> {
    let cli = Cli::parse();
    let mut settings = Settings::load_with_path(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        settings.dataset_path = dataset;
    }
    setup_logging(&settings.log_level, settings.log_json)?;

    let service = FleetService::initialize(settings)?;

    match cli.command {
        Command::Portfolio => print_json(&service.portfolio()),
        Command::Voyages => print_json(&service.all_voyages()),
        Command::Voyage {
            vessel,
            cargo,
            normal_speed,
            delay,
            bunker,
        } => {
            let request = VoyageCalcRequest {
                use_eco_speed: !normal_speed,
                extra_port_delay: delay,
                bunker_adjustment: bunker,
                ..VoyageCalcRequest::new(vessel, cargo)
            };
            print_json(&service.calculate(&request)?)
        }
        Command::BunkerSweep { min, max, steps } => {
            let request = ScenarioRequest {
                parameter_min: min,
                parameter_max: max,
                steps,
            };
            print_json(&service.bunker_scenario(&request)?)
        }
        Command::DelaySweep { max_days } => {
            let request = PortDelayScenarioRequest {
                max_delay_days: max_days,
            };
            print_json(&service.port_delay_scenario(&request)?)
        }
        Command::TippingPoints => print_json(&service.tipping_points()?),
        Command::PortDelays => print_json(&service.port_delays()?),
        Command::ModelInfo => print_json(&service.model_info()?),
        Command::Chat { message } => stream_chat(&service, message).await,
    }
}
