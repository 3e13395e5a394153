//! Built-in generator answering from the cached portfolio.

use async_trait::async_trait;

use super::{ChatContext, ChatGenerator, ChatRequest, FragmentSink};
use crate::error::Result;
use crate::models::VoyageResult;

/// Answers questions with facts from the current fleet snapshot.
///
/// Mentioned vessels and cargoes get a detailed voyage breakdown; questions
/// about delays or congestion get the port delay outlook; anything else
/// gets the portfolio summary. Each line is streamed as one fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBriefing;

fn voyage_lines(v: &VoyageResult) -> Vec<String> {
    let mut lines = vec![
        format!("{} -> {} ({} speed)", v.vessel, v.cargo, v.speed_type),
        format!(
            "  {:.1} days total: {:.1} ballast, {:.1} laden, {:.1} in port, {:.1} waiting",
            v.total_days,
            v.days.ballast_days,
            v.days.laden_days,
            v.days.working_days(),
            v.days.waiting_days
        ),
        format!(
            "  arrives {} against laycan end {} ({:.1} days margin)",
            v.arrival_date, v.laycan_end, v.days_margin
        ),
        format!(
            "  net freight ${:.0}, bunkers ${:.0}, hire ${:.0}, port ${:.0}",
            v.net_freight, v.total_bunker_cost, v.hire_cost, v.port_costs
        ),
        format!("  net profit ${:.0}, TCE ${:.0}/day", v.net_profit, v.tce),
    ];
    if let Some(port) = &v.bunker_port {
        lines.push(format!("  bunker at {port} to save ${:.0}", v.bunker_savings));
    }
    lines
}

#[async_trait]
impl ChatGenerator for SnapshotBriefing {
    async fn generate(&self, request: &ChatRequest, context: &ChatContext, sink: &FragmentSink) -> Result<()> {
        let snapshot = context.snapshot();
        let portfolio = snapshot.portfolio();
        let question = request.message.to_lowercase();
        let mentions = |name: &str| question.contains(&name.to_lowercase());

        let mut lines: Vec<String> = Vec::new();
        for vessel in snapshot.vessels().iter().filter(|v| mentions(v.name())) {
            match portfolio.assignment_for_vessel(vessel.name()) {
                Some(a) => lines.extend(voyage_lines(&a.voyage)),
                None => lines.push(format!("{} has no profitable feasible cargo in the current portfolio.", vessel.name())),
            }
        }
        for cargo in snapshot.cargoes().iter().filter(|c| mentions(c.name())) {
            let already_covered = portfolio
                .assignment_for_cargo(cargo.name())
                .filter(|a| mentions(&a.vessel));
            if already_covered.is_some() {
                continue;
            }
            match portfolio.assignment_for_cargo(cargo.name()) {
                Some(a) => lines.extend(voyage_lines(&a.voyage)),
                None => lines.push(format!("{} is not covered by the current portfolio.", cargo.name())),
            }
        }

        if question.contains("delay") || question.contains("congestion") {
            match snapshot.delays().predict_all() {
                Ok(predictions) => {
                    lines.push("Port delay outlook:".to_string());
                    lines.extend(predictions.iter().map(|p| {
                        format!(
                            "  {}: {:.1} days ({:.1} to {:.1}), {} congestion",
                            p.port, p.predicted_delay_days, p.confidence_lower, p.confidence_upper, p.congestion_level
                        )
                    }));
                }
                Err(e) => lines.push(format!("Port delay predictions are unavailable: {e}")),
            }
        }

        if lines.is_empty() {
            lines.extend(context.summary().lines().map(str::to_string));
        }

        for line in lines {
            sink.send(format!("{line}\n")).await?;
        }
        Ok(())
    }
}
