//! Dense bipartite weight matrix.

/// A dense rows×cols weight matrix stored in row-major order.
///
/// `None` marks an excluded edge that may never be selected.
///
/// # Examples
///
/// ```
/// use u_voyage::optimizer::WeightMatrix;
///
/// let mut m = WeightMatrix::new(2, 3);
/// m.set(0, 2, Some(42.0));
/// assert_eq!(m.get(0, 2), Some(42.0));
/// assert_eq!(m.get(1, 0), None);
/// assert_eq!((m.rows(), m.cols()), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    data: Vec<Option<f64>>,
    rows: usize,
    cols: usize,
}

impl WeightMatrix {
    /// Creates a matrix with every edge excluded.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![None; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a matrix from an explicit row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<Option<f64>>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { data, rows, cols })
    }

    /// Returns the weight of edge `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data[row * self.cols + col]
    }

    /// Sets the weight of edge `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, weight: Option<f64>) {
        self.data[row * self.cols + col] = weight;
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of edges that are not excluded.
    pub fn num_edges(&self) -> usize {
        self.data.iter().filter(|w| w.is_some()).count()
    }
}
