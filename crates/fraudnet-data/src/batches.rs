use fraudnet_core::Matrix;

/// Mini-batch iterator over features and labels.
///
/// Walks a fixed index order; the trainer decides the order (shuffled or
/// not) before constructing the iterator. The final batch may be short.
pub struct Batches<'a> {
    x: &'a Matrix,
    y: &'a [f64],
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl<'a> Batches<'a> {
    pub fn new(x: &'a Matrix, y: &'a [f64], order: Vec<usize>, batch_size: usize) -> Self {
        assert_eq!(x.rows(), y.len(), "feature rows must match label count");
        assert!(batch_size > 0, "batch size must be positive");
        Batches {
            x,
            y,
            order,
            batch_size,
            cursor: 0,
        }
    }

    /// In-order batches over the whole dataset.
    pub fn sequential(x: &'a Matrix, y: &'a [f64], batch_size: usize) -> Self {
        Batches::new(x, y, (0..x.rows()).collect(), batch_size)
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = (Matrix, Vec<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let idx = &self.order[self.cursor..end];
        self.cursor = end;

        let xb = self.x.select_rows(idx).ok()?;
        let yb: Vec<f64> = idx.iter().map(|&i| self.y[i]).collect();
        Some((xb, yb))
    }
}
