/// Accumulates values into the current calendar month's series.
///
/// A series is completed only when a later value arrives for a different
/// month. Month tracking resets at the start of each file while the open
/// series carries over, so the first row of the next file completes it.
#[derive(Debug, Clone, Default)]
pub struct MonthlySeries {
    month: Option<u32>,
    values: Vec<f64>,
}

impl MonthlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_file(&mut self) {
        self.month = None;
    }

    /// Adds a value, returning the previous month's series if this value starts a new one.
    pub fn push(&mut self, month: u32, value: f64) -> Option<Vec<f64>> {
        let completed = if self.month != Some(month) && !self.values.is_empty() {
            Some(std::mem::take(&mut self.values))
        } else {
            None
        };
        self.month = Some(month);
        self.values.push(value);
        completed
    }

    pub fn take_trailing(&mut self) -> Option<Vec<f64>> {
        if self.values.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.values))
        }
    }

    pub fn pending(&self) -> &[f64] {
        &self.values
    }
}
