/// Free-running round clock counted in tenths of a second. Each scheduler
/// tick adds one tenth regardless of click activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundClock {
    tenths: u32,
}

impl RoundClock {
    pub fn new() -> Self {
        Self { tenths: 0 }
    }

    pub fn reset(&mut self) {
        self.tenths = 0;
    }

    pub fn advance(&mut self) {
        self.tenths = self.tenths.saturating_add(1);
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn seconds(&self) -> f64 {
        self.tenths as f64 / 10.0
    }

    /// `"12.3s"`
    pub fn display(&self) -> String {
        format!("{}.{}s", self.tenths / 10, self.tenths % 10)
    }
}
