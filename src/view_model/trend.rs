/// Semantic direction attached to a displayed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Drawdown-style metrics are adverse at any magnitude.
    pub const ADVERSE: Trend = Trend::Down;

    /// Sign of a signed delta. NaN has no sign and maps to `Neutral`.
    pub fn of(x: f64) -> Self {
        if x > 0.0 {
            Self::Up
        } else if x < 0.0 {
            Self::Down
        } else {
            Self::Neutral
        }
    }

    /// `Up` strictly above `threshold`, `Down` otherwise.
    pub fn above(x: f64, threshold: f64) -> Self {
        if x > threshold {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }
}
