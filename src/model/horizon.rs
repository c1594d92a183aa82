use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// Forecast lead time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Horizon {
    #[default]
    D1,
    D5,
    D20,
}

impl Horizon {
    /// Display order for every per-horizon panel and table.
    pub const ALL: [Horizon; 3] = [Horizon::D1, Horizon::D5, Horizon::D20];

    pub fn key(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::D5 => "5d",
            Self::D20 => "20d",
        }
    }

    pub fn days(self) -> u32 {
        match self {
            Self::D1 => 1,
            Self::D5 => 5,
            Self::D20 => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::D1 => "Daily",
            Self::D5 => "Weekly",
            Self::D20 => "Monthly",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "1d" | "1" => Some(Self::D1),
            "5d" | "5" => Some(Self::D5),
            "20d" | "20" => Some(Self::D20),
            _ => None,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.days() == days)
    }

    pub fn next(self) -> Self {
        match self {
            Self::D1 => Self::D5,
            Self::D5 => Self::D20,
            Self::D20 => Self::D1,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Horizon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_key(s) {
            Some(h) => Ok(h),
            None => bail!("invalid horizon '{}': expected one of 1d/5d/20d", s),
        }
    }
}

/// Model family reported per horizon by the training pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelKind {
    Xgboost,
    Rf,
    Ridge,
    Ensemble,
}

impl ModelKind {
    /// Row order of the model comparison table.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Xgboost,
        ModelKind::Rf,
        ModelKind::Ridge,
        ModelKind::Ensemble,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Xgboost => "xgboost",
            Self::Rf => "rf",
            Self::Ridge => "ridge",
            Self::Ensemble => "ensemble",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Xgboost => "XGBoost",
            Self::Rf => "Random Forest",
            Self::Ridge => "Ridge",
            Self::Ensemble => "Ensemble",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
