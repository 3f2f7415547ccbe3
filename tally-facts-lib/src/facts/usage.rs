use core::str::FromStr;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Declared usage of a host.
///
/// `Empty` is the sentinel for "no usable usage was reported".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum Usage {
    #[strum(serialize = "Production")]
    #[serde(rename = "Production")]
    Production,

    #[strum(serialize = "Development/Test")]
    #[serde(rename = "Development/Test")]
    DevelopmentTest,

    #[strum(serialize = "Disaster Recovery")]
    #[serde(rename = "Disaster Recovery")]
    DisasterRecovery,

    #[default]
    #[strum(serialize = "")]
    #[serde(rename = "")]
    Empty,
}

impl Usage {
    /// Parse a raw fact value, mapping anything unrecognized to [`Self::Empty`].
    #[must_use]
    pub fn from_fact(value: &str) -> Self {
        Self::from_str(value.trim()).unwrap_or(Self::Empty)
    }
}
