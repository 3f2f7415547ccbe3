use core::str::FromStr;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Service level agreement of a host.
///
/// `Empty` is the sentinel for "no usable SLA was reported".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum ServiceLevel {
    #[strum(serialize = "Premium")]
    #[serde(rename = "Premium")]
    Premium,

    #[strum(serialize = "Standard")]
    #[serde(rename = "Standard")]
    Standard,

    #[strum(serialize = "Self-Support")]
    #[serde(rename = "Self-Support")]
    SelfSupport,

    #[default]
    #[strum(serialize = "")]
    #[serde(rename = "")]
    Empty,
}

impl ServiceLevel {
    /// Parse a raw fact value, mapping anything unrecognized to [`Self::Empty`].
    #[must_use]
    pub fn from_fact(value: &str) -> Self {
        Self::from_str(value.trim()).unwrap_or(Self::Empty)
    }
}
