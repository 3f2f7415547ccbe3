use core::str::FromStr;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// How a host's hardware is provisioned. Exactly one classification applies to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HardwareType {
    Physical,
    Virtualized,
    Cloud,
}

/// The cloud providers whose hosts are classified as [`HardwareType::Cloud`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudProviderType {
    #[strum(to_string = "aws")]
    Aws,

    #[strum(to_string = "azure")]
    Azure,

    #[strum(to_string = "google", serialize = "gcp")]
    Google,

    #[strum(to_string = "alibaba")]
    Alibaba,
}

impl CloudProviderType {
    /// Parse a raw cloud-provider fact, returning `None` for blank or unsupported providers.
    #[must_use]
    pub fn from_fact(value: &str) -> Option<Self> {
        Self::from_str(value.trim()).ok()
    }
}
