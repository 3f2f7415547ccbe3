use strum::{Display, EnumString};

/// The unit of measure a host's owner declared through syspurpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum SyspurposeUnits {
    #[strum(serialize = "Sockets")]
    Sockets,

    #[strum(serialize = "Cores/vCPU")]
    CoresVcpu,
}
