//! Host fact data model
//!
//! This module holds the records flowing through normalization:
//!
//! - [`HostFacts`]: raw per-host facts as gathered by the inventory collectors (system profile,
//!   satellite, subscription-manager entitlements, syspurpose, and the third-party collector)
//! - [`OrgHostsData`]: org-wide hypervisor/guest relationships, built once per org
//! - [`NormalizedFacts`]: the canonical output record for one host
//!
//! plus the small enumerations used to classify a host ([`ServiceLevel`], [`Usage`],
//! [`HardwareType`], [`CloudProviderType`], [`SyspurposeUnits`]). Every enumeration parses raw
//! fact strings leniently: unknown values become the sentinel or `None` rather than an error.

mod hardware_type;
mod host_facts;
mod normalized_facts;
mod org_hosts_data;
mod service_level;
mod syspurpose_units;
mod usage;

pub use hardware_type::{CloudProviderType, HardwareType};
pub use host_facts::{HostFacts, SatelliteFacts, SyspurposeFacts, SystemProfileFacts, non_blank};
pub use normalized_facts::NormalizedFacts;
pub use org_hosts_data::OrgHostsData;
pub use service_level::ServiceLevel;
pub use syspurpose_units::SyspurposeUnits;
pub use usage::Usage;
