use super::{CloudProviderType, HardwareType, ServiceLevel, Usage};
use serde::Serialize;
use std::collections::BTreeSet;

/// The canonical view of one host, produced by a single normalization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFacts {
    // identity, copied from the input so records can be matched back to their hosts
    pub inventory_id: Option<String>,
    pub subscription_manager_id: Option<String>,
    pub display_name: Option<String>,
    pub sync_timestamp: Option<String>,

    pub product_tags: BTreeSet<String>,

    /// Engineering product ids the host reported, from the system profile and, unless its
    /// entitlement facts were ignored, from subscription-manager
    pub product_ids: BTreeSet<String>,

    pub sla: ServiceLevel,
    pub usage: Usage,
    pub cores: Option<u32>,
    pub sockets: Option<u32>,
    pub org_id: Option<String>,
    pub hypervisor_uuid: Option<String>,
    pub hardware_type: HardwareType,
    pub cloud_provider_type: Option<CloudProviderType>,
    pub is_virtual: bool,
    pub is_hypervisor: bool,
    pub is_hypervisor_unknown: bool,
    pub is_marketplace: bool,
    pub is_3rd_party_conversion: bool,
}
