use crate::facts::{CloudProviderType, HardwareType, HostFacts, OrgHostsData, non_blank};

const VIRTUAL_INFRASTRUCTURE: &str = "virtual";

/// How a host relates to the org's hypervisors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Virtualization {
    pub is_virtual: bool,
    pub hypervisor_uuid: Option<String>,
    pub is_hypervisor: bool,
    pub is_hypervisor_unknown: bool,
}

pub fn is_virtual_infrastructure(facts: &HostFacts) -> bool {
    facts
        .system_profile
        .infrastructure_type
        .as_deref()
        .is_some_and(|infra| infra.trim().eq_ignore_ascii_case(VIRTUAL_INFRASTRUCTURE))
}

pub fn classify_virtualization(facts: &HostFacts, org_data: &OrgHostsData) -> Virtualization {
    let satellite_uuid = non_blank(facts.satellite.hypervisor_uuid.as_deref());

    let is_virtual = facts.is_virtual || satellite_uuid.is_some() || is_virtual_infrastructure(facts);

    let hypervisor_uuid = satellite_uuid
        .or_else(|| non_blank(facts.system_profile.hypervisor_uuid.as_deref()))
        .map(str::to_string);

    let is_hypervisor_unknown =
        (is_virtual && hypervisor_uuid.is_none()) || org_data.is_unmapped_hypervisor(hypervisor_uuid.as_deref());

    let is_hypervisor = non_blank(facts.subscription_manager_id.as_deref()).is_some_and(|id| org_data.has_hypervisor_uuid(id));

    Virtualization {
        is_virtual,
        hypervisor_uuid,
        is_hypervisor,
        is_hypervisor_unknown,
    }
}

pub fn classify_hardware(facts: &HostFacts, is_virtual: bool) -> (HardwareType, Option<CloudProviderType>) {
    if let Some(provider) = facts.system_profile.cloud_provider.as_deref().and_then(CloudProviderType::from_fact) {
        (HardwareType::Cloud, Some(provider))
    } else if is_virtual {
        (HardwareType::Virtualized, None)
    } else {
        (HardwareType::Physical, None)
    }
}
