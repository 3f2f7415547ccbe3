use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Organization-wide hypervisor relationships, built once before any host of the org is normalized.
///
/// Each entry maps a hypervisor identifier to the subscription-manager id of the host that
/// was found to be that hypervisor, or to `None` when guests report the hypervisor but no
/// such host is known. Normalization only ever borrows this immutably.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrgHostsData {
    pub org_id: String,

    #[serde(default)]
    hypervisor_mapping: FxHashMap<String, Option<String>>,
}

impl OrgHostsData {
    #[must_use]
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            hypervisor_mapping: FxHashMap::default(),
        }
    }

    /// Record that guests reference `hypervisor_id`, optionally resolved to a known host.
    pub fn add_host_mapping(&mut self, hypervisor_id: impl Into<String>, subscription_manager_id: Option<String>) {
        let _ = self.hypervisor_mapping.insert(hypervisor_id.into(), subscription_manager_id);
    }

    /// Whether `id` is referenced as a hypervisor by some guest in the org.
    #[must_use]
    pub fn has_hypervisor_uuid(&self, id: &str) -> bool {
        self.hypervisor_mapping.contains_key(id)
    }

    /// Whether the hypervisor is unknown to the org; a missing identifier is always unmapped.
    #[must_use]
    pub fn is_unmapped_hypervisor(&self, hypervisor_uuid: Option<&str>) -> bool {
        hypervisor_uuid
            .and_then(|uuid| self.hypervisor_mapping.get(uuid))
            .is_none_or(Option::is_none)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hypervisor_mapping.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hypervisor_mapping.is_empty()
    }
}
