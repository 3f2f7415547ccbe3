use super::classification::{Virtualization, classify_hardware, classify_virtualization, is_virtual_infrastructure};
use super::measurement::{Measurements, VcpuPolicy, needs_vcpu_derivation};
use super::staleness::is_sync_stale;
use crate::config::Config;
use crate::facts::{HostFacts, NormalizedFacts, OrgHostsData, ServiceLevel, Usage, non_blank};
use crate::registry::ProductRegistry;
use crate::rules::{ProductRuleContext, RHEL_TAG, TagResolver};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

const LOG_TARGET: &str = "normalizer";

/// Tag whose hosts may use their reported CPU topology to derive vCPUs
pub const OPENSHIFT_TAG: &str = "OpenShift Container Platform";

/// Turns one host's raw facts into its [`NormalizedFacts`].
///
/// The normalizer holds no per-host state, so a single instance can be shared across threads.
#[derive(Debug)]
pub struct FactNormalizer {
    config: Config,
    registry: ProductRegistry,
}

impl FactNormalizer {
    #[must_use]
    pub const fn new(config: Config, registry: ProductRegistry) -> Self {
        Self { config, registry }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    /// Normalize a host against the current time.
    #[must_use]
    pub fn normalize(&self, facts: &HostFacts, org_data: &OrgHostsData, is_metered: bool) -> NormalizedFacts {
        self.normalize_at(facts, org_data, is_metered, Utc::now())
    }

    /// Normalize a host as of `now`.
    ///
    /// Never fails: facts that can't be interpreted are logged and left out of the result.
    #[must_use]
    pub fn normalize_at(&self, facts: &HostFacts, org_data: &OrgHostsData, is_metered: bool, now: DateTime<Utc>) -> NormalizedFacts {
        let host = facts.label();
        let sp = &facts.system_profile;

        let skip_entitlement_facts = is_sync_stale(facts.sync_timestamp.as_deref(), self.config.host_last_sync_threshold, now);
        if skip_entitlement_facts {
            log::info!(
                target: LOG_TARGET,
                "Host '{host}' has not synced with subscription-manager recently, ignoring its entitlement facts"
            );
        }

        let ctx = ProductRuleContext::new(facts, skip_entitlement_facts, is_metered);
        let product_tags = TagResolver::new(&self.registry).resolve(&ctx);

        let Virtualization {
            is_virtual,
            hypervisor_uuid,
            is_hypervisor,
            is_hypervisor_unknown,
        } = classify_virtualization(facts, org_data);

        let (hardware_type, cloud_provider_type) = classify_hardware(facts, is_virtual);

        let mut measurements = Measurements::from_system_profile(sp);
        if needs_vcpu_derivation(sp, is_virtual_infrastructure(facts)) {
            let policy = self.vcpu_policy(&product_tags);
            if let Some(cores) = policy.vcpu_cores(sp, &product_tags) {
                measurements.cores = Some(cores);
            }
        }

        let mut sla = ServiceLevel::Empty;
        let mut usage = Usage::Empty;
        apply_sla(&mut sla, facts.satellite.sla.as_deref(), host);
        apply_usage(&mut usage, facts.satellite.usage.as_deref(), host);

        let org_id = if skip_entitlement_facts {
            None
        } else {
            apply_sla(&mut sla, facts.syspurpose.sla.as_deref(), host);
            apply_usage(&mut usage, facts.syspurpose.usage.as_deref(), host);
            non_blank(facts.org_id.as_deref()).map(str::to_string)
        };

        if is_hypervisor || !is_virtual {
            measurements.round_up_odd_sockets();
        }

        if !is_hypervisor && is_virtual {
            // cloud guests and RHEL guests of unknown hypervisors count a single socket
            if cloud_provider_type.is_some() {
                measurements.sockets = Some(u32::from(!facts.is_marketplace));
            } else if is_hypervisor_unknown && has_rhel_tag(&product_tags) {
                measurements.sockets = Some(1);
            }
        }

        if facts.is_marketplace {
            measurements.zero_for_marketplace();
        }

        measurements.backfill(sp);

        if let Some(units) = non_blank(facts.syspurpose.units.as_deref()) {
            if facts.is_marketplace {
                log::debug!(target: LOG_TARGET, "Ignoring syspurpose units '{units}' on marketplace host '{host}'");
            } else {
                measurements.narrow_to_units(units.trim(), sp, host);
            }
        }

        let mut product_ids = reported_ids(&sp.product_ids);
        if !skip_entitlement_facts {
            product_ids.extend(reported_ids(&facts.entitled_product_ids));
        }

        NormalizedFacts {
            inventory_id: facts.inventory_id.clone(),
            subscription_manager_id: facts.subscription_manager_id.clone(),
            display_name: facts.display_name.clone(),
            sync_timestamp: facts.sync_timestamp.clone(),
            product_tags,
            product_ids,
            sla,
            usage,
            cores: measurements.cores,
            sockets: measurements.sockets,
            org_id,
            hypervisor_uuid,
            hardware_type,
            cloud_provider_type,
            is_virtual,
            is_hypervisor,
            is_hypervisor_unknown,
            is_marketplace: facts.is_marketplace,
            is_3rd_party_conversion: facts.is_3rd_party_migrated,
        }
    }

    fn vcpu_policy(&self, product_tags: &BTreeSet<String>) -> VcpuPolicy {
        VcpuPolicy {
            threads_per_core_default: self.config.threads_per_core_default,
            use_reported_topology: self.config.use_cpu_system_facts_for_all_products || product_tags.contains(OPENSHIFT_TAG),
        }
    }
}

fn reported_ids(raw_ids: &[String]) -> BTreeSet<String> {
    raw_ids
        .iter()
        .filter_map(|id| non_blank(Some(id)))
        .map(|id| id.trim().to_string())
        .collect()
}

fn has_rhel_tag(tags: &BTreeSet<String>) -> bool {
    tags.iter()
        .any(|tag| tag.get(..RHEL_TAG.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(RHEL_TAG)))
}

fn apply_sla(sla: &mut ServiceLevel, raw: Option<&str>, host: &str) {
    let Some(raw) = non_blank(raw) else {
        return;
    };

    match ServiceLevel::from_fact(raw) {
        ServiceLevel::Empty => log::debug!(target: LOG_TARGET, "Ignoring unsupported SLA '{raw}' on host '{host}'"),
        parsed => *sla = parsed,
    }
}

fn apply_usage(usage: &mut Usage, raw: Option<&str>, host: &str) {
    let Some(raw) = non_blank(raw) else {
        return;
    };

    match Usage::from_fact(raw) {
        Usage::Empty => log::debug!(target: LOG_TARGET, "Ignoring unsupported usage '{raw}' on host '{host}'"),
        parsed => *usage = parsed,
    }
}
