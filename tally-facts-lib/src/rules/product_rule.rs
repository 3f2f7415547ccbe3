use super::ProductRuleContext;
use crate::facts::non_blank;
use crate::registry::{ProductRegistry, TagLookupParams};
use std::collections::BTreeSet;
use strum::{Display, EnumIter};

const LOG_TARGET: &str = "     rules";

/// A source of product tags, each keyed to one kind of host fact.
///
/// Every rule is evaluated for every host; rules never fail; malformed data contributes no tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ProductRule {
    /// Engineering product ids reported by the system profile
    SystemProfile,

    /// Role reported by satellite
    SatelliteRole,

    /// Products entitled through subscription-manager, plus the syspurpose role
    Entitlement,

    /// Product names reported by the third-party collector
    ThirdParty,
}

impl ProductRule {
    /// Whether the host carries the facts this rule reads.
    #[must_use]
    pub fn applies_to(self, ctx: &ProductRuleContext<'_>) -> bool {
        let facts = ctx.facts;
        match self {
            Self::SystemProfile => !facts.system_profile.product_ids.is_empty(),
            Self::SatelliteRole => non_blank(facts.satellite.role.as_deref()).is_some(),
            Self::Entitlement => {
                !ctx.skip_entitlement_facts
                    && (!facts.entitled_product_ids.is_empty() || non_blank(facts.syspurpose.role.as_deref()).is_some())
            }
            Self::ThirdParty => !facts.qpc_products.is_empty(),
        }
    }

    /// Tags matching the host's migration and metering status.
    #[must_use]
    pub fn filtered_tags(self, ctx: &ProductRuleContext<'_>, registry: &ProductRegistry) -> BTreeSet<String> {
        self.tags(ctx, registry, ctx.lookup_params())
    }

    /// Every tag the rule's facts map to, ignoring migration and metering status.
    ///
    /// Only used to explain why a host ended up without any product.
    #[must_use]
    pub fn all_configured_tags(self, ctx: &ProductRuleContext<'_>, registry: &ProductRegistry) -> BTreeSet<String> {
        self.tags(ctx, registry, TagLookupParams::unfiltered())
    }

    fn tags(self, ctx: &ProductRuleContext<'_>, registry: &ProductRegistry, params: TagLookupParams) -> BTreeSet<String> {
        let facts = ctx.facts;
        match self {
            Self::SystemProfile => registry.tags_for_engineering_ids(&parse_ids(self, &facts.system_profile.product_ids), params),

            Self::SatelliteRole => non_blank(facts.satellite.role.as_deref())
                .map(|role| registry.tags_for_role(role, params))
                .unwrap_or_default(),

            Self::Entitlement => {
                let mut tags = registry.tags_for_engineering_ids(&parse_ids(self, &facts.entitled_product_ids), params);
                if let Some(role) = non_blank(facts.syspurpose.role.as_deref()) {
                    tags.extend(registry.tags_for_role(role, params));
                }
                tags
            }

            Self::ThirdParty => third_party_tags(ctx, registry),
        }
    }
}

fn parse_ids(rule: ProductRule, raw_ids: &[String]) -> Vec<u32> {
    raw_ids
        .iter()
        .filter_map(|raw| match raw.trim().parse::<u32>() {
            Ok(id) => Some(id),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "{rule}: ignoring malformed product id '{raw}': {e}");
                None
            }
        })
        .collect()
}

fn third_party_tags(ctx: &ProductRuleContext<'_>, registry: &ProductRegistry) -> BTreeSet<String> {
    let facts = ctx.facts;
    let mut tags = BTreeSet::new();

    for name in &facts.qpc_products {
        let Some(offering) = registry.offering(name.trim()) else {
            log::debug!(target: LOG_TARGET, "{}: unknown third-party product '{name}'", ProductRule::ThirdParty);
            continue;
        };

        let _ = tags.insert(offering.tag.clone());

        // system-profile ids are more precise than the architecture when they exist
        if offering.arch_specific
            && facts.system_profile.product_ids.is_empty()
            && let Some(tag) = non_blank(facts.system_profile.arch.as_deref()).and_then(|arch| registry.tag_for_architecture(arch))
        {
            let _ = tags.insert(tag.to_string());
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::HostFacts;
    use strum::IntoEnumIterator;

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let rules: Vec<_> = ProductRule::iter().collect();
        assert_eq!(
            rules,
            vec![
                ProductRule::SystemProfile,
                ProductRule::SatelliteRole,
                ProductRule::Entitlement,
                ProductRule::ThirdParty
            ]
        );
    }

    #[test]
    fn test_no_rule_applies_to_empty_host() {
        let facts = HostFacts::default();
        let ctx = ProductRuleContext::new(&facts, false, false);
        assert!(ProductRule::iter().all(|rule| !rule.applies_to(&ctx)));
    }

    #[test]
    fn test_system_profile_ignores_malformed_ids() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.system_profile.product_ids = vec!["69".into(), "bogus".into(), "-1".into()];
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert!(ProductRule::SystemProfile.applies_to(&ctx));
        assert_eq!(ProductRule::SystemProfile.filtered_tags(&ctx, &registry), tags(&["RHEL for x86"]));
    }

    #[test]
    fn test_system_profile_only_malformed_ids_yields_nothing() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.system_profile.product_ids = vec!["x86".into()];
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert!(ProductRule::SystemProfile.applies_to(&ctx));
        assert!(ProductRule::SystemProfile.filtered_tags(&ctx, &registry).is_empty());
    }

    #[test]
    fn test_satellite_role() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.satellite.role = Some("Red Hat Enterprise Linux Server".into());
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert!(ProductRule::SatelliteRole.applies_to(&ctx));
        assert_eq!(ProductRule::SatelliteRole.filtered_tags(&ctx, &registry), tags(&["RHEL for x86"]));
    }

    #[test]
    fn test_blank_satellite_role_does_not_apply() {
        let mut facts = HostFacts::default();
        facts.satellite.role = Some("   ".into());
        let ctx = ProductRuleContext::new(&facts, false, false);
        assert!(!ProductRule::SatelliteRole.applies_to(&ctx));
    }

    #[test]
    fn test_entitlement_includes_syspurpose_role() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.entitled_product_ids = vec!["250".into()];
        facts.syspurpose.role = Some("Red Hat Enterprise Linux Workstation".into());
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert!(ProductRule::Entitlement.applies_to(&ctx));
        assert_eq!(
            ProductRule::Entitlement.filtered_tags(&ctx, &registry),
            tags(&["RHEL for x86", "Satellite 6"])
        );
    }

    #[test]
    fn test_entitlement_skipped_for_stale_host() {
        let mut facts = HostFacts::default();
        facts.entitled_product_ids = vec!["69".into()];
        let ctx = ProductRuleContext::new(&facts, true, false);
        assert!(!ProductRule::Entitlement.applies_to(&ctx));
    }

    #[test]
    fn test_migration_and_metering_filters() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.system_profile.product_ids = vec!["204".into()];

        let ctx = ProductRuleContext::new(&facts, false, false);
        assert_eq!(
            ProductRule::SystemProfile.filtered_tags(&ctx, &registry),
            tags(&["RHEL for x86 ELS Unconverted"])
        );

        let ctx = ProductRuleContext::new(&facts, false, true);
        assert_eq!(ProductRule::SystemProfile.filtered_tags(&ctx, &registry), tags(&["RHEL for x86 ELS PAYG"]));

        facts.is_3rd_party_migrated = true;
        let ctx = ProductRuleContext::new(&facts, false, false);
        assert_eq!(
            ProductRule::SystemProfile.filtered_tags(&ctx, &registry),
            tags(&["RHEL for x86 ELS Converted"])
        );
        assert_eq!(
            ProductRule::SystemProfile.all_configured_tags(&ctx, &registry),
            tags(&[
                "RHEL for x86 ELS Converted",
                "RHEL for x86 ELS PAYG",
                "RHEL for x86 ELS Unconverted"
            ])
        );
    }

    #[test]
    fn test_third_party_adds_architecture_tag() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.qpc_products = vec!["RHEL".into()];
        facts.system_profile.arch = Some("x86_64".into());
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert_eq!(ProductRule::ThirdParty.filtered_tags(&ctx, &registry), tags(&["RHEL", "RHEL for x86"]));
    }

    #[test]
    fn test_third_party_skips_architecture_tag_with_system_profile_ids() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.qpc_products = vec!["RHEL".into(), "JBoss".into()];
        facts.system_profile.arch = Some("x86_64".into());
        facts.system_profile.product_ids = vec!["69".into()];
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert_eq!(ProductRule::ThirdParty.filtered_tags(&ctx, &registry), tags(&["RHEL"]));
    }

    #[test]
    fn test_third_party_unknown_architecture() {
        let registry = ProductRegistry::default();
        let mut facts = HostFacts::default();
        facts.qpc_products = vec!["RHEL".into()];
        facts.system_profile.arch = Some("riscv64".into());
        let ctx = ProductRuleContext::new(&facts, false, false);

        assert_eq!(ProductRule::ThirdParty.filtered_tags(&ctx, &registry), tags(&["RHEL"]));
    }
}
