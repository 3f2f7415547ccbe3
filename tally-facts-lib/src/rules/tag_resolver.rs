use super::{ProductRule, ProductRuleContext};
use crate::registry::ProductRegistry;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "  resolver";

/// The generic RHEL tag, reported when the specific RHEL product can't be determined on its own
pub const RHEL_TAG: &str = "RHEL";

/// Added next to [`RHEL_TAG`] when the RHEL variant is missing or ambiguous
pub const RHEL_UNGROUPED_TAG: &str = "RHEL Ungrouped";

/// Turns a host's facts into its final set of product tags.
#[derive(Debug, Clone, Copy)]
pub struct TagResolver<'a> {
    registry: &'a ProductRegistry,
}

impl<'a> TagResolver<'a> {
    #[must_use]
    pub const fn new(registry: &'a ProductRegistry) -> Self {
        Self { registry }
    }

    /// Union the tags of every applicable rule, then reconcile and prune them.
    #[must_use]
    pub fn resolve(&self, ctx: &ProductRuleContext<'_>) -> BTreeSet<String> {
        let candidates: BTreeSet<String> = ProductRule::iter()
            .filter(|rule| rule.applies_to(ctx))
            .flat_map(|rule| rule.filtered_tags(ctx, self.registry))
            .collect();

        let tags = self.registry.prune_included_products(&reconcile_rhel_variants(&candidates));

        if tags.is_empty() {
            self.report_near_misses(ctx);
        }

        tags
    }

    fn report_near_misses(&self, ctx: &ProductRuleContext<'_>) {
        let near_misses = self.near_miss_tags(ctx);

        if !near_misses.is_empty() {
            log::info!(
                target: LOG_TARGET,
                "No products matched host '{}' (3rd-party migrated: {}, metered: {}, entitlements ignored: {}), but it carries facts for {near_misses:?}",
                ctx.facts.label(),
                ctx.third_party_migrated,
                ctx.is_metered,
                ctx.skip_entitlement_facts,
            );
        }
    }

    /// Every tag any rule's facts map to, whether or not the rule applies to the host.
    fn near_miss_tags(&self, ctx: &ProductRuleContext<'_>) -> BTreeSet<String> {
        ProductRule::iter()
            .flat_map(|rule| rule.all_configured_tags(ctx, self.registry))
            .collect()
    }
}

/// Add [`RHEL_UNGROUPED_TAG`] when the generic RHEL tag is present without exactly one RHEL variant.
///
/// Variant tags are never removed.
#[must_use]
pub fn reconcile_rhel_variants(tags: &BTreeSet<String>) -> BTreeSet<String> {
    let mut result = tags.clone();

    if tags.contains(RHEL_TAG) {
        let variants = tags.iter().filter(|tag| is_rhel_variant(tag)).count();
        if variants != 1 {
            let _ = result.insert(RHEL_UNGROUPED_TAG.to_string());
        }
    }

    result
}

fn is_rhel_variant(tag: &str) -> bool {
    tag != RHEL_UNGROUPED_TAG && tag.starts_with("RHEL ")
}
