use crate::facts::HostFacts;
use crate::registry::TagLookupParams;

/// Everything a product rule needs to know about the host being normalized.
#[derive(Debug, Clone, Copy)]
pub struct ProductRuleContext<'a> {
    pub facts: &'a HostFacts,

    /// The host was converted from a third-party distribution
    pub third_party_migrated: bool,

    /// Entitlement facts are stale and must be ignored
    pub skip_entitlement_facts: bool,

    /// Tags are being resolved for a metered (pay-as-you-go) tally
    pub is_metered: bool,
}

impl<'a> ProductRuleContext<'a> {
    #[must_use]
    pub const fn new(facts: &'a HostFacts, skip_entitlement_facts: bool, is_metered: bool) -> Self {
        Self {
            facts,
            third_party_migrated: facts.is_3rd_party_migrated,
            skip_entitlement_facts,
            is_metered,
        }
    }

    /// Registry filters matching this host
    #[must_use]
    pub const fn lookup_params(&self) -> TagLookupParams {
        TagLookupParams::new(self.third_party_migrated, self.is_metered)
    }
}
