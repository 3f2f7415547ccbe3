/// Optional filters applied when looking up product tags in the registry.
///
/// A `None` filter matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagLookupParams {
    /// Only consider variants whose migration status matches
    pub is_3rd_party_migration: Option<bool>,

    /// Only consider subscriptions whose metered status matches
    pub is_payg_eligible: Option<bool>,
}

impl TagLookupParams {
    #[must_use]
    pub const fn new(is_3rd_party_migration: bool, is_payg_eligible: bool) -> Self {
        Self {
            is_3rd_party_migration: Some(is_3rd_party_migration),
            is_payg_eligible: Some(is_payg_eligible),
        }
    }

    /// Parameters that match every variant, used to report near-miss candidates.
    #[must_use]
    pub const fn unfiltered() -> Self {
        Self {
            is_3rd_party_migration: None,
            is_payg_eligible: None,
        }
    }
}
