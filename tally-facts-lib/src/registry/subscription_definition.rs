use serde::Deserialize;

/// A billable offering with one or more variants, each identified by a product tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionDefinition {
    pub id: String,

    /// Family of related subscriptions (e.g. all RHEL architectures)
    pub platform: String,

    /// Whether the subscription is metered (pay-as-you-go)
    #[serde(default)]
    pub payg: bool,

    /// Subscriptions that come "in the box" with this one and must not be counted twice
    #[serde(default)]
    pub included_subscriptions: Vec<String>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A product tag together with the technical fingerprints that identify it on a host.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Variant {
    pub tag: String,

    #[serde(default)]
    pub engineering_ids: Vec<u32>,

    #[serde(default)]
    pub roles: Vec<String>,

    /// Whether this variant only applies to hosts converted from a third-party distribution
    #[serde(default)]
    pub is_migration_product: bool,
}

/// Maps a product name reported by the third-party collector to a product tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Offering {
    pub name: String,
    pub tag: String,

    /// Also derive an architecture-specific tag for hosts without system-profile product ids
    #[serde(default)]
    pub arch_specific: bool,
}
