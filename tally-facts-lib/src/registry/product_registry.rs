use super::{Offering, SubscriptionDefinition, TagLookupParams, Variant};
use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, app_err};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

/// The default registry TOML content, embedded from `default_registry.toml`
pub const DEFAULT_REGISTRY_TOML: &str = include_str!("../../default_registry.toml");

const LOG_TARGET: &str = "  registry";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    subscriptions: Vec<SubscriptionDefinition>,

    #[serde(default)]
    architectures: BTreeMap<String, String>,

    #[serde(default)]
    offerings: Vec<Offering>,
}

/// Validated, immutable index of the known subscriptions and the tags they define.
///
/// Every mapping defect is detected when the registry is built, so lookups never fail.
#[derive(Debug)]
pub struct ProductRegistry {
    subscriptions: Vec<SubscriptionDefinition>,
    architectures: BTreeMap<String, String>,
    offerings: FxHashMap<String, Offering>,

    // tag -> index into `subscriptions`
    tag_index: FxHashMap<String, usize>,
}

impl ProductRegistry {
    /// Load a registry from a TOML file
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading product registry '{path}'"))?;
        Self::from_toml(&text).into_app_err_with(|| format!("loading product registry '{path}'"))
    }

    /// Parse and validate a registry from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(text).into_app_err("parsing product registry")?;
        Self::build(file)
    }

    fn build(file: RegistryFile) -> Result<Self> {
        let mut ids = FxHashSet::default();
        let mut tag_index = FxHashMap::default();

        for (index, subscription) in file.subscriptions.iter().enumerate() {
            if subscription.id.trim().is_empty() {
                return Err(app_err!("subscription #{index} has an empty id"));
            }

            if !ids.insert(subscription.id.as_str()) {
                return Err(app_err!("duplicate subscription id '{}'", subscription.id));
            }

            for variant in &subscription.variants {
                if variant.tag.trim().is_empty() {
                    return Err(app_err!("subscription '{}' has a variant with an empty tag", subscription.id));
                }

                if tag_index.insert(variant.tag.clone(), index).is_some() {
                    return Err(app_err!("duplicate product tag '{}'", variant.tag));
                }
            }
        }

        for subscription in &file.subscriptions {
            for included in &subscription.included_subscriptions {
                if !ids.contains(included.as_str()) {
                    return Err(app_err!(
                        "subscription '{}' includes unknown subscription '{included}'",
                        subscription.id
                    ));
                }
            }
        }

        // a role must identify a single subscription among those with the same metering model
        let mut roles: FxHashMap<(bool, &str), &str> = FxHashMap::default();
        for subscription in &file.subscriptions {
            for role in subscription.variants.iter().flat_map(|v| v.roles.iter()) {
                if let Some(previous) = roles.insert((subscription.payg, role.as_str()), subscription.id.as_str())
                    && previous != subscription.id
                {
                    return Err(app_err!(
                        "role '{role}' is mapped by both subscription '{previous}' and subscription '{}'",
                        subscription.id
                    ));
                }
            }
        }

        for (arch, tag) in &file.architectures {
            if !tag_index.contains_key(tag) {
                return Err(app_err!("architecture '{arch}' maps to unknown product tag '{tag}'"));
            }
        }

        let mut offerings = FxHashMap::default();
        for offering in file.offerings {
            if !tag_index.contains_key(&offering.tag) {
                return Err(app_err!("offering '{}' maps to unknown product tag '{}'", offering.name, offering.tag));
            }

            if offerings.contains_key(&offering.name) {
                return Err(app_err!("duplicate offering name '{}'", offering.name));
            }

            let _ = offerings.insert(offering.name.clone(), offering);
        }

        log::debug!(
            target: LOG_TARGET,
            "Loaded {} subscriptions defining {} product tags",
            file.subscriptions.len(),
            tag_index.len()
        );

        Ok(Self {
            subscriptions: file.subscriptions,
            architectures: file.architectures,
            offerings,
            tag_index,
        })
    }

    /// Tags of every variant fingerprinted by any of the given engineering product ids
    #[must_use]
    pub fn tags_for_engineering_ids(&self, engineering_ids: &[u32], params: TagLookupParams) -> BTreeSet<String> {
        if engineering_ids.is_empty() {
            return BTreeSet::new();
        }

        self.collect_tags(params, |variant| {
            variant.engineering_ids.iter().any(|id| engineering_ids.contains(id))
        })
    }

    /// Tags of every variant identified by the given role
    #[must_use]
    pub fn tags_for_role(&self, role: &str, params: TagLookupParams) -> BTreeSet<String> {
        if role.is_empty() {
            return BTreeSet::new();
        }

        self.collect_tags(params, |variant| variant.roles.iter().any(|r| r == role))
    }

    #[must_use]
    pub fn tag_for_architecture(&self, arch: &str) -> Option<&str> {
        self.architectures.get(arch).map(String::as_str)
    }

    #[must_use]
    pub fn offering(&self, name: &str) -> Option<&Offering> {
        self.offerings.get(name)
    }

    #[must_use]
    pub fn subscription_for_tag(&self, tag: &str) -> Option<&SubscriptionDefinition> {
        self.tag_index.get(tag).and_then(|index| self.subscriptions.get(*index))
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_known_tag(&self, tag: &str) -> bool {
        self.tag_index.contains_key(tag)
    }

    /// Remove the tags whose subscription is already included by the subscription of another tag.
    ///
    /// This keeps parent/child product lines (e.g. a product bundling the OS it runs on) from
    /// being counted twice.
    #[must_use]
    pub fn prune_included_products(&self, tags: &BTreeSet<String>) -> BTreeSet<String> {
        let excluded: FxHashSet<&str> = tags
            .iter()
            .filter_map(|tag| self.subscription_for_tag(tag))
            .flat_map(|subscription| subscription.included_subscriptions.iter())
            .filter_map(|id| self.subscriptions.iter().find(|s| &s.id == id))
            .flat_map(|subscription| subscription.variants.iter().map(|v| v.tag.as_str()))
            .collect();

        tags.iter().filter(|tag| !excluded.contains(tag.as_str())).cloned().collect()
    }

    #[must_use]
    pub fn subscriptions(&self) -> &[SubscriptionDefinition] {
        &self.subscriptions
    }

    fn collect_tags(&self, params: TagLookupParams, matches: impl Fn(&Variant) -> bool) -> BTreeSet<String> {
        self.subscriptions
            .iter()
            .filter(|s| params.is_payg_eligible.is_none_or(|payg| s.payg == payg))
            .flat_map(|s| s.variants.iter())
            .filter(|v| params.is_3rd_party_migration.is_none_or(|migrated| v.is_migration_product == migrated))
            .filter(|v| matches(v))
            .map(|v| v.tag.clone())
            .collect()
    }
}

impl Default for ProductRegistry {
    fn default() -> Self {
        Self::from_toml(DEFAULT_REGISTRY_TOML).expect("default_registry.toml should be a valid product registry")
    }
}
