//! Product registry
//!
//! The registry is the static catalog of subscriptions known to the tally: each subscription
//! owns one or more variants, and each variant is identified by a product tag and by the
//! technical fingerprints (engineering product ids, roles) that reveal it on a host.
//!
//! The registry is loaded once at startup and validated eagerly, so a mapping defect fails the
//! process before any host is normalized. After that it is immutable and shared by reference.

mod product_registry;
mod subscription_definition;
mod tag_lookup_params;

pub use product_registry::{DEFAULT_REGISTRY_TOML, ProductRegistry};
pub use subscription_definition::{Offering, SubscriptionDefinition, Variant};
pub use tag_lookup_params::TagLookupParams;
