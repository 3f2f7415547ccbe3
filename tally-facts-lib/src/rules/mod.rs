//! Product-tag resolution
//!
//! A host's product tags come from four independent fact sources, each handled by one
//! [`ProductRule`]. The [`TagResolver`] evaluates every rule, unions their tags, adds
//! "RHEL Ungrouped" when the RHEL variant is ambiguous, and drops tags whose product is already
//! included in another tag's subscription.

mod product_rule;
mod product_rule_context;
mod tag_resolver;

pub use product_rule::ProductRule;
pub use product_rule_context::ProductRuleContext;
pub use tag_resolver::{RHEL_TAG, RHEL_UNGROUPED_TAG, TagResolver, reconcile_rhel_variants};
