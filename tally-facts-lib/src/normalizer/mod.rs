//! Host fact normalization
//!
//! [`FactNormalizer`] walks one host's raw facts through a fixed sequence of steps:
//!
//! 1. Decide whether the host's entitlement facts are stale
//! 2. Resolve product tags
//! 3. Classify virtualization and the host's relationship to its hypervisor
//! 4. Classify the hardware type
//! 5. Derive socket and core counts, converting vCPUs to cores on virtual x86_64 hosts
//! 6. Apply satellite SLA and usage
//! 7. Apply entitlement org id, SLA and usage, unless stale
//! 8. Round odd socket counts up for hypervisors and physical hosts
//! 9. Apply marketplace and single-socket guest rules
//! 10. Backfill missing counts from the system profile
//! 11. Narrow counts to the syspurpose units
//!
//! The order matters: later steps overwrite earlier ones.

mod classification;
mod fact_normalizer;
mod measurement;
mod staleness;

pub use fact_normalizer::{FactNormalizer, OPENSHIFT_TAG};
