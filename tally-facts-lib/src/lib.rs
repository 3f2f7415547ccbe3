#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for tally-facts
//!
//! This library turns raw, per-host inventory facts gathered by several independent collectors
//! into one canonical normalized record per host, ready to be tallied into billable usage.
//!
//! # Module Organization
//!
//! - [`facts`]: Raw host facts, org-wide hypervisor data, and the normalized output record
//! - [`registry`]: The validated catalog of subscriptions and product tags
//! - [`rules`]: Product rules and tag resolution
//! - [`normalizer`]: The step-by-step normalization of one host
//! - [`config`]: Configuration file handling
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod config;
pub mod facts;
pub mod normalizer;
pub mod registry;
pub mod rules;

pub use crate::commands::{Host, run};
