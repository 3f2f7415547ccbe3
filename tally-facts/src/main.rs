//! Normalize host inventory facts and resolve their product tags.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use chrono::{DateTime, Utc};
use std::io::Write;
use std::io::{stderr, stdout};
use tally_facts_lib::{Host, run};

/// The real process: standard streams, process exit, and the system clock.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
