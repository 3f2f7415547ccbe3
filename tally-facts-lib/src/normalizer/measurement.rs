use crate::facts::{SyspurposeUnits, SystemProfileFacts};
use core::str::FromStr;
use std::collections::BTreeSet;

const LOG_TARGET: &str = "   measure";

const X86_64: &str = "x86_64";

/// Socket and core counts as they are refined through normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Measurements {
    pub cores: Option<u32>,
    pub sockets: Option<u32>,
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

impl Measurements {
    /// Counts reported by the system profile; zero means "no data".
    pub fn from_system_profile(sp: &SystemProfileFacts) -> Self {
        let sockets = positive(sp.sockets);
        let cores = match (positive(sp.cores_per_socket), sockets) {
            (Some(per_socket), Some(sockets)) => Some(per_socket.saturating_mul(sockets)),
            _ => None,
        };

        Self { cores, sockets }
    }

    /// Hypervisors and physical hosts can't have an odd number of sockets.
    pub const fn round_up_odd_sockets(&mut self) {
        if let Some(sockets) = self.sockets
            && sockets % 2 == 1
        {
            self.sockets = Some(sockets.saturating_add(1));
        }
    }

    pub const fn zero_for_marketplace(&mut self) {
        self.cores = Some(0);
        self.sockets = Some(0);
    }

    /// Fill missing counts from the raw system-profile values.
    pub fn backfill(&mut self, sp: &SystemProfileFacts) {
        if self.cores.is_none() {
            self.cores = positive(sp.cores_per_socket);
        }

        if self.sockets.is_none() {
            self.sockets = positive(sp.sockets);
        }
    }

    /// Keep only the unit the host declared it is subscribed by.
    pub fn narrow_to_units(&mut self, units: &str, sp: &SystemProfileFacts, host: &str) {
        match SyspurposeUnits::from_str(units) {
            Ok(SyspurposeUnits::Sockets) => {
                self.cores = None;
                if self.sockets.is_none() {
                    self.sockets = positive(sp.sockets);
                }
            }
            Ok(SyspurposeUnits::CoresVcpu) => {
                self.sockets = None;
                if self.cores.is_none() {
                    self.cores = positive(sp.cores_per_socket);
                }
            }
            Err(_) => {
                log::warn!(target: LOG_TARGET, "Unsupported syspurpose units '{units}' on host '{host}'");
            }
        }
    }
}

/// Whether cores must be derived from vCPUs instead of taken from the socket topology.
pub fn needs_vcpu_derivation(sp: &SystemProfileFacts, is_virtual_infrastructure: bool) -> bool {
    is_virtual_infrastructure && sp.arch.as_deref().is_some_and(|arch| arch.trim() == X86_64)
}

/// Settings steering the vCPU to core conversion.
#[derive(Debug, Clone, Copy)]
pub struct VcpuPolicy {
    pub threads_per_core_default: f64,

    /// The host's own threads-per-core can be trusted
    pub use_reported_topology: bool,
}

impl VcpuPolicy {
    pub fn threads_per_core(&self, sp: &SystemProfileFacts, tags: &BTreeSet<String>) -> f64 {
        if !self.use_reported_topology {
            return self.threads_per_core_default;
        }

        if let Some(threads) = positive(sp.threads_per_core) {
            let threads = f64::from(threads);
            if (threads - self.threads_per_core_default).abs() > f64::EPSILON {
                log::warn!(
                    target: LOG_TARGET,
                    "Using {threads} threads per core from the system profile to calculate vCPUs for products {tags:?}"
                );
            }
            return threads;
        }

        if let (Some(cpus), Some(sockets), Some(per_socket)) =
            (positive(sp.cpus), positive(sp.sockets), positive(sp.cores_per_socket))
        {
            let threads = f64::from(cpus) / (f64::from(sockets) * f64::from(per_socket));
            if (threads - self.threads_per_core_default).abs() > f64::EPSILON {
                log::warn!(
                    target: LOG_TARGET,
                    "Using {threads} threads per core from {cpus} cpus / ({sockets} sockets * {per_socket} cores per socket) to calculate vCPUs for products {tags:?}"
                );
            }
            return threads;
        }

        self.threads_per_core_default
    }

    /// Cores derived from the host's vCPU count, or `None` when the CPU count is unknown.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the quotient is positive and saturates at u32::MAX"
    )]
    pub fn vcpu_cores(&self, sp: &SystemProfileFacts, tags: &BTreeSet<String>) -> Option<u32> {
        let cpus = positive(sp.cpus).or_else(|| match (positive(sp.sockets), positive(sp.cores_per_socket)) {
            (Some(sockets), Some(per_socket)) => Some(sockets.saturating_mul(per_socket)),
            _ => None,
        })?;

        let threads_per_core = self.threads_per_core(sp, tags);
        Some((f64::from(cpus) / threads_per_core).ceil() as u32)
    }
}
