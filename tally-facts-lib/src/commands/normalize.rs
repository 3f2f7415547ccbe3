use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::facts::{HostFacts, NormalizedFacts, OrgHostsData, non_blank};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = " normalize";

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// JSON file holding an array of host facts
    #[arg(long, value_name = "PATH")]
    pub facts: Utf8PathBuf,

    /// JSON file holding the org's hypervisor relationships (default is an empty org)
    #[arg(long, value_name = "PATH")]
    pub org_data: Option<Utf8PathBuf>,

    /// Resolve products for a metered (pay-as-you-go) tally
    #[arg(long)]
    pub metered: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path, what: &str) -> Result<T> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading {what} from '{path}'"))?;
    serde_json::from_str(&text).into_app_err_with(|| format!("parsing {what} from '{path}'"))
}

fn normalize_inner(args: &NormalizeArgs, now: DateTime<Utc>) -> Result<Vec<NormalizedFacts>> {
    let normalizer = args.common.normalizer()?;

    let hosts: Vec<HostFacts> = read_json(&args.facts, "host facts")?;
    let org_data = match &args.org_data {
        Some(path) => read_json(path, "org hosts data")?,
        None => OrgHostsData::default(),
    };

    log::info!(
        target: LOG_TARGET,
        "Normalizing {} hosts against {} hypervisor mappings",
        hosts.len(),
        org_data.len()
    );

    Ok(hosts
        .iter()
        .map(|facts| match foreign_org(facts, &org_data) {
            Some(host_org) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Host '{}' belongs to org '{host_org}', not '{}', normalizing it without hypervisor mappings",
                    facts.label(),
                    org_data.org_id
                );
                normalizer.normalize_at(facts, &OrgHostsData::new(host_org), args.metered, now)
            }
            None => normalizer.normalize_at(facts, &org_data, args.metered, now),
        })
        .collect())
}

/// The host's org when it names one different from the org the hypervisor mappings were built for
fn foreign_org<'a>(facts: &'a HostFacts, org_data: &OrgHostsData) -> Option<&'a str> {
    let host_org = non_blank(facts.org_id.as_deref())?.trim();
    let data_org = org_data.org_id.trim();
    (!data_org.is_empty() && host_org != data_org).then_some(host_org)
}

/// Normalize every host in the facts file and print the results as a JSON array
///
/// # Errors
///
/// Returns an error if the configuration, registry, or input files can't be loaded
pub fn normalize_hosts<H: Host>(host: &mut H, args: &NormalizeArgs) -> Result<()> {
    let result = normalize_inner(args, host.now()).and_then(|normalized| {
        serde_json::to_string_pretty(&normalized).into_app_err("serializing normalized facts")
    });

    match result {
        Ok(json) => {
            let _ = writeln!(host.output(), "{json}");
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Normalization failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
