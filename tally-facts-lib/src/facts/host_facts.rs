use serde::Deserialize;

/// Raw inventory facts for one host at one point in time.
///
/// Facts arrive from several independent collectors and any of them may be missing, so every
/// field is optional and defaults to "absent".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostFacts {
    /// Inventory identifier, carried through to the output as-is
    pub inventory_id: Option<String>,

    /// Display name, carried through to the output as-is
    pub display_name: Option<String>,

    pub org_id: Option<String>,
    pub subscription_manager_id: Option<String>,

    /// Last time subscription-manager synced this host, as an RFC 3339 timestamp
    pub sync_timestamp: Option<String>,

    /// Virtualization flag reported by subscription-manager
    pub is_virtual: bool,

    /// Whether the host is billed through a cloud marketplace
    pub is_marketplace: bool,

    /// Whether the host was converted from a third-party distribution
    pub is_3rd_party_migrated: bool,

    /// Product ids entitled through subscription-manager
    pub entitled_product_ids: Vec<String>,

    /// Product names reported by the third-party collector
    pub qpc_products: Vec<String>,

    pub system_profile: SystemProfileFacts,
    pub satellite: SatelliteFacts,
    pub syspurpose: SyspurposeFacts,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemProfileFacts {
    pub sockets: Option<u32>,
    pub cores_per_socket: Option<u32>,
    pub cpus: Option<u32>,
    pub threads_per_core: Option<u32>,
    pub arch: Option<String>,
    pub infrastructure_type: Option<String>,
    pub cloud_provider: Option<String>,
    pub product_ids: Vec<String>,
    pub hypervisor_uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SatelliteFacts {
    pub hypervisor_uuid: Option<String>,
    pub sla: Option<String>,
    pub usage: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyspurposeFacts {
    pub sla: Option<String>,
    pub usage: Option<String>,
    pub units: Option<String>,
    pub role: Option<String>,
}

impl HostFacts {
    /// A short label identifying the host in log messages.
    #[must_use]
    pub fn label(&self) -> &str {
        non_blank(self.display_name.as_deref())
            .or_else(|| non_blank(self.inventory_id.as_deref()))
            .or_else(|| non_blank(self.subscription_manager_id.as_deref()))
            .unwrap_or("<unidentified>")
    }
}

/// Returns the value if it is present and contains something other than whitespace.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_json() {
        let json = r#"{
            "org_id": "org123",
            "system_profile": { "sockets": 2, "arch": "x86_64", "product_ids": ["69"] },
            "satellite": { "role": "Red Hat Enterprise Linux Server" }
        }"#;

        let facts: HostFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts.org_id.as_deref(), Some("org123"));
        assert_eq!(facts.system_profile.sockets, Some(2));
        assert_eq!(facts.system_profile.cores_per_socket, None);
        assert_eq!(facts.system_profile.product_ids, vec!["69".to_string()]);
        assert!(!facts.is_virtual);
        assert!(facts.syspurpose.units.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = r#"{ "sokets": 2 }"#;
        let result: Result<HostFacts, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_label_prefers_display_name() {
        let facts = HostFacts {
            display_name: Some("db01".into()),
            inventory_id: Some("inv-1".into()),
            ..HostFacts::default()
        };
        assert_eq!(facts.label(), "db01");
    }

    #[test]
    fn test_label_falls_back() {
        let facts = HostFacts {
            display_name: Some("  ".into()),
            subscription_manager_id: Some("sm-1".into()),
            ..HostFacts::default()
        };
        assert_eq!(facts.label(), "sm-1");
        assert_eq!(HostFacts::default().label(), "<unidentified>");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("x")), Some("x"));
        assert_eq!(non_blank(Some(" \t")), None);
        assert_eq!(non_blank(None), None);
    }
}
