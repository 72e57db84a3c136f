//! Connection and placement settings, read from environment variables.

use crate::error::DlrError;
use crate::model::PlacementTarget;
use std::env;

const DEFAULT_NSX_USERNAME: &str = "admin";
const DEFAULT_VCENTER_PORT: u16 = 443;

/// NSX Manager endpoint and credentials
#[derive(Debug, Clone)]
pub struct NsxSettings {
    /// Base URL, e.g. `https://nsxmgr.corp.local`
    pub manager: String,
    /// Basic auth user, `admin` unless set
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

/// vCenter endpoint and credentials
#[derive(Debug, Clone)]
pub struct VCenterSettings {
    /// Host name or address, without scheme
    pub host: String,
    /// Session login user
    pub user: String,
    /// Session login password
    pub password: String,
    /// HTTPS port
    pub port: u16,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

/// Everything the CLI needs to reach NSX and vCenter
#[derive(Debug, Clone)]
pub struct DlrConfig {
    /// NSX Manager settings
    pub nsx: NsxSettings,
    /// vCenter settings
    pub vcenter: VCenterSettings,
    /// Where router control appliances are deployed
    pub placement: PlacementTarget,
}

impl DlrConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, DlrError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DlrError> {
        let vars = Vars(lookup);

        let nsx = NsxSettings {
            manager: normalize_manager(&vars.required("NSX_MANAGER")?),
            username: vars.or_default("NSX_USERNAME", DEFAULT_NSX_USERNAME),
            password: vars.required("NSX_PASSWORD")?,
            accept_invalid_certs: vars.flag("NSX_INSECURE", true)?,
        };

        let vcenter = VCenterSettings {
            host: vars.required("VCENTER_HOST")?,
            user: vars.required("VCENTER_USER")?,
            password: vars.required("VCENTER_PASSWORD")?,
            port: match vars.optional("VCENTER_PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| DlrError::InvalidConfig(format!("VCENTER_PORT is not a port number: {}", raw)))?,
                None => DEFAULT_VCENTER_PORT,
            },
            accept_invalid_certs: vars.flag("VCENTER_INSECURE", true)?,
        };

        let placement = PlacementTarget {
            datacenter: vars.required("VCENTER_DATACENTER")?,
            datastore: vars.required("EDGE_DATASTORE")?,
            cluster: vars.required("EDGE_CLUSTER")?,
        };

        Ok(Self { nsx, vcenter, placement })
    }
}

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, DlrError> {
        self.optional(key)
            .ok_or_else(|| DlrError::InvalidConfig(format!("{} environment variable is required", key)))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn flag(&self, key: &str, default: bool) -> Result<bool, DlrError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(DlrError::InvalidConfig(format!("{} must be a boolean, got {}", key, raw))),
        }
    }
}

/// Bare host names are reached over https
fn normalize_manager(manager: &str) -> String {
    let manager = manager.trim_end_matches('/');
    if manager.starts_with("http://") || manager.starts_with("https://") {
        manager.to_string()
    } else {
        format!("https://{}", manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("NSX_MANAGER", "nsxmgr.corp.local"),
            ("NSX_PASSWORD", "nsx-secret"),
            ("VCENTER_HOST", "vc.corp.local"),
            ("VCENTER_USER", "administrator@vsphere.local"),
            ("VCENTER_PASSWORD", "vc-secret"),
            ("VCENTER_DATACENTER", "DC1"),
            ("EDGE_DATASTORE", "ds-edge"),
            ("EDGE_CLUSTER", "edge-cluster"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<DlrConfig, DlrError> {
        DlrConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&base()).unwrap();

        assert_eq!(config.nsx.manager, "https://nsxmgr.corp.local");
        assert_eq!(config.nsx.username, "admin");
        assert!(config.nsx.accept_invalid_certs);
        assert_eq!(config.vcenter.port, 443);
        assert!(config.vcenter.accept_invalid_certs);
        assert_eq!(config.placement.datacenter, "DC1");
        assert_eq!(config.placement.datastore, "ds-edge");
        assert_eq!(config.placement.cluster, "edge-cluster");
    }

    #[test]
    fn test_overrides() {
        let mut vars = base();
        vars.insert("NSX_MANAGER", "https://10.0.0.5/");
        vars.insert("NSX_USERNAME", "netadmin");
        vars.insert("NSX_INSECURE", "no");
        vars.insert("VCENTER_PORT", "8443");
        vars.insert("VCENTER_INSECURE", "0");

        let config = load(&vars).unwrap();

        assert_eq!(config.nsx.manager, "https://10.0.0.5");
        assert_eq!(config.nsx.username, "netadmin");
        assert!(!config.nsx.accept_invalid_certs);
        assert_eq!(config.vcenter.port, 8443);
        assert!(!config.vcenter.accept_invalid_certs);
    }

    #[test]
    fn test_missing_variable_is_named() {
        let mut vars = base();
        vars.remove("EDGE_CLUSTER");

        let err = load(&vars).unwrap_err();
        assert!(matches!(err, DlrError::InvalidConfig(ref msg) if msg.contains("EDGE_CLUSTER")));
    }

    #[test]
    fn test_blank_variable_counts_as_missing() {
        let mut vars = base();
        vars.insert("NSX_PASSWORD", "  ");

        let err = load(&vars).unwrap_err();
        assert!(matches!(err, DlrError::InvalidConfig(ref msg) if msg.contains("NSX_PASSWORD")));
    }

    #[test]
    fn test_malformed_values() {
        let mut vars = base();
        vars.insert("VCENTER_PORT", "http");
        assert!(matches!(load(&vars), Err(DlrError::InvalidConfig(_))));

        let mut vars = base();
        vars.insert("VCENTER_INSECURE", "maybe");
        let err = load(&vars).unwrap_err();
        assert!(matches!(err, DlrError::InvalidConfig(ref msg) if msg.contains("VCENTER_INSECURE")));
    }
}
