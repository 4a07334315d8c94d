// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use serde::{Deserialize, Serialize};

/// Tenant is the model of a single storage tenant as returned by the console backend.
///
/// Everything other than the identity is optional on the wire. Missing sub-records and counters
/// are represented as `None` here and only turned into display defaults by the summary code, so
/// that this model stays a faithful copy of what the backend actually reported.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Tenant {
    pub name: String,
    pub namespace: String,

    #[serde(rename = "currentState", default)]
    pub current_state: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub pools: Option<Vec<Pool>>,

    #[serde(default)]
    pub total_volumes: Option<u64>,

    #[serde(default)]
    pub total_instances: Option<u64>,

    #[serde(default)]
    pub status: Option<TenantStatus>,

    #[serde(default)]
    pub domains: Option<Domains>,

    #[serde(default)]
    pub endpoints: Option<Endpoints>,

    #[serde(rename = "logEnabled", default)]
    pub log_enabled: Option<bool>,

    #[serde(rename = "monitoringEnabled", default)]
    pub monitoring_enabled: Option<bool>,

    #[serde(rename = "encryptionEnabled", default)]
    pub encryption_enabled: Option<bool>,

    #[serde(rename = "minioTLS", default)]
    pub minio_tls: Option<bool>,

    #[serde(rename = "idpAdEnabled", default)]
    pub idp_ad_enabled: Option<bool>,

    #[serde(rename = "idpOidcEnabled", default)]
    pub idp_oidc_enabled: Option<bool>,
}

impl Tenant {
    pub fn new(namespace: &str, name: &str) -> Self {
        Tenant {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    pub fn pools(&self) -> &[Pool] {
        self.pools.as_deref().unwrap_or(&[])
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Pool {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub servers: Option<u64>,
    #[serde(default)]
    pub volumes_per_server: Option<u64>,
    /// Raw capacity in bytes.
    #[serde(default)]
    pub capacity: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TenantStatus {
    /// One of "red", "yellow" or "green"; any other value is passed through untouched.
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub write_quorum: Option<u32>,
    #[serde(default)]
    pub drives_online: Option<u32>,
    #[serde(default)]
    pub drives_offline: Option<u32>,
}

/// User-declared DNS names that route to the tenant's services.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Domains {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minio: Option<Vec<String>>,
}

/// System-derived addresses where the tenant's services can be reached.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Endpoints {
    #[serde(default)]
    pub console: Option<String>,
    #[serde(default)]
    pub minio: Option<Addresses>,
}

/// The backend reports the MinIO endpoint either as a single address or as a list of them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Addresses {
    One(String),
    Many(Vec<String>),
}

impl Addresses {
    /// All non-empty addresses, in the order the backend reported them.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let addrs: &[String] = match self {
            Addresses::One(addr) => std::slice::from_ref(addr),
            Addresses::Many(addrs) => addrs,
        };
        addrs.iter().map(String::as_str).filter(|a| !a.is_empty())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let tenant: Tenant =
            serde_json::from_str(r#"{"name": "storage-lite", "namespace": "tenant-lite"}"#)
                .unwrap();
        assert_eq!(tenant, Tenant::new("tenant-lite", "storage-lite"));
        assert!(tenant.pools().is_empty());
    }

    #[test]
    fn parse_backend_names() {
        let tenant: Tenant = serde_json::from_str(
            r#"{
                "name": "t1",
                "namespace": "ns",
                "currentState": "Initialized",
                "total_volumes": 16,
                "status": {"health_status": "green", "write_quorum": 9},
                "endpoints": {"minio": ["https://a", ""]},
                "minioTLS": true,
                "unrelated": {"ignored": 1}
            }"#,
        )
        .unwrap();

        assert_eq!(tenant.current_state.as_deref(), Some("Initialized"));
        assert_eq!(tenant.total_volumes, Some(16));
        assert_eq!(tenant.minio_tls, Some(true));
        assert_eq!(tenant.log_enabled, None);

        let status = tenant.status.unwrap();
        assert_eq!(status.write_quorum, Some(9));
        assert_eq!(status.drives_online, None);

        let minio = tenant.endpoints.unwrap().minio.unwrap();
        assert_eq!(minio.iter().collect::<Vec<_>>(), vec!["https://a"]);
    }

    #[test]
    fn single_address() {
        let addrs: Addresses = serde_json::from_str(r#""https://minio.ns.svc""#).unwrap();
        assert_eq!(addrs.len(), 1);

        let addrs = Addresses::One(String::new());
        assert!(addrs.is_empty());
    }
}
