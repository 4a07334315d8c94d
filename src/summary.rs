// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use serde::Serialize;

use crate::tenant::{Pool, Tenant};

/// Coarse health of a tenant's storage, derived from the backend's "red/yellow/green" status.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthClass {
    Critical,
    Warning,
    Healthy,
    Unknown,
}

impl HealthClass {
    /// Any value other than the three known colors, including an empty or missing status, maps
    /// to `Unknown`.
    pub fn from_status(health_status: Option<&str>) -> Self {
        match health_status {
            Some("red") => HealthClass::Critical,
            Some("yellow") => HealthClass::Warning,
            Some("green") => HealthClass::Healthy,
            _ => HealthClass::Unknown,
        }
    }
}

impl fmt::Display for HealthClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Self::Critical => "critical",
                Self::Warning => "warning",
                Self::Healthy => "healthy",
                Self::Unknown => "unknown",
            }
        )
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Address generated by the system; shown visually distinct from user domains.
    Endpoint,
    /// Name declared by the user.
    Domain,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub kind: LinkKind,
}

impl Link {
    fn endpoint(href: &str) -> Self {
        Link {
            href: href.to_string(),
            kind: LinkKind::Endpoint,
        }
    }

    fn domain(href: &str) -> Self {
        Link {
            href: href.to_string(),
            kind: LinkKind::Domain,
        }
    }
}

/// A labeled list of links to one of the tenant's services. An empty list is shown as the
/// placeholder "-".
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub label: String,
    pub links: Vec<Link>,
}

impl Locator {
    pub const PLACEHOLDER: &'static str = "-";

    pub fn is_placeholder(&self) -> bool {
        self.links.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureToggles {
    pub logs: bool,
    pub ad_ldap: bool,
    pub encryption: bool,
    pub minio_tls: bool,
    pub monitoring: bool,
    pub openid: bool,
}

impl FeatureToggles {
    /// Label/state pairs in display order.
    pub fn entries(&self) -> [(&'static str, bool); 6] {
        [
            ("Logs", self.logs),
            ("AD/LDAP", self.ad_ldap),
            ("Encryption", self.encryption),
            ("MinIO TLS", self.minio_tls),
            ("Monitoring", self.monitoring),
            ("OpenID", self.openid),
        ]
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolSummary {
    pub name: String,
    pub servers: u64,
    pub volumes_per_server: u64,
    pub capacity: u64,
}

impl PoolSummary {
    fn build(index: usize, pool: &Pool) -> Self {
        Self {
            name: match &pool.name {
                Some(name) if !name.is_empty() => name.clone(),
                _ => format!("pool-{index}"),
            },
            servers: pool.servers.unwrap_or(0),
            volumes_per_server: pool.volumes_per_server.unwrap_or(0),
            capacity: pool.capacity.unwrap_or(0),
        }
    }
}

/// Every value shown on the tenant summary, fully populated. Produced by `reconcile()`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TenantSummary {
    pub name: String,
    pub namespace: String,
    pub state: String,
    pub image: String,
    pub health: HealthClass,
    /// Raw capacity summed over all pools, in bytes.
    pub capacity: u64,
    pub console: Locator,
    pub minio: Locator,
    pub instances: u64,
    pub pool_count: usize,
    pub volumes: u64,
    pub write_quorum: u32,
    pub drives_online: u32,
    pub drives_offline: u32,
    pub features: FeatureToggles,
    pub pools: Vec<PoolSummary>,
}

/// Derive the display values for a tenant. No tenant means nothing is displayed at all.
pub fn reconcile(tenant: Option<&Tenant>) -> Option<TenantSummary> {
    let tenant = tenant?;

    let status = tenant.status.clone().unwrap_or_default();
    let flag = |value: Option<bool>| value.unwrap_or(false);
    let pools: Vec<PoolSummary> = tenant
        .pools()
        .iter()
        .enumerate()
        .map(|(i, pool)| PoolSummary::build(i, pool))
        .collect();

    Some(TenantSummary {
        name: tenant.name.clone(),
        namespace: tenant.namespace.clone(),
        state: tenant.current_state.clone().unwrap_or_default(),
        image: tenant.image.clone().unwrap_or_default(),
        health: HealthClass::from_status(status.health_status.as_deref()),
        capacity: pools.iter().map(|p| p.capacity).sum(),
        console: console_locator(tenant),
        minio: minio_locator(tenant),
        instances: tenant.total_instances.unwrap_or(0),
        pool_count: pools.len(),
        volumes: tenant.total_volumes.unwrap_or(0),
        write_quorum: status.write_quorum.unwrap_or(0),
        drives_online: status.drives_online.unwrap_or(0),
        drives_offline: status.drives_offline.unwrap_or(0),
        features: FeatureToggles {
            logs: flag(tenant.log_enabled),
            ad_ldap: flag(tenant.idp_ad_enabled),
            encryption: flag(tenant.encryption_enabled),
            minio_tls: flag(tenant.minio_tls),
            monitoring: flag(tenant.monitoring_enabled),
            openid: flag(tenant.idp_oidc_enabled),
        },
        pools,
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn console_locator(tenant: &Tenant) -> Locator {
    let endpoint = tenant
        .endpoints
        .as_ref()
        .and_then(|e| non_empty(e.console.as_ref()));
    let domain = tenant
        .domains
        .as_ref()
        .and_then(|d| non_empty(d.console.as_ref()));

    let links = endpoint
        .map(Link::endpoint)
        .into_iter()
        .chain(domain.map(Link::domain))
        .collect();

    Locator {
        label: "Console".to_string(),
        links,
    }
}

fn minio_locator(tenant: &Tenant) -> Locator {
    let endpoints = tenant.endpoints.as_ref().and_then(|e| e.minio.as_ref());

    // The label only looks at the system endpoints; domain links never change it.
    let singular = endpoints.is_some_and(|addrs| addrs.len() == 1);

    let mut links: Vec<Link> = endpoints
        .into_iter()
        .flat_map(|addrs| addrs.iter())
        .map(Link::endpoint)
        .collect();

    if let Some(domains) = tenant.domains.as_ref().and_then(|d| d.minio.as_ref()) {
        links.extend(
            domains
                .iter()
                .filter(|d| !d.is_empty())
                .map(|d| Link::domain(d)),
        );
    }

    Locator {
        label: if singular {
            "MinIO Endpoint".to_string()
        } else {
            "MinIO Endpoints".to_string()
        },
        links,
    }
}

/// Column at which values start. The longest label, "MinIO Endpoints:", still gets a space.
const INDENT: usize = 17;

fn row(f: &mut fmt::Formatter, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:<width$} {}", format!("{label}:"), value, width = INDENT - 1)
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        Locator::PLACEHOLDER
    } else {
        value
    }
}

/// Render a byte count with binary units, e.g. "1.0 TiB".
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if self.is_placeholder() {
            return row(f, &self.label, Self::PLACEHOLDER);
        }
        for (i, link) in self.links.iter().enumerate() {
            let marker = match link.kind {
                LinkKind::Endpoint => " (auto)",
                LinkKind::Domain => "",
            };
            if i == 0 {
                row(f, &self.label, format!("{}{marker}", link.href))?;
            } else {
                writeln!(f, "{:<width$}{}{marker}", "", link.href, width = INDENT)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TenantSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "Details")?;
        row(f, "Tenant", format!("{}/{}", self.namespace, self.name))?;
        row(f, "Health", self.health)?;
        row(f, "Capacity", human_bytes(self.capacity))?;
        row(f, "State", or_placeholder(&self.state))?;
        row(f, "MinIO", or_placeholder(&self.image))?;
        write!(f, "{}", self.console)?;
        write!(f, "{}", self.minio)?;
        row(f, "Instances", self.instances)?;
        row(f, "Clusters", self.pool_count)?;
        row(f, "Total Drives", self.volumes)?;
        row(f, "Write Quorum", self.write_quorum)?;
        row(f, "Drives Online", self.drives_online)?;
        row(f, "Drives Offline", self.drives_offline)?;

        writeln!(f)?;
        writeln!(f, "Features")?;
        for (label, enabled) in self.features.entries() {
            row(f, label, if enabled { "Enabled" } else { "Disabled" })?;
        }

        if !self.pools.is_empty() {
            writeln!(f)?;
            writeln!(f, "Pools")?;
            for pool in &self.pools {
                writeln!(
                    f,
                    "  {}: {} servers x {} drives, {}",
                    pool.name,
                    pool.servers,
                    pool.volumes_per_server,
                    human_bytes(pool.capacity)
                )?;
            }
        }
        Ok(())
    }
}
