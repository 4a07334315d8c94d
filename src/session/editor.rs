// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The two editors behind the tenant summary's edit actions. An editor owns input validation,
//! the mutation request and the reporting of its failure; the session controller only ever sees
//! the resulting `EditOutcome`.

use log::{info, warn};

use super::{DomainSeed, EditOutcome, VersionSeed};
use crate::{api::TenantApi, tenant::Domains};

#[derive(Debug)]
pub struct VersionEditor<'a, A> {
    api: &'a A,
    seed: VersionSeed,
    error: Option<String>,
}

impl<'a, A: TenantApi> VersionEditor<'a, A> {
    pub fn new(api: &'a A, seed: VersionSeed) -> Self {
        Self {
            api,
            seed,
            error: None,
        }
    }

    pub fn seed(&self) -> &VersionSeed {
        &self.seed
    }

    /// Why the last commit failed, if it did.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cancel(&self) -> EditOutcome {
        EditOutcome::Cancelled
    }

    /// Ask the backend to move the tenant to `image`.
    pub async fn commit(&mut self, image: &str) -> EditOutcome {
        let image = image.trim();
        if image.is_empty() {
            return self.fail("image must not be empty".to_string());
        }

        let tenant = self.seed.tenant.clone();
        match self.api.update_image(&tenant, image).await {
            Ok(()) => {
                info!("updated '{tenant}' from '{}' to '{image}'", self.seed.image);
                self.error = None;
                EditOutcome::Committed
            }
            Err(e) => self.fail(format!("could not update '{tenant}' to '{image}': {e}")),
        }
    }

    fn fail(&mut self, message: String) -> EditOutcome {
        warn!("{message}");
        eprintln!("{message}");
        self.error = Some(message);
        EditOutcome::Failed
    }
}

#[derive(Debug)]
pub struct DomainEditor<'a, A> {
    api: &'a A,
    seed: DomainSeed,
    error: Option<String>,
}

impl<'a, A: TenantApi> DomainEditor<'a, A> {
    pub fn new(api: &'a A, seed: DomainSeed) -> Self {
        Self {
            api,
            seed,
            error: None,
        }
    }

    pub fn seed(&self) -> &DomainSeed {
        &self.seed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cancel(&self) -> EditOutcome {
        EditOutcome::Cancelled
    }

    /// Replace the tenant's domains. Blank entries are dropped; everything else has to be an
    /// http(s) URL.
    pub async fn commit(&mut self, console: Option<&str>, minio: &[String]) -> EditOutcome {
        let domains = match build_domains(console, minio) {
            Ok(domains) => domains,
            Err(message) => return self.fail(message),
        };

        let tenant = self.seed.tenant.clone();
        match self.api.update_domains(&tenant, &domains).await {
            Ok(()) => {
                info!("updated domains of '{tenant}'");
                self.error = None;
                EditOutcome::Committed
            }
            Err(e) => self.fail(format!("could not update domains of '{tenant}': {e}")),
        }
    }

    fn fail(&mut self, message: String) -> EditOutcome {
        warn!("{message}");
        eprintln!("{message}");
        self.error = Some(message);
        EditOutcome::Failed
    }
}

fn is_url(domain: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| domain.len() > scheme.len() && domain.starts_with(scheme))
}

fn build_domains(console: Option<&str>, minio: &[String]) -> Result<Domains, String> {
    let console = console.map(str::trim).filter(|c| !c.is_empty());
    if let Some(console) = console {
        if !is_url(console) {
            return Err(format!("console domain '{console}' is not an http(s) URL"));
        }
    }

    let mut minio_domains = Vec::new();
    for domain in minio.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
        if !is_url(domain) {
            return Err(format!("MinIO domain '{domain}' is not an http(s) URL"));
        }
        minio_domains.push(domain.to_string());
    }

    Ok(Domains {
        console: console.map(str::to_string),
        minio: if minio_domains.is_empty() {
            None
        } else {
            Some(minio_domains)
        },
    })
}
