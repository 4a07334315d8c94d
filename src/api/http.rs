// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::time::Duration;

use {
    log::debug,
    reqwest::{Response, StatusCode},
    serde::{Deserialize, Serialize},
};

use super::{ApiError, TenantApi, TenantId};
use crate::{
    config::Config,
    tenant::{Domains, Tenant},
};

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateImageArgs {
    pub image: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateDomainsArgs {
    pub domains: Domains,
}

/// Client for the console's tenant REST API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn tenant_url(&self, id: &TenantId) -> String {
        format!(
            "{}/api/v1/namespaces/{}/tenants/{}",
            self.base_url, id.namespace, id.name
        )
    }

    /// Turn a non-success response into the matching `ApiError`.
    async fn check(response: Response) -> Result<Response, ApiError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            other => {
                let body = match response.text().await {
                    Ok(text) => text,
                    Err(e) => format!("error decoding response: {e}"),
                };
                Err(ApiError::Status(other.as_u16(), body))
            }
        }
    }
}

impl TenantApi for HttpApi {
    async fn get_tenant(&self, id: &TenantId) -> Result<Tenant, ApiError> {
        let url = self.tenant_url(id);
        debug!("GET {url}");

        let response = Self::check(self.client.get(&url).send().await?).await?;
        Ok(response.json::<Tenant>().await?)
    }

    async fn update_image(&self, id: &TenantId, image: &str) -> Result<(), ApiError> {
        let url = self.tenant_url(id);
        debug!("PUT {url} image={image}");

        let params = UpdateImageArgs {
            image: image.to_string(),
        };
        Self::check(self.client.put(&url).json(&params).send().await?).await?;
        Ok(())
    }

    async fn update_domains(&self, id: &TenantId, domains: &Domains) -> Result<(), ApiError> {
        let url = format!("{}/domains", self.tenant_url(id));
        debug!("PUT {url}");

        let params = UpdateDomainsArgs {
            domains: domains.clone(),
        };
        Self::check(self.client.put(&url).json(&params).send().await?).await?;
        Ok(())
    }
}
