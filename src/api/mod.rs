// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use crate::tenant::{Domains, Tenant};

pub mod http;

pub use http::HttpApi;

/// The namespace/name pair that addresses a tenant on the console backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId {
    pub namespace: String,
    pub name: String,
}

impl TenantId {
    pub fn new(namespace: &str, name: &str) -> Self {
        TenantId {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    Transport(String),

    /// The backend does not know the tenant.
    NotFound,

    /// The backend answered with a non-success status. Carries the status code and response body.
    Status(u16, String),

    /// The response body was not a valid tenant.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Transport(e) => write!(f, "request failed: {e}"),
            Self::NotFound => write!(f, "tenant not found"),
            Self::Status(code, body) if body.is_empty() => write!(f, "unexpected status {code}"),
            Self::Status(code, body) => write!(f, "unexpected status {code}: {body}"),
            Self::Decode(e) => write!(f, "could not decode response: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status(status.as_u16(), String::new())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Operations the console backend offers for a single tenant.
///
/// `HttpApi` talks to a real console; `test_env::FakeApi` keeps everything in memory.
#[allow(async_fn_in_trait)]
pub trait TenantApi {
    async fn get_tenant(&self, id: &TenantId) -> Result<Tenant, ApiError>;

    /// Change the MinIO image the tenant runs.
    async fn update_image(&self, id: &TenantId, image: &str) -> Result<(), ApiError>;

    /// Replace the tenant's routable domains.
    async fn update_domains(&self, id: &TenantId, domains: &Domains) -> Result<(), ApiError>;
}
