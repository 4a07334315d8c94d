// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Helpers shared by the tests: tenant fixtures, an in-memory console API, a refresh counter,
//! and a mock console HTTP server for exercising the real HTTP client.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use {
    axum::{extract::Path, http::StatusCode, routing::get, Json, Router},
    tokio::sync::oneshot,
};

use crate::{
    api::{
        http::{UpdateDomainsArgs, UpdateImageArgs},
        ApiError, TenantApi, TenantId,
    },
    store::{Refresh, RefreshError},
    tenant::*,
};

/// A fully populated tenant, as a healthy backend would report it.
pub fn tenant_fixture() -> Tenant {
    Tenant {
        name: "storage-lite".to_string(),
        namespace: "tenant-lite".to_string(),
        current_state: Some("Initialized".to_string()),
        image: Some("minio/minio:RELEASE.2022-01-08T03-11-54Z".to_string()),
        pools: Some(vec![Pool {
            name: Some("pool-0".to_string()),
            servers: Some(4),
            volumes_per_server: Some(4),
            capacity: Some(1 << 40),
        }]),
        total_volumes: Some(16),
        total_instances: Some(4),
        status: Some(TenantStatus {
            health_status: Some("green".to_string()),
            write_quorum: Some(9),
            drives_online: Some(16),
            drives_offline: Some(0),
        }),
        domains: Some(Domains {
            console: Some("https://console.my.example".to_string()),
            minio: Some(vec![
                "https://a.my.example".to_string(),
                "https://b.my.example".to_string(),
            ]),
        }),
        endpoints: Some(Endpoints {
            console: Some("https://console.tenant-lite.svc".to_string()),
            minio: Some(Addresses::One("https://minio.tenant-lite.svc".to_string())),
        }),
        log_enabled: Some(true),
        monitoring_enabled: Some(false),
        encryption_enabled: Some(true),
        minio_tls: Some(true),
        idp_ad_enabled: None,
        idp_oidc_enabled: Some(true),
    }
}

/// A tenant with nothing but its identity.
pub fn bare_tenant() -> Tenant {
    Tenant::new("tenant-lite", "storage-lite")
}

pub fn fixture_id() -> TenantId {
    TenantId::new("tenant-lite", "storage-lite")
}

#[derive(Debug, Default)]
struct FakeState {
    tenant: Option<Tenant>,
    get_failures: VecDeque<ApiError>,
    update_failures: VecDeque<ApiError>,
    gates: VecDeque<oneshot::Receiver<()>>,
}

/// An in-memory `TenantApi`. Counts calls, applies updates to the stored tenant, and lets a test
/// inject failures or hold back individual fetches.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    gets: AtomicUsize,
    updates: AtomicUsize,
}

impl FakeApi {
    pub fn new(tenant: Tenant) -> Self {
        let api = Self::default();
        api.set_tenant(tenant);
        api
    }

    /// An API that knows no tenant; every fetch answers `NotFound`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_tenant(&self, tenant: Tenant) {
        self.state.lock().unwrap().tenant = Some(tenant);
    }

    pub fn tenant(&self) -> Option<Tenant> {
        self.state.lock().unwrap().tenant.clone()
    }

    pub fn fail_next_get(&self, error: ApiError) {
        self.state.lock().unwrap().get_failures.push_back(error);
    }

    pub fn fail_next_update(&self, error: ApiError) {
        self.state.lock().unwrap().update_failures.push_back(error);
    }

    /// Hold the next fetch until the returned sender fires. The fetch answers with the tenant as
    /// it was when the fetch was issued.
    pub fn gate_next_get(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.state.lock().unwrap().gates.push_back(receiver);
        sender
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn update(&self, apply: impl FnOnce(&mut Tenant)) -> Result<(), ApiError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.update_failures.pop_front() {
            return Err(e);
        }
        match state.tenant.as_mut() {
            Some(tenant) => {
                apply(tenant);
                Ok(())
            }
            None => Err(ApiError::NotFound),
        }
    }
}

impl TenantApi for FakeApi {
    async fn get_tenant(&self, _id: &TenantId) -> Result<Tenant, ApiError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let (answer, gate) = {
            let mut state = self.state.lock().unwrap();
            let answer = match state.get_failures.pop_front() {
                Some(e) => Err(e),
                None => state.tenant.clone().ok_or(ApiError::NotFound),
            };
            (answer, state.gates.pop_front())
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        answer
    }

    async fn update_image(&self, _id: &TenantId, image: &str) -> Result<(), ApiError> {
        self.update(|tenant| tenant.image = Some(image.to_string()))
    }

    async fn update_domains(&self, _id: &TenantId, domains: &Domains) -> Result<(), ApiError> {
        self.update(|tenant| tenant.domains = Some(domains.clone()))
    }
}

/// A `Refresh` that only counts how often it was asked to refresh.
#[derive(Debug, Default)]
pub struct CountingRefresh {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Refresh for CountingRefresh {
    async fn refresh(&self) -> Result<(), RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RefreshError {
                tenant: fixture_id(),
                cause: ApiError::Transport("connection refused".to_string()),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub tenants: HashMap<(String, String), Tenant>,
    /// "METHOD path" of every request received, in order.
    pub requests: Vec<String>,
    /// When set, every request is answered with this status.
    pub fail_with: Option<StatusCode>,
}

type Shared = Arc<Mutex<MockState>>;

/// A console backend serving the tenant routes from memory on an ephemeral local port.
pub struct MockConsole {
    pub url: String,
    pub state: Shared,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for MockConsole {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl MockConsole {
    pub async fn start(tenants: Vec<Tenant>) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            tenants: tenants
                .into_iter()
                .map(|t| ((t.namespace.clone(), t.name.clone()), t))
                .collect(),
            ..Default::default()
        }));

        let router = Router::new()
            .route(
                "/api/v1/namespaces/{namespace}/tenants/{tenant}",
                get({
                    let state = Arc::clone(&state);
                    |path| mock_get_tenant(path, state)
                })
                .put({
                    let state = Arc::clone(&state);
                    |path, payload| mock_update_image(path, payload, state)
                }),
            )
            .route(
                "/api/v1/namespaces/{namespace}/tenants/{tenant}/domains",
                axum::routing::put({
                    let state = Arc::clone(&state);
                    |path, payload| mock_update_domains(path, payload, state)
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("could not bind mock console");
        let addr = listener.local_addr().expect("mock console has no address");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            url: format!("http://{addr}"),
            state,
            server,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn tenant(&self, id: &TenantId) -> Option<Tenant> {
        self.state
            .lock()
            .unwrap()
            .tenants
            .get(&(id.namespace.clone(), id.name.clone()))
            .cloned()
    }

    pub fn fail_with(&self, status: Option<StatusCode>) {
        self.state.lock().unwrap().fail_with = status;
    }
}

/// Record a request and apply `f` to the addressed tenant, honoring injected failures.
fn with_tenant<T>(
    state: &Shared,
    request: String,
    (namespace, name): (String, String),
    f: impl FnOnce(&mut Tenant) -> T,
) -> Result<T, (StatusCode, String)> {
    let mut state = state.lock().unwrap();
    state.requests.push(request);
    if let Some(status) = state.fail_with {
        return Err((status, "injected failure".to_string()));
    }
    match state.tenants.get_mut(&(namespace, name)) {
        Some(tenant) => Ok(f(tenant)),
        None => Err((StatusCode::NOT_FOUND, String::new())),
    }
}

async fn mock_get_tenant(
    Path(key): Path<(String, String)>,
    state: Shared,
) -> Result<Json<Tenant>, (StatusCode, String)> {
    let request = format!("GET /api/v1/namespaces/{}/tenants/{}", key.0, key.1);
    with_tenant(&state, request, key, |tenant| Json(tenant.clone()))
}

async fn mock_update_image(
    Path(key): Path<(String, String)>,
    Json(payload): Json<UpdateImageArgs>,
    state: Shared,
) -> Result<(), (StatusCode, String)> {
    let request = format!("PUT /api/v1/namespaces/{}/tenants/{}", key.0, key.1);
    with_tenant(&state, request, key, |tenant| {
        tenant.image = Some(payload.image)
    })
}

async fn mock_update_domains(
    Path(key): Path<(String, String)>,
    Json(payload): Json<UpdateDomainsArgs>,
    state: Shared,
) -> Result<(), (StatusCode, String)> {
    let request = format!("PUT /api/v1/namespaces/{}/tenants/{}/domains", key.0, key.1);
    with_tenant(&state, request, key, |tenant| {
        tenant.domains = Some(payload.domains)
    })
}
