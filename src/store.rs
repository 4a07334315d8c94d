// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use {
    chrono::{Local, NaiveDateTime},
    log::{debug, warn},
    tokio::sync::watch,
};

use crate::{
    api::{ApiError, TenantApi, TenantId},
    tenant::Tenant,
};

/// One completed fetch of a tenant. Snapshots are never modified after creation; a refresh
/// replaces the whole snapshot.
#[derive(Debug)]
pub struct Snapshot {
    pub tenant: Arc<Tenant>,
    pub fetched_at: NaiveDateTime,
    /// Order in which the fetch that produced this snapshot was issued.
    generation: u64,
}

impl Snapshot {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshError {
    pub tenant: TenantId,
    pub cause: ApiError,
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "could not refresh tenant '{}': {}", self.tenant, self.cause)
    }
}

impl std::error::Error for RefreshError {}

/// Anything that can be asked to reload the tenant it is showing.
#[allow(async_fn_in_trait)]
pub trait Refresh {
    async fn refresh(&self) -> Result<(), RefreshError>;
}

/// TenantStore holds the most recently fetched snapshot of a single tenant.
///
/// The snapshot lives in a `watch` cell: readers take a cheap `Arc` to whatever is current, and
/// the only writer is a completed `refresh()`, which swaps in a complete new snapshot. A failed
/// refresh leaves the previous snapshot in place.
#[derive(Debug)]
pub struct TenantStore<A> {
    api: A,
    id: TenantId,
    cell: watch::Sender<Option<Arc<Snapshot>>>,
    issued: AtomicU64,
}

impl<A: TenantApi> TenantStore<A> {
    pub fn new(api: A, id: TenantId) -> Self {
        let (cell, _) = watch::channel(None);
        Self {
            api,
            id,
            cell,
            issued: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> &TenantId {
        &self.id
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn current_tenant(&self) -> Option<Arc<Tenant>> {
        self.cell
            .borrow()
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.tenant))
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.cell.borrow().clone()
    }

    /// Get a receiver that is notified every time a new snapshot becomes visible.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.cell.subscribe()
    }

    /// Drop the current snapshot, e.g. because nothing is displaying it anymore.
    pub fn clear(&self) {
        self.cell.send_replace(None);
    }

    /// Install a fetched tenant unless a snapshot from a later fetch is already visible.
    /// Returns whether the snapshot was installed.
    fn install(&self, tenant: Tenant, generation: u64) -> bool {
        let snapshot = Arc::new(Snapshot {
            tenant: Arc::new(tenant),
            fetched_at: Local::now().naive_local(),
            generation,
        });

        self.cell.send_if_modified(|current| match current {
            Some(existing) if existing.generation > generation => false,
            _ => {
                *current = Some(snapshot);
                true
            }
        })
    }
}

impl<A: TenantApi> Refresh for TenantStore<A> {
    async fn refresh(&self) -> Result<(), RefreshError> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("refreshing tenant '{}' (fetch {generation})", self.id);

        match self.api.get_tenant(&self.id).await {
            Ok(tenant) => {
                if !self.install(tenant, generation) {
                    debug!("fetch {generation} of '{}' superseded by a later fetch", self.id);
                }
                Ok(())
            }
            Err(cause) => {
                warn!("refresh of tenant '{}' failed: {cause}", self.id);
                Err(RefreshError {
                    tenant: self.id.clone(),
                    cause,
                })
            }
        }
    }
}
