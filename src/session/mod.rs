// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use log::debug;

use crate::{
    api::TenantId,
    store::{Refresh, RefreshError},
    tenant::{Domains, Tenant},
};

pub mod editor;

pub use editor::{DomainEditor, VersionEditor};

/// Data handed to the version editor when it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionSeed {
    pub tenant: TenantId,
    pub image: String,
}

/// Data handed to the domain editor when it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSeed {
    pub tenant: TenantId,
    pub domains: Option<Domains>,
}

/// What an editor reports back when it is done with a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The mutation went through; the displayed tenant is now stale.
    Committed,
    /// The user backed out without changing anything.
    Cancelled,
    /// The mutation failed. The editor has already reported why and stays open.
    Failed,
}

impl EditOutcome {
    /// The exit to take for this outcome, if the session should close at all.
    fn exit(self) -> Option<SessionExit> {
        match self {
            EditOutcome::Committed => Some(SessionExit { refresh: true }),
            EditOutcome::Cancelled => Some(SessionExit { refresh: false }),
            EditOutcome::Failed => None,
        }
    }
}

/// The single payload carried out of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionExit {
    pub refresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    VersionUpdate,
    DomainEdit,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Self::VersionUpdate => "version update",
                Self::DomainEdit => "domain edit",
            }
        )
    }
}

/// A session is either closed or open with the seed it was opened with.
#[derive(Debug, Clone, PartialEq)]
pub enum EditSession<S> {
    Closed,
    Open(S),
}

impl<S> EditSession<S> {
    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open(_))
    }

    pub fn seed(&self) -> Option<&S> {
        match self {
            EditSession::Open(seed) => Some(seed),
            EditSession::Closed => None,
        }
    }

    /// Open the session with a seed built by `seed`. Opening an open session keeps the existing
    /// seed and does not call `seed`.
    fn open_with(&mut self, seed: impl FnOnce() -> S) -> &S {
        if let EditSession::Closed = self {
            *self = EditSession::Open(seed());
        }
        match self {
            EditSession::Open(seed) => seed,
            EditSession::Closed => unreachable!(),
        }
    }

    /// Close the session, handing back its exit. A session that is already closed yields
    /// nothing, so an exit can only ever be acted on once.
    fn close(&mut self, exit: SessionExit) -> Option<SessionExit> {
        match std::mem::replace(self, EditSession::Closed) {
            EditSession::Open(_) => Some(exit),
            EditSession::Closed => None,
        }
    }
}

/// SessionController tracks the two edit flows of the tenant summary and asks the tenant store
/// for a refresh when an edit went through.
///
/// The identity of the tenant is fixed when the controller is created; seeds take it from there
/// rather than from whatever snapshot is currently loaded.
#[derive(Debug)]
pub struct SessionController {
    tenant: TenantId,
    version: EditSession<VersionSeed>,
    domains: EditSession<DomainSeed>,
}

impl SessionController {
    pub fn new(tenant: TenantId) -> Self {
        Self {
            tenant,
            version: EditSession::Closed,
            domains: EditSession::Closed,
        }
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn version_session(&self) -> &EditSession<VersionSeed> {
        &self.version
    }

    pub fn domain_session(&self) -> &EditSession<DomainSeed> {
        &self.domains
    }

    pub fn is_open(&self, kind: SessionKind) -> bool {
        match kind {
            SessionKind::VersionUpdate => self.version.is_open(),
            SessionKind::DomainEdit => self.domains.is_open(),
        }
    }

    /// Open the version update flow, seeded with the image of the loaded tenant.
    pub fn open_version_update(&mut self, tenant: Option<&Tenant>) -> &VersionSeed {
        let id = &self.tenant;
        self.version.open_with(|| {
            debug!("opening version update for '{id}'");
            VersionSeed {
                tenant: id.clone(),
                image: tenant.and_then(|t| t.image.clone()).unwrap_or_default(),
            }
        })
    }

    /// Open the domain edit flow, seeded with the domains of the loaded tenant.
    pub fn open_domain_edit(&mut self, tenant: Option<&Tenant>) -> &DomainSeed {
        let id = &self.tenant;
        self.domains.open_with(|| {
            debug!("opening domain edit for '{id}'");
            DomainSeed {
                tenant: id.clone(),
                domains: tenant.and_then(|t| t.domains.clone()),
            }
        })
    }

    /// Close a session. When the session was open and `exit.refresh` is set, exactly one
    /// refresh is requested from `store`; otherwise `store` is not touched.
    ///
    /// The session is closed even if the refresh fails. The error is handed back to the caller
    /// and not retried.
    pub async fn close<R: Refresh>(
        &mut self,
        kind: SessionKind,
        exit: SessionExit,
        store: &R,
    ) -> Result<(), RefreshError> {
        let exit = match kind {
            SessionKind::VersionUpdate => self.version.close(exit),
            SessionKind::DomainEdit => self.domains.close(exit),
        };

        match exit {
            Some(SessionExit { refresh: true }) => {
                debug!("{kind} for '{}' closed, refreshing", self.tenant);
                store.refresh().await
            }
            Some(SessionExit { refresh: false }) => {
                debug!("{kind} for '{}' closed", self.tenant);
                Ok(())
            }
            None => {
                debug!("{kind} for '{}' was not open", self.tenant);
                Ok(())
            }
        }
    }

    /// React to the outcome an editor reported for a session.
    pub async fn finish<R: Refresh>(
        &mut self,
        kind: SessionKind,
        outcome: EditOutcome,
        store: &R,
    ) -> Result<(), RefreshError> {
        match outcome.exit() {
            Some(exit) => self.close(kind, exit, store).await,
            None => {
                debug!("{kind} for '{}' failed, leaving it open", self.tenant);
                Ok(())
            }
        }
    }
}
