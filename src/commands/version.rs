// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::{
    api::TenantApi,
    commands::{handled_error, summary::print_snapshot, Handle, HandledResult},
    session::{EditOutcome, SessionController, SessionKind, VersionEditor},
    store::TenantStore,
};

#[derive(Args, Debug, Clone)]
pub struct UpdateVersionArgs {
    /// MinIO image to run, e.g. "minio/minio:RELEASE.2022-02-07T08-17-33Z"
    pub image: String,
}

pub async fn update_version<A: TenantApi>(
    store: &TenantStore<A>,
    args: &UpdateVersionArgs,
) -> HandledResult<()> {
    let mut sessions = SessionController::new(store.id().clone());
    let outcome = run_version_update(&mut sessions, store, &args.image).await?;

    match outcome {
        EditOutcome::Committed => print_snapshot(store.snapshot().as_deref(), false),
        EditOutcome::Cancelled => {
            println!("'{}' already runs '{}'.", store.id(), args.image.trim());
            Ok(())
        }
        // The editor has already reported the failure.
        EditOutcome::Failed => handled_error(),
    }
}

/// Drive one version update through the session controller: open the session from the loaded
/// tenant, let the editor commit the new image, and close the session according to the outcome.
pub async fn run_version_update<A: TenantApi>(
    sessions: &mut SessionController,
    store: &TenantStore<A>,
    image: &str,
) -> HandledResult<EditOutcome> {
    let tenant = store.current_tenant();
    let seed = sessions.open_version_update(tenant.as_deref()).clone();
    let mut editor = VersionEditor::new(store.api(), seed);

    let outcome = if editor.seed().image == image.trim() {
        editor.cancel()
    } else {
        editor.commit(image).await
    };

    sessions
        .finish(SessionKind::VersionUpdate, outcome, store)
        .await
        .handle_err(|e| eprintln!("{e}"))?;

    Ok(outcome)
}
