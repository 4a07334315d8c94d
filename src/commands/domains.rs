// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::{
    api::TenantApi,
    commands::{handled_error, summary::print_snapshot, Handle, HandledResult},
    session::{DomainEditor, EditOutcome, SessionController, SessionKind},
    store::TenantStore,
};

#[derive(Args, Debug, Clone, Default)]
pub struct EditDomainsArgs {
    /// Domain to route the console under.
    #[arg(long)]
    pub console: Option<String>,

    /// Domain to route MinIO under. Can be given several times; replaces all MinIO domains.
    #[arg(long)]
    pub minio: Vec<String>,

    /// Remove all domains.
    #[arg(long, conflicts_with_all = ["console", "minio"])]
    pub clear: bool,
}

pub async fn edit_domains<A: TenantApi>(
    store: &TenantStore<A>,
    args: &EditDomainsArgs,
) -> HandledResult<()> {
    let mut sessions = SessionController::new(store.id().clone());
    let outcome = run_domain_edit(&mut sessions, store, args).await?;

    match outcome {
        EditOutcome::Committed => print_snapshot(store.snapshot().as_deref(), false),
        EditOutcome::Cancelled => {
            println!("No domain changes given for '{}'.", store.id());
            Ok(())
        }
        EditOutcome::Failed => handled_error(),
    }
}

/// Drive one domain edit through the session controller. Fields that are not mentioned in
/// `args` keep the values the session was seeded with.
pub async fn run_domain_edit<A: TenantApi>(
    sessions: &mut SessionController,
    store: &TenantStore<A>,
    args: &EditDomainsArgs,
) -> HandledResult<EditOutcome> {
    let tenant = store.current_tenant();
    let seed = sessions.open_domain_edit(tenant.as_deref()).clone();
    let current = seed.domains.clone().unwrap_or_default();
    let mut editor = DomainEditor::new(store.api(), seed);

    let outcome = if args.clear {
        editor.commit(None, &[]).await
    } else if args.console.is_none() && args.minio.is_empty() {
        editor.cancel()
    } else {
        let console = args.console.clone().or(current.console);
        let minio = if args.minio.is_empty() {
            current.minio.unwrap_or_default()
        } else {
            args.minio.clone()
        };
        editor.commit(console.as_deref(), &minio).await
    };

    sessions
        .finish(SessionKind::DomainEdit, outcome, store)
        .await
        .handle_err(|e| eprintln!("{e}"))?;

    Ok(outcome)
}
