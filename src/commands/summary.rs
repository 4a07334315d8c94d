// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::{
    api::TenantApi,
    commands::{Handle, HandledResult},
    store::{Snapshot, TenantStore},
    summary::reconcile,
};

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Print the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub fn summary<A: TenantApi>(store: &TenantStore<A>, args: &SummaryArgs) -> HandledResult<()> {
    print_snapshot(store.snapshot().as_deref(), args.json)
}

pub fn print_snapshot(snapshot: Option<&Snapshot>, json: bool) -> HandledResult<()> {
    let rendered =
        render(snapshot, json).handle_err(|e| eprintln!("Could not render summary: {e}"))?;
    print!("{rendered}");

    if let (Some(snapshot), false) = (snapshot, json) {
        println!(
            "\nLast refreshed: {}",
            snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

/// Render the summary of a snapshot. Without a snapshot there is nothing to show, which renders
/// as an empty string.
pub fn render(snapshot: Option<&Snapshot>, json: bool) -> Result<String, serde_json::Error> {
    let Some(summary) = reconcile(snapshot.map(|s| s.tenant.as_ref())) else {
        return Ok(String::new());
    };

    if json {
        Ok(serde_json::to_string_pretty(&summary)? + "\n")
    } else {
        Ok(summary.to_string())
    }
}
