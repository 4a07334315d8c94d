// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::time::Duration;

use {clap::Args, log::debug};

use crate::{
    api::TenantApi,
    commands::{
        summary::{print_snapshot, render},
        HandledResult,
    },
    store::{Refresh, TenantStore},
};

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Seconds between refreshes.
    #[arg(long, default_value_t = 5)]
    pub interval: u64,

    /// Stop after this many refreshes instead of running until interrupted.
    #[arg(long)]
    pub count: Option<u64>,

    #[arg(long)]
    pub json: bool,
}

/// Refresh the tenant every `interval` seconds and print the summary whenever what it shows
/// changed. A failed refresh is reported and the last good summary stays on screen.
pub async fn watch<A: TenantApi>(store: &TenantStore<A>, args: &WatchArgs) -> HandledResult<()> {
    let mut updates = store.subscribe();
    let mut shown = render(store.snapshot().as_deref(), args.json).unwrap_or_default();
    print_snapshot(store.snapshot().as_deref(), args.json)?;

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    // The first tick completes immediately and the tenant was just loaded.
    ticker.tick().await;

    let mut refreshes = 0;
    while args.count.map_or(true, |count| refreshes < count) {
        ticker.tick().await;
        refreshes += 1;

        if let Err(e) = store.refresh().await {
            eprintln!("{e}");
            continue;
        }

        if !updates.has_changed().unwrap_or(false) {
            continue;
        }
        let snapshot = updates.borrow_and_update().clone();
        let rendered = render(snapshot.as_deref(), args.json).unwrap_or_default();
        if rendered == shown {
            debug!("tenant '{}' unchanged", store.id());
            continue;
        }

        println!();
        print_snapshot(snapshot.as_deref(), args.json)?;
        shown = rendered;
    }

    Ok(())
}
