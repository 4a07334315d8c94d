// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Parser;

use tenantview_lib::commands::{self, Cli};

/// The tenantview binary shows a storage tenant's summary and runs its edit actions.
fn main() {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("TENANTVIEW_LOG", default_filter),
    )
    .init();

    if commands::main(&args).is_err() {
        std::process::exit(1);
    }
}
