// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod domains;
pub mod summary;
pub mod version;
pub mod watch;

use {
    domains::EditDomainsArgs, summary::SummaryArgs, version::UpdateVersionArgs,
    watch::WatchArgs,
};

use clap::{Parser, Subcommand};

use crate::{
    api::{HttpApi, TenantId},
    config::Config,
    store::{Refresh, TenantStore},
};

/// A `HandledError` represents an error that has already been handled. When you call a function
/// that returns a `HandledError` or `HandledResult`, you don't need to do anything with that error,
/// other than just be aware that it happened, and return it on to your caller.
///
/// `main()` has a special responsibility: since its "caller" is, in a certain sense, the operating
/// system, `main()` must return a nonzero exit status when it gets a `HandledError`.
///
/// The primary way to construct a `HandledError` is with the `handle_err()` function, which turns a
/// generic error into a `HandledError`, and also runs some caller-provided code to handle the
/// error. That provided code would normally do something like report the error to stderr.
#[derive(Debug, PartialEq)]
pub struct HandledError {}

pub type HandledResult<T> = std::result::Result<T, HandledError>;

pub fn handled_error<T>() -> HandledResult<T> {
    HandledResult::Err(HandledError {})
}

pub trait Handle<T, F> {
    fn handle_err(self, handler: F) -> HandledResult<T>;
}

impl<T, E, F: FnOnce(E)> Handle<T, F> for std::result::Result<T, E> {
    /// Handle an error by running the provided `handler` code, giving it the error.
    ///
    /// Then, return a `HandledResult`, so that transitive callers of this function know that they
    /// do not need to do anything further to handle the error.
    fn handle_err(self, handler: F) -> HandledResult<T> {
        self.map_err(|e| {
            handler(e);
            HandledError {}
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Base URL of the console backend. Overrides the config file.
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Namespace of the tenant to show.
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Name of the tenant to show.
    #[arg(short, long, global = true)]
    pub tenant: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tenant summary.
    Summary(SummaryArgs),
    /// Move the tenant to a different MinIO image.
    UpdateVersion(UpdateVersionArgs),
    /// Change the domains the tenant's services are routed under.
    EditDomains(EditDomainsArgs),
    /// Keep refreshing the tenant and print the summary whenever it changes.
    Watch(WatchArgs),
}

/// Work out which tenant to show. The command line wins over the config file, field by field.
pub fn tenant_id(cli: &Cli, config: &Config) -> HandledResult<TenantId> {
    let from_config = config.tenant.as_ref();
    let namespace = cli
        .namespace
        .clone()
        .or_else(|| from_config.map(|t| t.namespace.clone()));
    let name = cli
        .tenant
        .clone()
        .or_else(|| from_config.map(|t| t.name.clone()));

    match (namespace, name) {
        (Some(namespace), Some(name)) if !namespace.is_empty() && !name.is_empty() => {
            Ok(TenantId { namespace, name })
        }
        _ => {
            eprintln!("Must specify the tenant using --namespace and --tenant, or in the config file.");
            handled_error()
        }
    }
}

pub fn main(cli: &Cli) -> HandledResult<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api) = &cli.api {
        config.api_url = api.clone();
    }
    config.validate()?;

    let id = tenant_id(cli, &config)?;
    let api = HttpApi::new(&config).handle_err(|e| eprintln!("Could not create HTTP client: {e}"))?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .handle_err(|e| eprintln!("Error launching tokio runtime: {e}"))?;

    rt.block_on(async {
        let store = TenantStore::new(api, id);

        // Everything below works on a loaded tenant, so fetch it up front.
        store.refresh().await.handle_err(|e| eprintln!("{e}"))?;

        match &cli.command {
            Commands::Summary(args) => summary::summary(&store, args),
            Commands::UpdateVersion(args) => version::update_version(&store, args).await,
            Commands::EditDomains(args) => domains::edit_domains(&store, args).await,
            Commands::Watch(args) => watch::watch(&store, args).await,
        }
    })
}
