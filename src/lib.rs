// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod api;
pub mod commands;
pub mod config;
pub mod session;
pub mod store;
pub mod summary;
pub mod tenant;
pub mod test_env;

pub fn default_config_path() -> String {
    match std::env::var("TENANTVIEW_CONFIG") {
        Ok(conf) => conf,
        Err(_) => "/etc/tenantview/tenantview.toml".to_string(),
    }
}

/// Gets the console backend URL to use when neither the CLI nor the config file sets one.
pub fn default_api_url() -> String {
    match std::env::var("TENANTVIEW_API") {
        Ok(url) => url,
        Err(_) => "http://localhost:9090".to_string(),
    }
}
