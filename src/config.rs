// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use serde::{Deserialize, Serialize};

use crate::commands::{handled_error, Handle, HandledResult};

/// Config is the model of the tenantview configuration file. The file is deserialized into a
/// Config object; every key is optional and falls back to a built-in default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the console backend, e.g. "http://localhost:9090".
    #[serde(default = "crate::default_api_url")]
    pub api_url: String,

    /// Timeout applied to every request made to the console backend.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tenant to show when none is given on the command line.
    #[serde(default)]
    pub tenant: Option<TenantRef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TenantRef {
    pub namespace: String,
    pub name: String,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: crate::default_api_url(),
            timeout_secs: default_timeout_secs(),
            tenant: None,
        }
    }
}

impl Config {
    /// Load the config file at `path`, or at the default location when no path is given.
    ///
    /// A missing file at the default location is not an error; the built-in defaults are used
    /// instead. A missing file that was asked for explicitly is an error.
    pub fn load(path: Option<&str>) -> HandledResult<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_string(), true),
            None => (crate::default_config_path(), false),
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config file at '{path}', using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                eprintln!("Could not open config file \"{path}\": {e}");
                return handled_error();
            }
        };

        Self::parse(&contents).handle_err(|e| {
            eprintln!("Could not parse config file \"{path}\": {e}");
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Check that values are usable before anything is sent over the network.
    pub fn validate(&self) -> HandledResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            eprintln!("api_url must be an http:// or https:// URL, got '{}'", self.api_url);
            return handled_error();
        }
        if self.timeout_secs == 0 {
            eprintln!("timeout_secs must be greater than zero");
            return handled_error();
        }
        Ok(())
    }
}
