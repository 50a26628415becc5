// Runtime configuration for the contact book CLI
//
// Everything comes from the command line; there is no config file. The only
// environment variable honoured is RUST_LOG, which overrides the log filter.

use contactbook_core::DEFAULT_CONTACTS_FILE;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file the contact book is loaded from and saved to
    pub contacts_file: PathBuf,

    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contacts_file: PathBuf::from(DEFAULT_CONTACTS_FILE),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Build from parsed arguments. `verbosity` is the number of `-v` flags.
    pub fn new(contacts_file: Option<PathBuf>, verbosity: u8) -> Self {
        let defaults = Self::default();
        Self {
            contacts_file: contacts_file.unwrap_or(defaults.contacts_file),
            log_filter: Self::filter_for_verbosity(verbosity).to_string(),
        }
    }

    fn filter_for_verbosity(verbosity: u8) -> &'static str {
        match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// RUST_LOG if set and valid, otherwise the configured filter
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_filter))
    }

    /// List all config values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "contacts_file".to_string(),
                self.contacts_file.display().to_string(),
            ),
            ("log_filter".to_string(), self.log_filter.clone()),
        ]
    }
}
