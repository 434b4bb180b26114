//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Settings document name used when `--settings-file` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "esi_settings.json";

/// Arguments accepted by the `esi-engine` server.
#[derive(Debug, Clone, Parser)]
#[command(name = "esi-engine", version, about = "ESI contribution tracking and reporting server")]
pub struct CliArgs {
    /// Listen address.
    #[arg(
        long,
        env = "ESI_BIND",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    /// Payroll data directory.
    #[arg(
        long,
        env = "ESI_DATA_DIR",
        value_name = "DIR",
        default_value = "./data",
        help = "Directory holding the payroll YAML files and sessions.yaml"
    )]
    pub data_dir: PathBuf,

    /// Settings document path.
    #[arg(
        long,
        env = "ESI_SETTINGS_FILE",
        value_name = "FILE",
        help = "Path of the ESI settings JSON document [default: <data-dir>/esi_settings.json]"
    )]
    pub settings_file: Option<PathBuf>,
}

impl CliArgs {
    /// Returns the settings document path, defaulting into the data directory.
    pub fn settings_path(&self) -> PathBuf {
        self.settings_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_SETTINGS_FILE))
    }
}
