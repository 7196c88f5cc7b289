//! Runtime configuration: CLI flags (clap) layered over environment
//! variables (`.env` via dotenvy), mirroring `services/wms-api`'s
//! `Args`/`env::var(...).unwrap_or_else(...)` convention.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::model::ModelRegistry;

#[derive(Parser, Debug, Clone)]
#[command(name = "forecast-api")]
#[command(about = "GRIB2 tile and point-forecast server")]
pub struct Args {
    /// Listen address for the HTTP server.
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Directory GRIB2 run files are read from.
    #[arg(long, env = "GRIB_BASE_DIR", default_value = "/data/grib")]
    pub grib_base_dir: PathBuf,

    /// Shared (L2) cache connection string.
    #[arg(long, env = "REDIS_URL", default_value = "redis://redis:6379")]
    pub redis_url: String,

    /// Process-local (L1) cache entry TTL, seconds.
    #[arg(long, env = "L1_TTL_SECS", default_value_t = 600)]
    pub l1_ttl_secs: u64,

    /// Shared (L2) cache entry TTL, seconds.
    #[arg(long, env = "L2_TTL_SECS", default_value_t = 3600)]
    pub l2_ttl_secs: u64,

    /// L2 write-behind debounce window, milliseconds.
    #[arg(long, env = "L2_DEBOUNCE_MS", default_value_t = 300)]
    pub l2_debounce_ms: u64,

    /// Log level.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// How many past run-initialization days to search for a GRIB file.
    #[arg(long, env = "DAYS_BACK", default_value_t = 5)]
    pub days_back: i64,
}

impl Args {
    pub fn l1_ttl(&self) -> Duration {
        Duration::from_secs(self.l1_ttl_secs)
    }

    pub fn l2_ttl(&self) -> Duration {
        Duration::from_secs(self.l2_ttl_secs)
    }

    pub fn l2_debounce(&self) -> Duration {
        Duration::from_millis(self.l2_debounce_ms)
    }

    pub fn model_registry(&self) -> ModelRegistry {
        ModelRegistry::new()
    }
}
