//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FORGEBID_DB_PATH`: Database file path
//! - `FORGEBID_DB_POOL_SIZE`: Connection pool size
//! - `FORGEBID_MATERIAL_WASTE_PCT`: Default material waste percentage
//! - `FORGEBID_LABOR_WASTE_PCT`: Default labor waste percentage
//! - `FORGEBID_OVERHEAD_PCT`: Default overhead percentage
//! - `FORGEBID_PROFIT_PCT`: Default profit percentage
//! - `FORGEBID_LABOR_RATES`: Comma-separated shop labor rates
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json` (current working directory)
//! 2. `./forgebid.toml` or `./forgebid.json` (current working directory)
//! 3. `../config.toml` or `../config.json` (parent directory)
//! 4. `../forgebid.toml` or `../forgebid.json` (parent directory)

use std::path::{Path, PathBuf};

use forgebid_domain::{CompanyConfig, Config, DatabaseConfig, ForgebidError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ForgebidError::Config` if configuration cannot be loaded from
/// either source, the file format is invalid, or required fields are
/// missing.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `FORGEBID_DB_PATH` and `FORGEBID_DB_POOL_SIZE` are required; the
/// company defaults are optional and fall back to zero percentages.
///
/// # Errors
/// Returns `ForgebidError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("FORGEBID_DB_PATH")?;
    let db_pool_size = env_var("FORGEBID_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| ForgebidError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let company = CompanyConfig {
        material_waste_pct: env_f64("FORGEBID_MATERIAL_WASTE_PCT")?,
        labor_waste_pct: env_f64("FORGEBID_LABOR_WASTE_PCT")?,
        overhead_pct: env_f64("FORGEBID_OVERHEAD_PCT")?,
        profit_pct: env_f64("FORGEBID_PROFIT_PCT")?,
        labor_rates: env_rates("FORGEBID_LABOR_RATES")?,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        company,
    })
}

/// Load configuration from a file
///
/// When `path` is `None`, probes the default locations listed in the
/// module documentation.
///
/// # Errors
/// Returns `ForgebidError::Config` if no config file is found or the file
/// cannot be parsed.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            ForgebidError::Config("no config file found in default locations".into())
        })?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        ForgebidError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    let config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&contents)
            .map_err(|e| ForgebidError::Config(format!("invalid JSON config: {}", e)))?
    } else {
        toml::from_str(&contents)
            .map_err(|e| ForgebidError::Config(format!("invalid TOML config: {}", e)))?
    };

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    let candidates = [
        "config.toml",
        "config.json",
        "forgebid.toml",
        "forgebid.json",
        "../config.toml",
        "../config.json",
        "../forgebid.toml",
        "../forgebid.json",
    ];
    candidates.iter().map(PathBuf::from).find(|candidate| candidate.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| ForgebidError::Config(format!("missing environment variable {}", name)))
}

fn env_f64(name: &str) -> Result<f64> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<f64>()
            .map_err(|e| ForgebidError::Config(format!("invalid value for {}: {}", name, e))),
        Err(_) => Ok(0.0),
    }
}

fn env_rates(name: &str) -> Result<Vec<f64>> {
    match std::env::var(name) {
        Ok(value) => value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>().map_err(|e| {
                    ForgebidError::Config(format!("invalid value for {}: {}", name, e))
                })
            })
            .collect(),
        Err(_) => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn toml_file_round_trips() {
        let mut file = NamedTempFile::with_suffix(".toml").expect("temp file");
        writeln!(
            file,
            r#"
[database]
path = "estimates.db"
pool_size = 4

[company]
material_waste_pct = 5.0
overhead_pct = 12.0
profit_pct = 10.0
labor_rates = [52.0, 48.0]
"#
        )
        .expect("config written");

        let config = load_from_file(Some(file.path())).expect("config loaded");
        assert_eq!(config.database.path, "estimates.db");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.company.material_waste_pct, 5.0);
        assert_eq!(config.company.labor_waste_pct, 0.0);
        assert_eq!(config.company.labor_rates, vec![52.0, 48.0]);
    }

    #[test]
    fn json_file_round_trips() {
        let mut file = NamedTempFile::with_suffix(".json").expect("temp file");
        write!(
            file,
            r#"{{"database":{{"path":"estimates.db","pool_size":2}},"company":{{"profit_pct":8.0}}}}"#
        )
        .expect("config written");

        let config = load_from_file(Some(file.path())).expect("config loaded");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.company.profit_pct, 8.0);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_from_file(Some(Path::new("/nonexistent/forgebid.toml")));
        assert!(matches!(err, Err(ForgebidError::Config(_))));
    }

    #[test]
    fn company_section_is_optional() {
        let mut file = NamedTempFile::with_suffix(".toml").expect("temp file");
        writeln!(
            file,
            r#"
[database]
path = "estimates.db"
pool_size = 1
"#
        )
        .expect("config written");

        let config = load_from_file(Some(file.path())).expect("config loaded");
        assert_eq!(config.company.overhead_pct, 0.0);
        assert!(config.company.labor_rates.is_empty());
    }
}
