mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Search, Service, Storage, Tensor};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if !matches!(cfg.service.log_level.as_str(), "error" | "warn" | "info" | "debug" | "trace") {
		return Err(Error::Validation {
			message: "service.log_level must be one of error, warn, info, debug, or trace."
				.to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.tensor.url.trim().is_empty() {
		return Err(Error::Validation { message: "tensor.url must be non-empty.".to_string() });
	}
	if cfg.tensor.index.trim().is_empty() {
		return Err(Error::Validation { message: "tensor.index must be non-empty.".to_string() });
	}
	if cfg.tensor.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "tensor.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.tensor.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.tensor.api_key = None;
	}
}
