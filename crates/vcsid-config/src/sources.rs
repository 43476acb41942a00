// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, files, environment.

use std::path::PathBuf;

use tracing::{debug, trace, warn};
use vcsid_core::{FullNamePolicy, VcsHostType};

use crate::layer::ConfigLayer;
use crate::ConfigError;

/// Prefix for every environment variable read by [`EnvSource`].
pub const ENV_PREFIX: &str = "VCSID_";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Host defaults are applied when the runtime config is built
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
}

impl FileSource {
	/// System config: /etc/vcsid/config.toml
	pub fn system() -> Self {
		Self {
			path: PathBuf::from("/etc/vcsid/config.toml"),
			precedence: Precedence::SystemFile,
			name: "system-config",
		}
	}

	/// User config: ~/.config/vcsid/config.toml
	pub fn user() -> Result<Self, ConfigError> {
		let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
		Ok(Self {
			path: config_dir.join("vcsid").join("config.toml"),
			precedence: Precedence::UserFile,
			name: "user-config",
		})
	}

	/// Custom file path with specified precedence
	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
		}
	}

	pub fn path(&self) -> &PathBuf {
		&self.path
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, ?layer, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `VCSID_<HOST>_FULL_NAME_POLICY`, where `<HOST>` is one of
/// `GITHUB`, `GITLAB`, `BITBUCKET_CLOUD`, `BITBUCKET_SERVER`.
pub struct EnvSource;

impl EnvSource {
	/// Name of the variable holding the full-name policy for `host_type`.
	pub fn policy_var(host_type: VcsHostType) -> String {
		format!(
			"{ENV_PREFIX}{}_FULL_NAME_POLICY",
			host_type.config_key().to_ascii_uppercase().replace('-', "_")
		)
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = ConfigLayer::default();

		for host_type in VcsHostType::ALL {
			let key = Self::policy_var(host_type);
			let Ok(value) = std::env::var(&key) else {
				continue;
			};

			let value = value.trim();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");
			match value.parse::<FullNamePolicy>() {
				Ok(policy) => {
					layer.host_mut(host_type).full_name_policy = Some(policy.to_string());
				}
				Err(e) => {
					warn!(key = %key, value = %value, error = %e, "ignoring invalid env var");
				}
			}
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn test_policy_var_names() {
		assert_eq!(
			EnvSource::policy_var(VcsHostType::Github),
			"VCSID_GITHUB_FULL_NAME_POLICY"
		);
		assert_eq!(
			EnvSource::policy_var(VcsHostType::BitbucketServer),
			"VCSID_BITBUCKET_SERVER_FULL_NAME_POLICY"
		);
	}

	#[test]
	fn test_precedence_order() {
		assert!(Precedence::Defaults < Precedence::SystemFile);
		assert!(Precedence::SystemFile < Precedence::UserFile);
		assert!(Precedence::UserFile < Precedence::Environment);
	}

	#[test]
	fn test_missing_file_is_empty_layer() {
		let source = FileSource::custom(
			PathBuf::from("/nonexistent/vcsid/config.toml"),
			Precedence::UserFile,
			"test",
		);
		let layer = source.load().unwrap();
		assert!(layer.hosts.is_none());
	}

	#[test]
	fn test_file_source_parses_toml() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[hosts.gitlab]\nfull_name_policy = \"strict\"").unwrap();

		let source = FileSource::custom(file.path().to_path_buf(), Precedence::UserFile, "test");
		let layer = source.load().unwrap();
		assert_eq!(
			layer
				.host(VcsHostType::Gitlab)
				.and_then(|h| h.full_name_policy.as_deref()),
			Some("strict")
		);
	}

	#[test]
	fn test_file_source_reports_parse_errors() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[hosts.gitlab\nfull_name_policy =").unwrap();

		let source = FileSource::custom(file.path().to_path_buf(), Precedence::UserFile, "test");
		let err = source.load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
		assert!(err.to_string().contains("TOML parse error"));
	}

	#[test]
	fn test_env_source_reads_policy() {
		let key = EnvSource::policy_var(VcsHostType::BitbucketCloud);
		std::env::set_var(&key, " nested ");

		let layer = EnvSource.load().unwrap();
		assert_eq!(
			layer
				.host(VcsHostType::BitbucketCloud)
				.and_then(|h| h.full_name_policy.as_deref()),
			Some("nested")
		);

		std::env::remove_var(&key);
	}

	#[test]
	fn test_env_source_skips_invalid_policy() {
		let key = EnvSource::policy_var(VcsHostType::BitbucketServer);
		std::env::set_var(&key, "loose");

		let layer = EnvSource.load().unwrap();
		assert!(layer.host(VcsHostType::BitbucketServer).is_none());

		std::env::remove_var(&key);
	}
}
