// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for vcsid repository validation.
//!
//! Selects which [`FullNamePolicy`] applies to each host type. Sources are
//! merged in precedence order:
//!
//! 1. Built-in defaults (`nested` for GitLab, `strict` elsewhere)
//! 2. `/etc/vcsid/config.toml`
//! 3. `~/.config/vcsid/config.toml`
//! 4. `VCSID_<HOST>_FULL_NAME_POLICY` environment variables
//!
//! ```toml
//! [hosts.gitlab]
//! full_name_policy = "strict"
//! ```

pub mod error;
pub mod layer;
pub mod sources;

use std::collections::HashMap;

use tracing::{debug, info, warn};
use vcsid_core::{FullNamePolicy, Repo, VcsHostType};

pub use error::ConfigError;
pub use layer::{ConfigLayer, HostLayer, HostsLayer};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, FileSource, Precedence, ENV_PREFIX};

/// Resolved validation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsConfig {
	policies: HashMap<VcsHostType, FullNamePolicy>,
}

impl Default for VcsConfig {
	fn default() -> Self {
		Self {
			policies: VcsHostType::ALL
				.into_iter()
				.map(|host_type| (host_type, host_type.default_full_name_policy()))
				.collect(),
		}
	}
}

impl VcsConfig {
	/// Load from defaults, the system and user config files, and the
	/// environment.
	pub fn load() -> Result<Self, ConfigError> {
		let mut sources: Vec<Box<dyn ConfigSource>> =
			vec![Box::new(DefaultsSource), Box::new(FileSource::system())];
		match FileSource::user() {
			Ok(user) => sources.push(Box::new(user)),
			Err(e) => debug!(error = %e, "skipping user config file"),
		}
		sources.push(Box::new(EnvSource));

		Self::load_from(sources)
	}

	/// Load from the given sources.
	///
	/// Sources are sorted by precedence (lowest first) and merged so higher
	/// precedence sources override lower ones. A source that fails to load is
	/// skipped.
	pub fn load_from(sources: Vec<Box<dyn ConfigSource>>) -> Result<Self, ConfigError> {
		let mut sorted_sources = sources;
		sorted_sources.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		for source in &sorted_sources {
			match source.load() {
				Ok(layer) => {
					debug!(source = source.name(), "merging config layer");
					merged.merge(layer);
				}
				Err(e) => {
					warn!(source = source.name(), error = %e, "failed to load config source, skipping");
				}
			}
		}

		let config = Self::from_layer(merged)?;

		info!(
			github = %config.policy_for(VcsHostType::Github),
			gitlab = %config.policy_for(VcsHostType::Gitlab),
			bitbucket_cloud = %config.policy_for(VcsHostType::BitbucketCloud),
			bitbucket_server = %config.policy_for(VcsHostType::BitbucketServer),
			"full name policies loaded"
		);

		Ok(config)
	}

	/// Build the runtime config from a merged layer, filling unset hosts with
	/// their defaults.
	pub fn from_layer(layer: ConfigLayer) -> Result<Self, ConfigError> {
		let mut config = Self::default();

		for host_type in VcsHostType::ALL {
			let Some(raw) = layer
				.host(host_type)
				.and_then(|h| h.full_name_policy.as_deref())
			else {
				continue;
			};

			let policy = raw.parse::<FullNamePolicy>().map_err(|e| {
				ConfigError::invalid_value(
					format!("hosts.{}.full_name_policy", host_type.config_key()),
					e.to_string(),
				)
			})?;
			config.policies.insert(host_type, policy);
		}

		Ok(config)
	}

	/// Override the policy for one host type.
	pub fn with_policy(mut self, host_type: VcsHostType, policy: FullNamePolicy) -> Self {
		self.policies.insert(host_type, policy);
		self
	}

	pub fn policy_for(&self, host_type: VcsHostType) -> FullNamePolicy {
		self.policies
			.get(&host_type)
			.copied()
			.unwrap_or_else(|| host_type.default_full_name_policy())
	}

	/// Build a [`Repo`] using the configured policy for `host_type`.
	pub fn new_repo(
		&self,
		host_type: VcsHostType,
		full_name: &str,
		clone_url: &str,
		username: &str,
		password: &str,
	) -> vcsid_core::Result<Repo> {
		Repo::with_policy(
			self.policy_for(host_type),
			host_type,
			full_name,
			clone_url,
			username,
			password,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn file_source(contents: &str, precedence: Precedence) -> (NamedTempFile, Box<dyn ConfigSource>) {
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "{contents}").unwrap();
		let source = FileSource::custom(file.path().to_path_buf(), precedence, "test-file");
		(file, Box::new(source))
	}

	#[test]
	fn test_defaults() {
		let config = VcsConfig::default();
		assert_eq!(config.policy_for(VcsHostType::Gitlab), FullNamePolicy::Nested);
		assert_eq!(config.policy_for(VcsHostType::Github), FullNamePolicy::Strict);
		assert_eq!(
			config.policy_for(VcsHostType::BitbucketCloud),
			FullNamePolicy::Strict
		);
		assert_eq!(
			config.policy_for(VcsHostType::BitbucketServer),
			FullNamePolicy::Strict
		);
	}

	#[test]
	fn test_from_layer_overrides_one_host() {
		let layer: ConfigLayer =
			toml::from_str("[hosts.github]\nfull_name_policy = \"nested\"\n").unwrap();
		let config = VcsConfig::from_layer(layer).unwrap();
		assert_eq!(config.policy_for(VcsHostType::Github), FullNamePolicy::Nested);
		assert_eq!(config.policy_for(VcsHostType::Gitlab), FullNamePolicy::Nested);
		assert_eq!(
			config.policy_for(VcsHostType::BitbucketCloud),
			FullNamePolicy::Strict
		);
	}

	#[test]
	fn test_from_layer_rejects_unknown_policy() {
		let layer: ConfigLayer =
			toml::from_str("[hosts.bitbucket-cloud]\nfull_name_policy = \"loose\"\n").unwrap();
		let err = VcsConfig::from_layer(layer).unwrap_err();
		match err {
			ConfigError::InvalidValue { field, message } => {
				assert_eq!(field, "hosts.bitbucket-cloud.full_name_policy");
				assert!(message.contains("loose"));
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn test_load_from_respects_precedence() {
		let (_user_file, user) = file_source(
			"[hosts.gitlab]\nfull_name_policy = \"nested\"\n",
			Precedence::UserFile,
		);
		let (_system_file, system) = file_source(
			"[hosts.gitlab]\nfull_name_policy = \"strict\"\n",
			Precedence::SystemFile,
		);

		// Registration order does not matter, precedence does.
		let config = VcsConfig::load_from(vec![user, system, Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config.policy_for(VcsHostType::Gitlab), FullNamePolicy::Nested);
	}

	#[test]
	fn test_load_from_skips_broken_source() {
		let (_broken, broken) = file_source("[hosts.github\n", Precedence::UserFile);
		let config = VcsConfig::load_from(vec![broken, Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config, VcsConfig::default());
	}

	#[test]
	fn test_env_overrides_file() {
		let key = EnvSource::policy_var(VcsHostType::Github);
		std::env::set_var(&key, "nested");

		let (_file, file) = file_source(
			"[hosts.github]\nfull_name_policy = \"strict\"\n",
			Precedence::UserFile,
		);
		let config = VcsConfig::load_from(vec![file, Box::new(EnvSource)]).unwrap();
		assert_eq!(config.policy_for(VcsHostType::Github), FullNamePolicy::Nested);

		std::env::remove_var(&key);
	}

	#[test]
	fn test_invalid_env_value_falls_back_to_lower_layers() {
		let key = EnvSource::policy_var(VcsHostType::Gitlab);
		std::env::set_var(&key, "loose");

		let (_file, file) = file_source(
			"[hosts.gitlab]\nfull_name_policy = \"strict\"\n",
			Precedence::UserFile,
		);
		let config =
			VcsConfig::load_from(vec![file, Box::new(DefaultsSource), Box::new(EnvSource)])
				.unwrap();
		assert_eq!(config.policy_for(VcsHostType::Gitlab), FullNamePolicy::Strict);

		std::env::remove_var(&key);
	}

	#[test]
	fn test_new_repo_uses_configured_policy() {
		let strict_gitlab = VcsConfig::default().with_policy(VcsHostType::Gitlab, FullNamePolicy::Strict);
		let err = strict_gitlab
			.new_repo(
				VcsHostType::Gitlab,
				"group/subgroup/repo",
				"https://gitlab.com/group/subgroup/repo.git",
				"u",
				"p",
			)
			.unwrap_err();
		assert_eq!(
			err.to_string(),
			r#"invalid repo format "group/subgroup/repo", owner "group/subgroup" should not contain any /'s"#
		);

		let repo = VcsConfig::default()
			.new_repo(
				VcsHostType::Gitlab,
				"group/subgroup/repo",
				"https://gitlab.com/group/subgroup/repo.git",
				"u",
				"p",
			)
			.unwrap();
		assert_eq!(repo.owner(), "group/subgroup");
	}
}

#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	fn policy_strategy() -> impl Strategy<Value = FullNamePolicy> {
		prop_oneof![Just(FullNamePolicy::Strict), Just(FullNamePolicy::Nested)]
	}

	proptest! {
		/// Whatever each host is set to in a layer is what the runtime config reports.
		#[test]
		fn prop_layer_policies_round_trip(
			policies in proptest::collection::vec(policy_strategy(), 4)
		) {
			let mut layer = ConfigLayer::default();
			for (host_type, policy) in VcsHostType::ALL.into_iter().zip(&policies) {
				layer.host_mut(host_type).full_name_policy = Some(policy.to_string());
			}

			let config = VcsConfig::from_layer(layer).unwrap();
			for (host_type, policy) in VcsHostType::ALL.into_iter().zip(policies) {
				prop_assert_eq!(config.policy_for(host_type), policy);
			}
		}
	}
}
