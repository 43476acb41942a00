// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnknownHostType;
use crate::full_name::FullNamePolicy;

/// A supported repository hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VcsHostType {
	Github,
	Gitlab,
	BitbucketCloud,
	BitbucketServer,
}

impl VcsHostType {
	pub const ALL: [VcsHostType; 4] = [
		VcsHostType::Github,
		VcsHostType::Gitlab,
		VcsHostType::BitbucketCloud,
		VcsHostType::BitbucketServer,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			VcsHostType::Github => "Github",
			VcsHostType::Gitlab => "Gitlab",
			VcsHostType::BitbucketCloud => "BitbucketCloud",
			VcsHostType::BitbucketServer => "BitbucketServer",
		}
	}

	/// Spelling used in config files and environment variable names.
	pub fn config_key(&self) -> &'static str {
		match self {
			VcsHostType::Github => "github",
			VcsHostType::Gitlab => "gitlab",
			VcsHostType::BitbucketCloud => "bitbucket-cloud",
			VcsHostType::BitbucketServer => "bitbucket-server",
		}
	}

	/// GitLab models groups and subgroups, so only it accepts nested owners
	/// out of the box.
	pub fn default_full_name_policy(&self) -> FullNamePolicy {
		match self {
			VcsHostType::Gitlab => FullNamePolicy::Nested,
			VcsHostType::Github | VcsHostType::BitbucketCloud | VcsHostType::BitbucketServer => {
				FullNamePolicy::Strict
			}
		}
	}

	/// Bitbucket Server clone URLs are templated server-side (`/scm/<project>/...`)
	/// and never mirror the full name.
	pub fn checks_clone_path(&self) -> bool {
		!matches!(self, VcsHostType::BitbucketServer)
	}
}

impl fmt::Display for VcsHostType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for VcsHostType {
	type Err = UnknownHostType;

	/// Accepts the display name, the config key, or the config key with `_`
	/// in place of `-`, ignoring ASCII case.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		VcsHostType::ALL
			.into_iter()
			.find(|host_type| {
				trimmed.eq_ignore_ascii_case(host_type.as_str())
					|| trimmed.eq_ignore_ascii_case(host_type.config_key())
					|| trimmed.eq_ignore_ascii_case(&host_type.config_key().replace('-', "_"))
			})
			.ok_or_else(|| UnknownHostType(s.to_string()))
	}
}

/// A hosting provider instance, identified by the hostname of a clone URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VcsHost {
	hostname: String,
	#[serde(rename = "type")]
	host_type: VcsHostType,
}

impl VcsHost {
	pub(crate) fn new(hostname: impl Into<String>, host_type: VcsHostType) -> Self {
		Self {
			hostname: hostname.into(),
			host_type,
		}
	}

	pub fn hostname(&self) -> &str {
		&self.hostname
	}

	pub fn host_type(&self) -> VcsHostType {
		self.host_type
	}
}
