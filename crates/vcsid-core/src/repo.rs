// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument, trace};
use url::Url;
use zeroize::Zeroize;

use crate::clone_url::{
	check_clone_path, ensure_git_suffix, parse_clone_url, sanitize, with_basic_auth,
};
use crate::error::{RepoError, Result};
use crate::full_name::{validate_full_name, FullNamePolicy};
use crate::host::{VcsHost, VcsHostType};

/// Placeholder printed instead of the credentialed clone URL.
pub const REDACTED: &str = "[REDACTED]";

/// A validated repository on a VCS host.
///
/// Only constructed through [`Repo::new`] or [`Repo::with_policy`], so every
/// value satisfies:
///
/// - `full_name` is `owner/name` and neither part is empty
/// - the clone URLs end in `.git`
/// - `sanitized_clone_url` never carries credentials
///
/// The credentialed clone URL is kept out of `Debug` and `Serialize` output
/// and is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Repo {
	full_name: String,
	owner: String,
	name: String,
	#[serde(skip_serializing)]
	clone_url: String,
	sanitized_clone_url: Url,
	vcs_host: VcsHost,
}

impl Repo {
	/// Builds a repo using the host type's default [`FullNamePolicy`].
	pub fn new(
		host_type: VcsHostType,
		full_name: &str,
		clone_url: &str,
		username: &str,
		password: &str,
	) -> Result<Self> {
		Self::with_policy(
			host_type.default_full_name_policy(),
			host_type,
			full_name,
			clone_url,
			username,
			password,
		)
	}

	/// Builds a repo, validating `full_name` under `policy`.
	///
	/// Checks run in a fixed order and the first failure is returned. The
	/// clone URL path must be `/<full_name>.git` except on Bitbucket Server,
	/// whose clone URLs are assembled by the caller.
	#[instrument(
		level = "trace",
		skip_all,
		fields(host_type = %host_type, full_name = %full_name, policy = %policy)
	)]
	pub fn with_policy(
		policy: FullNamePolicy,
		host_type: VcsHostType,
		full_name: &str,
		clone_url: &str,
		username: &str,
		password: &str,
	) -> Result<Self> {
		let result = Self::build(policy, host_type, full_name, clone_url, username, password);
		if let Err(e) = &result {
			debug!(error = %e, "rejected repo");
		}
		result
	}

	fn build(
		policy: FullNamePolicy,
		host_type: VcsHostType,
		full_name: &str,
		clone_url: &str,
		username: &str,
		password: &str,
	) -> Result<Self> {
		if full_name.is_empty() {
			return Err(RepoError::EmptyFullName);
		}

		let mut url = parse_clone_url(clone_url)?;
		let (owner, name) = validate_full_name(full_name, policy)?;

		ensure_git_suffix(&mut url);

		if host_type.checks_clone_path() {
			check_clone_path(&url, full_name)?;
		}

		let sanitized = sanitize(&url);
		let authed = with_basic_auth(&url, username, password);
		let hostname = url.host_str().unwrap_or_default();

		trace!(
			sanitized_clone_url = %sanitized,
			hostname = %hostname,
			"validated repo"
		);

		Ok(Self {
			full_name: full_name.to_string(),
			owner: owner.to_string(),
			name: name.to_string(),
			clone_url: authed.to_string(),
			sanitized_clone_url: sanitized,
			vcs_host: VcsHost::new(hostname, host_type),
		})
	}

	/// Returns a copy of this repo whose clone URL carries new credentials.
	pub fn with_credentials(&self, username: &str, password: &str) -> Self {
		let mut rotated = self.clone();
		rotated.clone_url.zeroize();
		rotated.clone_url =
			with_basic_auth(&self.sanitized_clone_url, username, password).to_string();
		rotated
	}

	pub fn full_name(&self) -> &str {
		&self.full_name
	}

	pub fn owner(&self) -> &str {
		&self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Clone URL including basic-auth credentials. Never log this.
	pub fn clone_url(&self) -> &str {
		&self.clone_url
	}

	/// Clone URL without credentials, safe for logs and error messages.
	pub fn sanitized_clone_url(&self) -> &str {
		self.sanitized_clone_url.as_str()
	}

	pub fn vcs_host(&self) -> &VcsHost {
		&self.vcs_host
	}

	/// Identifier unique across hosts: `<hostname>/<full_name>`.
	pub fn id(&self) -> String {
		format!("{}/{}", self.vcs_host.hostname(), self.full_name)
	}
}

impl fmt::Debug for Repo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Repo")
			.field("full_name", &self.full_name)
			.field("owner", &self.owner)
			.field("name", &self.name)
			.field("clone_url", &REDACTED)
			.field("sanitized_clone_url", &self.sanitized_clone_url.as_str())
			.field("vcs_host", &self.vcs_host)
			.finish()
	}
}

impl Drop for Repo {
	fn drop(&mut self) {
		self.clone_url.zeroize();
	}
}
