// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Splitting and validating `owner/repo` full names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RepoError, Result, UnknownPolicy};

/// How a full name's owner part is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FullNamePolicy {
	/// Exactly `owner/repo`; the owner may not contain `/`.
	Strict,
	/// `group/subgroup/.../repo`; everything before the last `/` is the owner.
	Nested,
}

impl FullNamePolicy {
	pub fn as_str(&self) -> &'static str {
		match self {
			FullNamePolicy::Strict => "strict",
			FullNamePolicy::Nested => "nested",
		}
	}
}

impl fmt::Display for FullNamePolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for FullNamePolicy {
	type Err = UnknownPolicy;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"strict" => Ok(FullNamePolicy::Strict),
			"nested" => Ok(FullNamePolicy::Nested),
			_ => Err(UnknownPolicy(s.to_string())),
		}
	}
}

/// Splits a full name on its last `/`.
///
/// A name without `/` is all repo and no owner. Leading or trailing slashes
/// yield empty parts; callers decide whether that is an error.
pub fn split_repo_full_name(full_name: &str) -> (&str, &str) {
	match full_name.rfind('/') {
		Some(idx) => (&full_name[..idx], &full_name[idx + 1..]),
		None => ("", full_name),
	}
}

/// Validates `full_name` under `policy`, returning its owner and repo.
pub fn validate_full_name(full_name: &str, policy: FullNamePolicy) -> Result<(&str, &str)> {
	if full_name.is_empty() {
		return Err(RepoError::EmptyFullName);
	}

	let (owner, repo) = split_repo_full_name(full_name);

	if policy == FullNamePolicy::Strict && owner.contains('/') {
		return Err(RepoError::NestedOwner {
			full_name: full_name.to_string(),
			owner: owner.to_string(),
		});
	}

	if owner.is_empty() || repo.is_empty() {
		return Err(RepoError::EmptyOwnerOrRepo {
			full_name: full_name.to_string(),
			owner: owner.to_string(),
			repo: repo.to_string(),
		});
	}

	Ok((owner, repo))
}
