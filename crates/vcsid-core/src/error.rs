// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepoError>;

/// Errors returned while building a [`crate::Repo`].
///
/// The rendered messages are shown to users verbatim, so their wording is
/// stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
	#[error("repoFullName can't be empty")]
	EmptyFullName,

	#[error("cloneURL can't be empty")]
	EmptyCloneUrl,

	#[error("invalid clone url: parse {url:?}: {source}")]
	InvalidCloneUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("invalid repo format {full_name:?}, owner {owner:?} should not contain any /'s")]
	NestedOwner { full_name: String, owner: String },

	#[error("invalid repo format {full_name:?}, owner {owner:?} or repo {repo:?} was empty")]
	EmptyOwnerOrRepo {
		full_name: String,
		owner: String,
		repo: String,
	},

	#[error("expected clone url to have path {expected:?} but had {actual:?}")]
	ClonePathMismatch { expected: String, actual: String },
}

impl RepoError {
	/// True when the full name could not be decomposed into owner and repo.
	pub fn is_format_error(&self) -> bool {
		matches!(
			self,
			RepoError::NestedOwner { .. } | RepoError::EmptyOwnerOrRepo { .. }
		)
	}
}

/// Returned when a string does not name a supported host type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown vcs host type {0:?}")]
pub struct UnknownHostType(pub String);

/// Returned when a string does not name a full-name policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown full name policy {0:?}, expected \"strict\" or \"nested\"")]
pub struct UnknownPolicy(pub String);
