// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Canonical repository and project identifiers for VCS hosts.
//!
//! Callers hand over strings already fetched from a VCS provider (host type,
//! full name, clone URL, basic-auth credentials) and get back an immutable
//! [`Repo`] or a [`RepoError`] whose message can be shown to users as-is.
//!
//! ```
//! use vcsid_core::{Repo, VcsHostType};
//!
//! let repo = Repo::new(
//! 	VcsHostType::BitbucketCloud,
//! 	"owner/repo",
//! 	"https://bitbucket.org/owner/repo",
//! 	"u",
//! 	"p",
//! )?;
//! assert_eq!(repo.clone_url(), "https://u:p@bitbucket.org/owner/repo.git");
//! assert_eq!(repo.sanitized_clone_url(), "https://bitbucket.org/owner/repo.git");
//! # Ok::<(), vcsid_core::RepoError>(())
//! ```

pub mod clone_url;
pub mod error;
pub mod full_name;
pub mod host;
pub mod project;
pub mod repo;

pub use error::{RepoError, Result, UnknownHostType, UnknownPolicy};
pub use full_name::{split_repo_full_name, validate_full_name, FullNamePolicy};
pub use host::{VcsHost, VcsHostType};
pub use project::{Project, ROOT_PATH};
pub use repo::{Repo, REDACTED};
