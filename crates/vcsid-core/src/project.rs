// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path used for the repository root.
pub const ROOT_PATH: &str = ".";

/// A directory inside a repository that is planned and applied on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
	repo_full_name: String,
	path: String,
}

impl Project {
	/// Creates a project, normalizing `path` to a clean relative path.
	///
	/// The repository root is always `"."`.
	pub fn new(repo_full_name: impl Into<String>, path: &str) -> Self {
		Self {
			repo_full_name: repo_full_name.into(),
			path: clean_relative_path(path),
		}
	}

	pub fn repo_full_name(&self) -> &str {
		&self.repo_full_name
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn is_repo_root(&self) -> bool {
		self.path == ROOT_PATH
	}
}

impl fmt::Display for Project {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "repofullname={} path={}", self.repo_full_name, self.path)
	}
}

/// Lexically cleans a `/`-separated path and makes it relative.
///
/// `..` pops the previous segment. Above the root of an absolute path it is
/// dropped; at the start of a relative path it is kept.
fn clean_relative_path(raw: &str) -> String {
	let rooted = raw.starts_with('/');
	let mut segments: Vec<&str> = Vec::new();

	for segment in raw.split('/') {
		match segment {
			"" | "." => {}
			".." => match segments.last() {
				Some(&last) if last != ".." => {
					segments.pop();
				}
				_ if rooted => {}
				_ => segments.push(".."),
			},
			other => segments.push(other),
		}
	}

	if segments.is_empty() {
		ROOT_PATH.to_string()
	} else {
		segments.join("/")
	}
}
