// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Clone URL parsing, credential injection and sanitization.
//!
//! URLs are handled as [`Url`] values throughout so userinfo is encoded by the
//! parser rather than spliced into strings.

use url::Url;

use crate::error::{RepoError, Result};

const GIT_SUFFIX: &str = ".git";

/// Parses a clone URL, rejecting empty input.
pub fn parse_clone_url(raw: &str) -> Result<Url> {
	if raw.is_empty() {
		return Err(RepoError::EmptyCloneUrl);
	}

	Url::parse(&escape_backslashes(raw)).map_err(|source| RepoError::InvalidCloneUrl {
		url: raw.to_string(),
		source,
	})
}

/// `\` is a path separator in special-scheme URLs; keep it a literal byte.
fn escape_backslashes(raw: &str) -> String {
	raw.replace('\\', "%5C")
}

/// Segments the URL parser would resolve away, including encoded dots.
fn is_dot_segment(segment: &str) -> bool {
	matches!(
		segment.to_ascii_lowercase().as_str(),
		"." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
	)
}

/// Appends `.git` to the URL path unless it already ends with it.
pub fn ensure_git_suffix(url: &mut Url) {
	if !url.path().ends_with(GIT_SUFFIX) {
		let path = format!("{}{GIT_SUFFIX}", url.path());
		url.set_path(&path);
	}
}

/// The path a clone URL for `full_name` is expected to have.
pub fn expected_clone_path(full_name: &str) -> String {
	format!("/{full_name}{GIT_SUFFIX}")
}

/// Checks that `url` points at `/<full_name>.git`.
///
/// Both sides are compared in the URL's percent-encoded form, so a full name
/// with characters that need escaping still matches its own clone URL. A
/// full name with `.` or `..` segments never matches: the parsed clone URL
/// has none left to compare against.
pub fn check_clone_path(url: &Url, full_name: &str) -> Result<()> {
	let expected = expected_clone_path(full_name);
	let mismatch = || RepoError::ClonePathMismatch {
		expected: expected.clone(),
		actual: url.path().to_string(),
	};

	if full_name.split('/').any(is_dot_segment) {
		return Err(mismatch());
	}

	let mut expected_url = url.clone();
	expected_url.set_path(&escape_backslashes(&expected));

	if expected_url.path() != url.path() {
		return Err(mismatch());
	}

	Ok(())
}

/// Returns `url` without any username or password.
pub fn sanitize(url: &Url) -> Url {
	let mut clean = url.clone();
	if clean.has_host() {
		// Both setters only fail for URLs that cannot carry userinfo at all.
		let _ = clean.set_username("");
		let _ = clean.set_password(None);
	}
	clean
}

/// Returns `url` with `username:password@` placed before the host.
///
/// Only `http` and `https` URLs receive credentials, and only when at least
/// one of `username` or `password` is non-empty. Anything else comes back
/// sanitized.
pub fn with_basic_auth(url: &Url, username: &str, password: &str) -> Url {
	let clean = sanitize(url);

	if !matches!(clean.scheme(), "http" | "https") || (username.is_empty() && password.is_empty())
	{
		return clean;
	}

	let mut authed = clean.clone();
	if authed.set_username(username).is_err() || authed.set_password(Some(password)).is_err() {
		return clean;
	}
	authed
}
