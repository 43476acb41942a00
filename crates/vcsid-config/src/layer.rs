// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;
use vcsid_core::VcsHostType;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub hosts: Option<HostsLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostsLayer {
	#[serde(default)]
	pub github: Option<HostLayer>,
	#[serde(default)]
	pub gitlab: Option<HostLayer>,
	#[serde(default)]
	pub bitbucket_cloud: Option<HostLayer>,
	#[serde(default)]
	pub bitbucket_server: Option<HostLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostLayer {
	/// `"strict"` or `"nested"`; parsed when the runtime config is built.
	#[serde(default)]
	pub full_name_policy: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer into this one (other takes precedence).
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.hosts, other.hosts, HostsLayer::merge);
	}

	/// The section for `host_type`, if any source set it.
	pub fn host(&self, host_type: VcsHostType) -> Option<&HostLayer> {
		self.hosts.as_ref().and_then(|hosts| hosts.get(host_type))
	}

	/// The section for `host_type`, created empty if missing.
	pub fn host_mut(&mut self, host_type: VcsHostType) -> &mut HostLayer {
		self.hosts
			.get_or_insert_with(HostsLayer::default)
			.slot(host_type)
			.get_or_insert_with(HostLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

impl HostsLayer {
	fn get(&self, host_type: VcsHostType) -> Option<&HostLayer> {
		match host_type {
			VcsHostType::Github => self.github.as_ref(),
			VcsHostType::Gitlab => self.gitlab.as_ref(),
			VcsHostType::BitbucketCloud => self.bitbucket_cloud.as_ref(),
			VcsHostType::BitbucketServer => self.bitbucket_server.as_ref(),
		}
	}

	fn slot(&mut self, host_type: VcsHostType) -> &mut Option<HostLayer> {
		match host_type {
			VcsHostType::Github => &mut self.github,
			VcsHostType::Gitlab => &mut self.gitlab,
			VcsHostType::BitbucketCloud => &mut self.bitbucket_cloud,
			VcsHostType::BitbucketServer => &mut self.bitbucket_server,
		}
	}

	fn merge(&mut self, other: HostsLayer) {
		merge_option(&mut self.github, other.github, HostLayer::merge);
		merge_option(&mut self.gitlab, other.gitlab, HostLayer::merge);
		merge_option(
			&mut self.bitbucket_cloud,
			other.bitbucket_cloud,
			HostLayer::merge,
		);
		merge_option(
			&mut self.bitbucket_server,
			other.bitbucket_server,
			HostLayer::merge,
		);
	}
}

impl HostLayer {
	fn merge(&mut self, other: HostLayer) {
		if other.full_name_policy.is_some() {
			self.full_name_policy = other.full_name_policy;
		}
	}
}
