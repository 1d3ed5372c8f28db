//! Address building and resolution
//!
//! Channel pages live under either `/user/<id>` or `/channel/<id>`. The
//! [`RunContext`] records which one the channel resolved under and builds
//! every derived address from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path scheme a channel is addressed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressScheme {
    /// `<base>/user/<id>/...`
    User,
    /// `<base>/channel/<id>/...`
    Channel,
}

impl AddressScheme {
    /// Path segment naming the scheme
    pub fn segment(self) -> &'static str {
        match self {
            AddressScheme::User => "user",
            AddressScheme::Channel => "channel",
        }
    }
}

impl fmt::Display for AddressScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Turns site-root-relative links into absolute addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressResolver {
    base: String,
}

impl AddressResolver {
    /// Create a resolver for `base`; a trailing `/` is dropped
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Site base address without a trailing `/`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Prefix `candidate` with the base if it starts with `/`
    pub fn resolve(&self, candidate: &str) -> String {
        if candidate.starts_with('/') {
            format!("{}{}", self.base, candidate)
        } else {
            candidate.to_string()
        }
    }
}

/// Per-run state threaded through every crawl step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    resolver: AddressResolver,
    channel_id: String,
    scheme: AddressScheme,
}

impl RunContext {
    pub fn new(base: &str, channel_id: impl Into<String>, scheme: AddressScheme) -> Self {
        Self {
            resolver: AddressResolver::new(base),
            channel_id: channel_id.into(),
            scheme,
        }
    }

    /// The same run under a different scheme
    pub fn with_scheme(&self, scheme: AddressScheme) -> Self {
        Self {
            scheme,
            ..self.clone()
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn scheme(&self) -> AddressScheme {
        self.scheme
    }

    /// Shorthand for [`AddressResolver::resolve`]
    pub fn resolve(&self, candidate: &str) -> String {
        self.resolver.resolve(candidate)
    }

    /// `<base>/<scheme>/<id>/<page>`
    pub fn channel_page(&self, page: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.resolver.base(),
            self.scheme.segment(),
            self.channel_id,
            page
        )
    }

    /// The channel's aggregate playlist listing
    pub fn playlists_address(&self) -> String {
        self.channel_page("playlists")
    }

    /// The channel's aggregate video listing
    pub fn videos_address(&self) -> String {
        self.channel_page("videos")
    }
}
