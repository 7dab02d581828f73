//! Core domain types shared across the filter pipeline.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::LinkEmbedError;

// ---------------------------------------------------------------------------
// ProviderId
// ---------------------------------------------------------------------------

/// A supported media-sharing provider.
///
/// Variant order is the order providers are applied to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProviderId {
    YouTube,
    Vimeo,
    Slideshare,
    OfficeMix,
    Issuu,
    Screenr,
    Soundcloud,
    Ted,
    PollEv,
}

impl ProviderId {
    /// Every provider, in application order.
    pub const ALL: [ProviderId; 9] = [
        ProviderId::YouTube,
        ProviderId::Vimeo,
        ProviderId::Slideshare,
        ProviderId::OfficeMix,
        ProviderId::Issuu,
        ProviderId::Screenr,
        ProviderId::Soundcloud,
        ProviderId::Ted,
        ProviderId::PollEv,
    ];

    /// Configuration key for this provider's enable flag.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::YouTube => "youtube",
            ProviderId::Vimeo => "vimeo",
            ProviderId::Slideshare => "slideshare",
            ProviderId::OfficeMix => "officemix",
            ProviderId::Issuu => "issuu",
            ProviderId::Screenr => "screenr",
            ProviderId::Soundcloud => "soundcloud",
            ProviderId::Ted => "ted",
            ProviderId::PollEv => "pollev",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = LinkEmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ProviderId::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| LinkEmbedError::validation(format!("unknown provider '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// EmbedStyle
// ---------------------------------------------------------------------------

/// How a provider's resolved embed is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStyle {
    /// Player embeds: eligible for the lazy-load placeholder.
    Video,
    /// Document/poll embeds: always emitted as the raw fragment.
    Iframe,
}

impl EmbedStyle {
    /// The word used in this style's user-visible error fragment.
    pub fn noun(self) -> &'static str {
        match self {
            EmbedStyle::Video => "video",
            EmbedStyle::Iframe => "iframe",
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedEmbed
// ---------------------------------------------------------------------------

/// The useful part of an oEmbed response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolvedEmbed {
    /// Embeddable markup, normally a single `<iframe>`.
    pub html: String,
    /// Preview image, used by the lazy placeholder.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Media title, used as the lazy placeholder caption.
    #[serde(default)]
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// FilterConfig
// ---------------------------------------------------------------------------

/// Snapshot of the settings one filter invocation runs with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Providers whose links are rewritten.
    pub enabled: BTreeSet<ProviderId>,
    /// Emit click-to-load placeholders instead of raw embeds.
    pub lazyload: bool,
}

impl FilterConfig {
    /// Every provider enabled.
    pub fn all_enabled(lazyload: bool) -> Self {
        Self {
            enabled: ProviderId::ALL.into_iter().collect(),
            lazyload,
        }
    }

    /// Only the given providers enabled.
    pub fn with_providers(providers: impl IntoIterator<Item = ProviderId>, lazyload: bool) -> Self {
        Self {
            enabled: providers.into_iter().collect(),
            lazyload,
        }
    }

    pub fn is_enabled(&self, provider: ProviderId) -> bool {
        self.enabled.contains(&provider)
    }
}
