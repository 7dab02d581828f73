//! The fixed table of supported oEmbed providers.
//!
//! Each [`ProviderSpec`] pairs an anchor-matching regular expression with a
//! builder that turns the captured URL pieces into the provider's oEmbed
//! lookup URL. The table is static and iterated in declared order; the
//! filter applies providers one after another over the accumulated content.

mod lookup;
mod officemix;
mod patterns;

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use linkembed_shared::{EmbedStyle, ProviderId};

// ---------------------------------------------------------------------------
// Matched links
// ---------------------------------------------------------------------------

/// The pieces of one matched `<a>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink<'a> {
    /// The whole anchor element, from `<a` to `</a>`.
    pub anchor: &'a str,
    /// Protocol plus optional `www.` prefix, e.g. `https://www.`.
    pub scheme: &'a str,
    /// Matched host, e.g. `youtu.be`.
    pub host: &'a str,
    /// Leading path segment for providers that capture one (PollEverywhere poll type).
    pub kind: Option<&'a str>,
    /// The identifying path: a video id or a slug.
    pub id: &'a str,
    /// Anything after the id inside the href (YouTube and Vimeo only).
    pub trailing: &'a str,
    /// Attributes after the href.
    pub attrs: &'a str,
    /// Inner markup of the anchor.
    pub text: &'a str,
}

impl<'a> RawLink<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        let get = |name: &str| caps.name(name).map_or("", |m| m.as_str());
        Self {
            anchor: caps.get(0).map_or("", |m| m.as_str()),
            scheme: get("scheme"),
            host: get("host"),
            kind: caps.name("kind").map(|m| m.as_str()),
            id: get("id"),
            trailing: get("trailing"),
            attrs: get("attrs"),
            text: get("text"),
        }
    }
}

/// A matched link and its byte range in the scanned content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub range: Range<usize>,
    pub link: RawLink<'a>,
}

// ---------------------------------------------------------------------------
// ProviderSpec
// ---------------------------------------------------------------------------

/// Immutable descriptor for one supported provider.
pub struct ProviderSpec {
    /// Provider key; also the name of its enable flag.
    pub id: ProviderId,
    /// Presentation of resolved embeds and wording of the failure fragment.
    pub style: EmbedStyle,
    pattern: &'static LazyLock<Regex>,
    lookup: fn(&RawLink<'_>) -> String,
    fixup: Option<fn(String) -> String>,
}

impl ProviderSpec {
    /// The provider's configuration key.
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// All non-overlapping anchor matches in `content`, left to right.
    pub fn find_links<'a>(&self, content: &'a str) -> Vec<LinkMatch<'a>> {
        let links: Vec<LinkMatch<'a>> = self
            .pattern
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(LinkMatch {
                    range: whole.range(),
                    link: RawLink::from_captures(&caps),
                })
            })
            .collect();
        trace!(provider = %self.id, matches = links.len(), "scanned content");
        links
    }

    #[cfg(test)]
    fn is_match(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }

    /// Build the oEmbed lookup URL for a matched link.
    pub fn lookup_url(&self, link: &RawLink<'_>) -> String {
        (self.lookup)(link)
    }

    /// Apply provider-specific corrections to a resolved fragment.
    pub fn post_process(&self, html: String) -> String {
        match self.fixup {
            Some(fixup) => fixup(html),
            None => html,
        }
    }
}

impl std::fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("id", &self.id)
            .field("style", &self.style)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

static PROVIDERS: [ProviderSpec; 9] = [
    ProviderSpec {
        id: ProviderId::YouTube,
        style: EmbedStyle::Video,
        pattern: &patterns::YOUTUBE,
        lookup: lookup::youtube,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::Vimeo,
        style: EmbedStyle::Video,
        pattern: &patterns::VIMEO,
        lookup: lookup::vimeo,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::Slideshare,
        style: EmbedStyle::Iframe,
        pattern: &patterns::SLIDESHARE,
        lookup: lookup::slideshare,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::OfficeMix,
        style: EmbedStyle::Video,
        pattern: &patterns::OFFICEMIX,
        lookup: lookup::officemix,
        fixup: Some(officemix::upsize),
    },
    ProviderSpec {
        id: ProviderId::Issuu,
        style: EmbedStyle::Iframe,
        pattern: &patterns::ISSUU,
        lookup: lookup::issuu,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::Screenr,
        style: EmbedStyle::Video,
        pattern: &patterns::SCREENR,
        lookup: lookup::screenr,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::Soundcloud,
        style: EmbedStyle::Video,
        pattern: &patterns::SOUNDCLOUD,
        lookup: lookup::soundcloud,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::Ted,
        style: EmbedStyle::Video,
        pattern: &patterns::TED,
        lookup: lookup::ted,
        fixup: None,
    },
    ProviderSpec {
        id: ProviderId::PollEv,
        style: EmbedStyle::Iframe,
        pattern: &patterns::POLLEV,
        lookup: lookup::pollev,
        fixup: None,
    },
];

/// Every provider, in the order they are applied to content.
pub fn providers() -> &'static [ProviderSpec] {
    &PROVIDERS
}

/// Look up a provider's descriptor.
pub fn provider(id: ProviderId) -> &'static ProviderSpec {
    PROVIDERS
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| unreachable!("every ProviderId has a table entry"))
}
