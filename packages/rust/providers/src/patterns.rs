//! Anchor-matching regular expressions, one per provider.
//!
//! Every pattern has the same outer shape:
//! `<a … href="SCHEME HOST/PATH" ATTRS>TEXT</a>`, case-insensitive, with `.`
//! spanning newlines so attributes and link text may wrap. Only the
//! `HOST/PATH` portion differs between providers.

use std::sync::LazyLock;

use regex::Regex;

/// Wrap a provider's `host/path` grammar in the shared anchor shape.
fn anchor(href: &str) -> Regex {
    let pattern = format!(
        r#"(?is)<a\s[^>]*href="(?P<scheme>https?://(?P<www>www\.)?){href}"(?P<attrs>.*?)>(?P<text>.*?)</a>"#
    );
    Regex::new(&pattern).expect("provider regex")
}

/// Any slug after the host, up to the closing quote.
fn slug(host: &str) -> Regex {
    anchor(&format!(r"(?P<host>{host})/(?P<id>.*?)"))
}

pub(crate) static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    anchor(concat!(
        r"(?P<host>youtube\.com|youtu\.be|youtube\.googleapis\.com)/",
        r"(?:embed/|v/|watch\?v=|watch\?.+&amp;v=|watch\?.+&v=)?",
        r"(?P<id>[A-Za-z0-9_-]{11})(?P<trailing>.*?)",
    ))
});

pub(crate) static VIMEO: LazyLock<Regex> =
    LazyLock::new(|| anchor(r"(?P<host>vimeo\.com)/(?P<id>\d+)(?P<trailing>.*?)"));

pub(crate) static SLIDESHARE: LazyLock<Regex> = LazyLock::new(|| slug(r"slideshare\.net"));

pub(crate) static OFFICEMIX: LazyLock<Regex> = LazyLock::new(|| slug(r"mix\.office\.com"));

pub(crate) static ISSUU: LazyLock<Regex> = LazyLock::new(|| slug(r"issuu\.com"));

pub(crate) static SCREENR: LazyLock<Regex> = LazyLock::new(|| slug(r"screenr\.com"));

pub(crate) static SOUNDCLOUD: LazyLock<Regex> = LazyLock::new(|| slug(r"soundcloud\.com"));

pub(crate) static TED: LazyLock<Regex> =
    LazyLock::new(|| anchor(r"(?P<host>ted\.com)/talks/(?P<id>.*?)"));

pub(crate) static POLLEV: LazyLock<Regex> = LazyLock::new(|| {
    anchor(concat!(
        r"(?P<host>polleverywhere\.com)/",
        r"(?P<kind>polls|multiple_choice_polls|free_text_polls)/(?P<id>.*?)",
    ))
});
