//! oEmbed lookup URL builders.
//!
//! The content URL is appended to the query string unencoded; the provider
//! endpoints accept it that way.

use crate::RawLink;

/// `scheme + host` with both parts trimmed, e.g. `https://www.youtube.com`.
fn origin(link: &RawLink<'_>) -> String {
    format!("{}{}", link.scheme.trim(), link.host.trim())
}

pub(crate) fn youtube(link: &RawLink<'_>) -> String {
    format!(
        "http://www.youtube.com/oembed?url={}/watch?v={}&format=json",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn vimeo(link: &RawLink<'_>) -> String {
    format!(
        "http://vimeo.com/api/oembed.json?url={}/{}&maxwidth=480&maxheight=270",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn slideshare(link: &RawLink<'_>) -> String {
    format!(
        "http://www.slideshare.net/api/oembed/2?url={}/{}&format=json&maxwidth=480&maxheight=270",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn officemix(link: &RawLink<'_>) -> String {
    format!(
        "https://mix.office.com/oembed/?url={}/{}",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn issuu(link: &RawLink<'_>) -> String {
    format!(
        "http://issuu.com/oembed?url={}/{}&format=json",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn screenr(link: &RawLink<'_>) -> String {
    format!(
        "http://www.screenr.com/api/oembed.json?url={}/{}&maxwidth=480&maxheight=270",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn soundcloud(link: &RawLink<'_>) -> String {
    format!(
        "http://soundcloud.com/oembed?url={}/{}&format=json&maxwidth=480&maxheight=270",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn ted(link: &RawLink<'_>) -> String {
    format!(
        "http://www.ted.com/services/v1/oembed.json?url={}/talks/{}&maxwidth=480&maxheight=270",
        origin(link),
        link.id.trim()
    )
}

pub(crate) fn pollev(link: &RawLink<'_>) -> String {
    format!(
        "http://www.polleverywhere.com/services/oembed?url={}/{}/{}&format=json&maxwidth=480&maxheight=270",
        origin(link),
        link.kind.unwrap_or_default().trim(),
        link.id.trim()
    )
}
