//! Click-to-load placeholder markup.

use html_escape::{encode_quoted_attribute, encode_text};
use scraper::{Html, Selector};
use tracing::debug;

use linkembed_shared::ResolvedEmbed;

/// Declared size of an embed's iframe. Missing attributes are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub height: String,
    pub width: String,
}

/// Read `height`/`width` from the first `<iframe>` in a fragment.
///
/// The fragment is parsed leniently; malformed markup, a missing iframe or
/// missing attributes all yield empty values.
pub fn iframe_dimensions(fragment: &str) -> Dimensions {
    let Ok(iframe_sel) = Selector::parse("iframe") else {
        return Dimensions::default();
    };

    let doc = Html::parse_fragment(fragment);
    let Some(iframe) = doc.select(&iframe_sel).next() else {
        debug!("no iframe in embed fragment");
        return Dimensions::default();
    };

    let attr = |name: &str| iframe.value().attr(name).unwrap_or_default().to_string();
    Dimensions {
        height: attr("height"),
        width: attr("width"),
    }
}

/// Build the inert placeholder anchor for a resolved video embed.
///
/// The original fragment travels escaped in `data-embed`; the activation
/// script swaps it in on click, sized from `data-height`/`data-width`.
pub fn lazy_placeholder(embed: &ResolvedEmbed) -> String {
    let Dimensions { height, width } = iframe_dimensions(&embed.html);
    let thumbnail = embed.thumbnail_url.as_deref().unwrap_or_default();
    let title = embed.title.as_deref().unwrap_or_default();

    let mut out = String::with_capacity(embed.html.len() * 2 + 256);
    out.push_str(r#"<a class="lvoembed lvvideo" data-embed=""#);
    out.push_str(&encode_quoted_attribute(&embed.html));
    out.push_str(r##"" href="#" data-height=""##);
    out.push_str(&encode_quoted_attribute(&height));
    out.push_str(r#"" data-width=""#);
    out.push_str(&encode_quoted_attribute(&width));
    out.push_str(r#""><div class="lazyvideo_container">"#);
    out.push_str(r#"<img class="lazyvideo_placeholder" src=""#);
    out.push_str(&encode_quoted_attribute(thumbnail));
    out.push_str(r#"" />"#);
    out.push_str(r#"<div class="lazyvideo_title"><div class="lazyvideo_text">"#);
    out.push_str(&encode_text(title));
    out.push_str("</div></div>");
    out.push_str(r#"<span class="lazyvideo_playbutton"></span>"#);
    out.push_str("</div></a>");
    out
}
