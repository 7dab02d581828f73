//! Embed markup generation.
//!
//! A lookup outcome becomes one of three fragments:
//! - the provider's `html` verbatim (direct mode, and always for
//!   [`EmbedStyle::Iframe`] providers),
//! - a click-to-load placeholder anchor (lazy mode, video providers only),
//! - a short inline error heading when the lookup failed.
//!
//! The placeholder's class names and `data-*` attributes are read by the
//! host's client-side activation script and must not change.

mod lazy;

use linkembed_shared::{EmbedStyle, ResolvedEmbed};

pub use lazy::{Dimensions, iframe_dimensions, lazy_placeholder};

/// Render a lookup outcome; `None` means the lookup failed.
pub fn render(embed: Option<&ResolvedEmbed>, style: EmbedStyle, lazyload: bool) -> String {
    match embed {
        None => error_fragment(style),
        Some(embed) if lazyload && style == EmbedStyle::Video => lazy_placeholder(embed),
        Some(embed) => embed.html.clone(),
    }
}

/// User-visible replacement for a link whose lookup failed.
pub fn error_fragment(style: EmbedStyle) -> String {
    format!(
        "<h3>Error in loading {}. Please try refreshing the page.</h3>",
        style.noun()
    )
}
