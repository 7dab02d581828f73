//! The content filter: provider links → oEmbed lookups → embed markup.

use tracing::{debug, info, instrument, warn};

use linkembed_providers::{ProviderSpec, RawLink, providers};
use linkembed_render::render;
use linkembed_resolver::{HttpResolver, Resolve};
use linkembed_shared::{AppConfig, FilterConfig, ResolvedEmbed, Result};

use crate::context::{RenderContext, ScriptRequest};

/// Rewrites links to supported media sites into embeds.
///
/// Holds no per-call state: concurrent [`apply`](Self::apply) calls are
/// independent apart from whatever the resolver shares (e.g. a pooled
/// HTTP client).
#[derive(Debug, Clone)]
pub struct OembedFilter<R> {
    resolver: R,
}

impl OembedFilter<HttpResolver> {
    /// Build a filter that resolves over HTTP with the configured transport.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(HttpResolver::new(&config.http)?))
    }
}

impl<R: Resolve> OembedFilter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    #[cfg(test)]
    fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Per-page setup. Returns the lazy-load activation script request when
    /// lazy loading is on and `ctx` has not requested it yet.
    pub fn setup(&self, config: &FilterConfig, ctx: &mut RenderContext) -> Option<ScriptRequest> {
        if !config.lazyload {
            return None;
        }
        ctx.request_lazyload_script()
    }

    /// Filter `content`, returning it with every resolvable provider link
    /// replaced by embed markup.
    ///
    /// Providers run in table order, each over the output of the previous
    /// one. If nothing changed, or the result came out empty, the input is
    /// returned untouched.
    #[instrument(skip_all, fields(len = content.len(), lazyload = config.lazyload))]
    pub async fn apply(&self, content: &str, config: &FilterConfig) -> String {
        if content.is_empty() {
            return String::new();
        }

        // Every provider pattern ends in `</a>`.
        if !contains_closing_anchor(content) {
            return content.to_string();
        }

        let mut text = content.to_string();
        let mut replaced = 0;

        for spec in providers().iter().filter(|p| config.is_enabled(p.id)) {
            if let Some((next, count)) = self.substitute(spec, &text, config.lazyload).await {
                text = next;
                replaced += count;
            }
        }

        if text.is_empty() || text == content {
            debug!("no links embedded");
            return content.to_string();
        }

        info!(replaced, "embedded provider links");
        text
    }

    /// Replace every `spec` link in `text`. `None` when there were none.
    async fn substitute(
        &self,
        spec: &ProviderSpec,
        text: &str,
        lazyload: bool,
    ) -> Option<(String, usize)> {
        let links = spec.find_links(text);
        if links.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in &links {
            out.push_str(&text[last..m.range.start]);
            out.push_str(&self.embed(spec, &m.link, lazyload).await);
            last = m.range.end;
        }
        out.push_str(&text[last..]);

        Some((out, links.len()))
    }

    /// Resolve one link and render its replacement.
    async fn embed(&self, spec: &ProviderSpec, link: &RawLink<'_>, lazyload: bool) -> String {
        let lookup = spec.lookup_url(link);
        debug!(provider = %spec.id, %lookup, "resolving link");

        match self.resolver.resolve(&lookup).await {
            Ok(embed) => {
                let embed = ResolvedEmbed {
                    html: spec.post_process(embed.html),
                    ..embed
                };
                render(Some(&embed), spec.style, lazyload)
            }
            Err(e) => {
                warn!(provider = %spec.id, error = %e, "oEmbed lookup failed");
                render(None, spec.style, lazyload)
            }
        }
    }
}

/// Case-insensitive search for `</a>`.
fn contains_closing_anchor(content: &str) -> bool {
    content
        .as_bytes()
        .windows(4)
        .any(|w| w.eq_ignore_ascii_case(b"</a>"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use linkembed_resolver::ResolveError;
    use linkembed_shared::ProviderId;

    use super::*;

    type Respond = Box<dyn Fn(&str) -> std::result::Result<ResolvedEmbed, ResolveError> + Send + Sync>;

    /// In-memory resolver that records every lookup URL.
    struct StubResolver {
        respond: Respond,
        calls: Mutex<Vec<String>>,
    }

    impl StubResolver {
        fn new(
            respond: impl Fn(&str) -> std::result::Result<ResolvedEmbed, ResolveError>
            + Send
            + Sync
            + 'static,
        ) -> Self {
            Self {
                respond: Box::new(respond),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn returning(embed: ResolvedEmbed) -> Self {
            Self::new(move |_| Ok(embed.clone()))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Resolve for StubResolver {
        async fn resolve(
            &self,
            lookup_url: &str,
        ) -> std::result::Result<ResolvedEmbed, ResolveError> {
            self.calls.lock().unwrap().push(lookup_url.to_string());
            (self.respond)(lookup_url)
        }
    }

    const YT_LINK: &str = r#"<a href="https://www.youtube.com/watch?v=dQw4w9WgXcQ">text</a>"#;

    fn rick() -> ResolvedEmbed {
        ResolvedEmbed {
            html: "<iframe width=420 height=315></iframe>".into(),
            thumbnail_url: Some("T".into()),
            title: Some("X".into()),
        }
    }

    fn youtube_only(lazyload: bool) -> FilterConfig {
        FilterConfig::with_providers([ProviderId::YouTube], lazyload)
    }

    #[tokio::test]
    async fn test_no_closing_anchor_is_identity() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));
        let content = r#"<p>https://www.youtube.com/watch?v=dQw4w9WgXcQ <a href="x">open"#;

        let out = filter.apply(content, &FilterConfig::all_enabled(false)).await;

        assert_eq!(out, content);
        assert!(filter.resolver().calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));
        assert_eq!(filter.apply("", &FilterConfig::all_enabled(true)).await, "");
    }

    #[tokio::test]
    async fn test_unmatched_links_are_identity() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));
        let content = r#"<p>Read <A HREF="https://example.com/docs">the docs</A> first.</p>"#;

        let out = filter.apply(content, &FilterConfig::all_enabled(true)).await;

        assert_eq!(out, content);
        assert!(filter.resolver().calls().is_empty());
    }

    #[tokio::test]
    async fn test_youtube_direct_embed() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));

        let out = filter.apply(YT_LINK, &youtube_only(false)).await;

        assert_eq!(out, "<iframe width=420 height=315></iframe>");
        assert_eq!(
            filter.resolver().calls(),
            vec!["http://www.youtube.com/oembed?url=https://www.youtube.com/watch?v=dQw4w9WgXcQ&format=json"]
        );
    }

    #[tokio::test]
    async fn test_youtube_lazy_placeholder() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));

        let out = filter.apply(YT_LINK, &youtube_only(true)).await;

        assert!(out.contains(r#"data-height="315""#));
        assert!(out.contains(r#"data-width="420""#));
        assert!(out.contains(r#"data-embed="&lt;iframe"#));
        assert!(out.contains(r#"<img class="lazyvideo_placeholder" src="T" />"#));
        assert!(out.contains(r#"<div class="lazyvideo_text">X</div>"#));
    }

    #[tokio::test]
    async fn test_failed_lookup_renders_error_in_place() {
        let filter = OembedFilter::new(StubResolver::new(|url| {
            Err(ResolveError::Transient {
                url: url.to_string(),
                message: "connection refused".into(),
            })
        }));
        let content = format!("<p>before {YT_LINK} after</p>");

        let out = filter.apply(&content, &youtube_only(true)).await;

        assert_eq!(
            out,
            "<p>before <h3>Error in loading video. Please try refreshing the page.</h3> after</p>"
        );
    }

    #[tokio::test]
    async fn test_iframe_provider_failure_wording() {
        let filter = OembedFilter::new(StubResolver::new(|url| {
            Err(ResolveError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
        }));
        let content = r#"<a href="https://issuu.com/someone/docs/catalogue">read</a>"#;

        let out = filter.apply(content, &FilterConfig::all_enabled(false)).await;

        assert_eq!(
            out,
            "<h3>Error in loading iframe. Please try refreshing the page.</h3>"
        );
    }

    #[tokio::test]
    async fn test_iframe_provider_is_never_lazy() {
        let deck = ResolvedEmbed {
            html: r#"<iframe src="https://www.slideshare.net/slideshow/embed_code/1" width="480" height="270"></iframe>"#.into(),
            thumbnail_url: None,
            title: Some("Deck".into()),
        };
        let filter = OembedFilter::new(StubResolver::returning(deck.clone()));
        let content = r#"<a href="http://www.slideshare.net/user/my-deck">deck</a>"#;

        let out = filter.apply(content, &FilterConfig::all_enabled(true)).await;

        assert_eq!(out, deck.html);
    }

    #[tokio::test]
    async fn test_officemix_dimensions_upsized() {
        let filter = OembedFilter::new(StubResolver::returning(ResolvedEmbed {
            html: r#"<iframe src="https://mix.office.com/embed/abc" width="348" height="245"></iframe>"#.into(),
            thumbnail_url: None,
            title: None,
        }));
        let content = r#"<a href="https://mix.office.com/watch/abc">mix</a>"#;

        let out = filter
            .apply(content, &FilterConfig::with_providers([ProviderId::OfficeMix], false))
            .await;

        assert_eq!(
            out,
            r#"<iframe src="https://mix.office.com/embed/abc" width="480" height="320"></iframe>"#
        );
    }

    #[tokio::test]
    async fn test_disabled_provider_is_skipped() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));
        let content = r#"<a href="https://vimeo.com/76979871">v</a>"#;

        let out = filter.apply(content, &youtube_only(false)).await;

        assert_eq!(out, content);
        assert!(filter.resolver().calls().is_empty());
    }

    #[tokio::test]
    async fn test_every_link_replaced_and_context_kept() {
        let filter = OembedFilter::new(StubResolver::new(|url| {
            Ok(ResolvedEmbed {
                html: format!("<iframe data-lookup=\"{}\"></iframe>", url.len()),
                thumbnail_url: None,
                title: None,
            })
        }));
        let content = concat!(
            "<h1>Media</h1>\n",
            r#"<a href="https://vimeo.com/1">one</a>"#,
            "\n<p>between</p>\n",
            r#"<a href="https://soundcloud.com/artist/track">two</a>"#,
            "\n<footer>end</footer>",
        );

        let out = filter.apply(content, &FilterConfig::all_enabled(false)).await;

        assert!(out.starts_with("<h1>Media</h1>\n<iframe"));
        assert!(out.contains("</iframe>\n<p>between</p>\n<iframe"));
        assert!(out.ends_with("</iframe>\n<footer>end</footer>"));
        assert_eq!(filter.resolver().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_later_provider_sees_earlier_output() {
        let filter = OembedFilter::new(StubResolver::new(|url| {
            let html = if url.starts_with("http://www.youtube.com/") {
                r#"<a href="https://vimeo.com/5">nested</a>"#.to_string()
            } else {
                "<iframe></iframe>".to_string()
            };
            Ok(ResolvedEmbed {
                html,
                thumbnail_url: None,
                title: None,
            })
        }));

        let out = filter.apply(YT_LINK, &FilterConfig::all_enabled(false)).await;

        assert_eq!(out, "<iframe></iframe>");
        let calls = filter.resolver().calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("http://www.youtube.com/oembed"));
        assert!(calls[1].starts_with("http://vimeo.com/api/oembed.json"));
    }

    #[tokio::test]
    async fn test_empty_result_falls_back_to_input() {
        let filter = OembedFilter::new(StubResolver::returning(ResolvedEmbed {
            html: String::new(),
            thumbnail_url: None,
            title: None,
        }));

        let out = filter.apply(YT_LINK, &youtube_only(false)).await;

        assert_eq!(out, YT_LINK);
    }

    #[tokio::test]
    async fn test_lazy_output_is_stable_on_second_pass() {
        let filter = OembedFilter::new(StubResolver::returning(ResolvedEmbed {
            html: r#"<iframe width="480" height="270" src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>"#.into(),
            thumbnail_url: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".into()),
            title: Some("Rick".into()),
        }));
        let config = FilterConfig::all_enabled(true);
        let content = format!("<div>{YT_LINK}</div>");

        let first = filter.apply(&content, &config).await;
        let second = filter.apply(&first, &config).await;

        assert_ne!(first, content);
        assert_eq!(second, first);
        assert_eq!(filter.resolver().calls().len(), 1);
    }

    #[test]
    fn test_setup_requests_script_once_per_context() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));
        let lazy = FilterConfig::all_enabled(true);
        let mut ctx = RenderContext::new();

        let first = filter.setup(&lazy, &mut ctx).expect("script requested");
        assert_eq!(first.module, crate::context::LAZYLOAD_MODULE);
        assert_eq!(first.init, "init_filter_lazyload");
        assert!(ctx.lazyload_script_requested());
        assert!(filter.setup(&lazy, &mut ctx).is_none());

        let mut next_page = RenderContext::new();
        assert!(filter.setup(&lazy, &mut next_page).is_some());
    }

    #[test]
    fn test_setup_without_lazyload() {
        let filter = OembedFilter::new(StubResolver::returning(rick()));
        let mut ctx = RenderContext::new();
        assert!(filter.setup(&FilterConfig::all_enabled(false), &mut ctx).is_none());
        assert!(!ctx.lazyload_script_requested());
    }

    #[test]
    fn test_closing_anchor_detection() {
        assert!(contains_closing_anchor("x</a>"));
        assert!(contains_closing_anchor("x</A> y"));
        assert!(!contains_closing_anchor("<a href=\"x\">x</ a>"));
        assert!(!contains_closing_anchor(""));
    }
}
