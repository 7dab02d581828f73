//! Per-render setup state.

/// Client-side module that activates lazy placeholders.
pub const LAZYLOAD_MODULE: &str = "linkembed-lazyload";

/// Entry point the host calls once the module is loaded.
pub const LAZYLOAD_INIT: &str = "init_filter_lazyload";

/// A request for the host to load the lazy-load activation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    pub module: &'static str,
    pub init: &'static str,
    /// Context id handed to the init function; always 0 (site level).
    pub context_id: u64,
}

/// State scoped to one page render. The host creates one per page and
/// passes it to every `setup` call made while rendering that page.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    lazyload_script_requested: bool,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the activation script has been requested for this page.
    pub fn lazyload_script_requested(&self) -> bool {
        self.lazyload_script_requested
    }

    /// Returns the script request the first time it is called, `None` after.
    pub(crate) fn request_lazyload_script(&mut self) -> Option<ScriptRequest> {
        if self.lazyload_script_requested {
            return None;
        }
        self.lazyload_script_requested = true;
        Some(ScriptRequest {
            module: LAZYLOAD_MODULE,
            init: LAZYLOAD_INIT,
            context_id: 0,
        })
    }
}
