//! The LinkEmbed content filter.
//!
//! This crate ties together the provider table, oEmbed resolution, and embed
//! rendering into the single `apply` pass a host runs over rendered content,
//! plus the per-page `setup` step for lazy loading.

pub mod context;
pub mod filter;

pub use context::{LAZYLOAD_INIT, LAZYLOAD_MODULE, RenderContext, ScriptRequest};
pub use filter::OembedFilter;
