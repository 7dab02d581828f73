//! Shared types, error model, and configuration for LinkEmbed.
//!
//! This crate is the foundation depended on by all other LinkEmbed crates.
//! It provides:
//! - [`LinkEmbedError`], the unified error type
//! - Domain types ([`ProviderId`], [`EmbedStyle`], [`ResolvedEmbed`], [`FilterConfig`])
//! - Configuration ([`AppConfig`], [`HttpConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FilterSettings, HttpConfig, ProviderToggles, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{LinkEmbedError, Result};
pub use types::{EmbedStyle, FilterConfig, ProviderId, ResolvedEmbed};
