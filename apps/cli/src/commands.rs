//! CLI command definitions, routing, and tracing setup.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use linkembed_core::{OembedFilter, RenderContext};
use linkembed_providers::providers;
use linkembed_shared::{
    AppConfig, FilterConfig, ProviderId, init_config, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// LinkEmbed: rewrite links to video, slide and poll sites as embeds.
#[derive(Parser)]
#[command(
    name = "linkembed",
    version,
    about = "Rewrite links to media-sharing sites in HTML into oEmbed widgets.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.linkembed/linkembed.toml.
    #[arg(long, global = true, env = "LINKEMBED_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Filter HTML from a file (or stdin) and print the result.
    Filter {
        /// Input file. Reads stdin when omitted.
        file: Option<PathBuf>,

        /// Emit click-to-load placeholders regardless of config.
        #[arg(long)]
        lazyload: bool,

        /// Only these providers (comma-separated), e.g. `youtube,vimeo`.
        #[arg(long)]
        only: Option<String>,
    },

    /// List supported providers and whether each is enabled.
    Providers,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Crates whose events the verbosity flag controls.
const LOG_TARGETS: [&str; 6] = [
    "linkembed",
    "linkembed_core",
    "linkembed_resolver",
    "linkembed_providers",
    "linkembed_render",
    "linkembed_shared",
];

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries
/// only filtered content.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if let Command::Config {
        action: ConfigAction::Init,
    } = cli.command
    {
        return cmd_config_init();
    }

    let config = read_config(cli.config.as_deref())?;

    match cli.command {
        Command::Filter {
            file,
            lazyload,
            only,
        } => cmd_filter(&config, file.as_deref(), lazyload, only.as_deref()).await,
        Command::Providers => cmd_providers(&config),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn read_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_filter(
    config: &AppConfig,
    file: Option<&Path>,
    lazyload: bool,
    only: Option<&str>,
) -> Result<()> {
    let mut filter_config = FilterConfig::from(config);
    filter_config.lazyload |= lazyload;
    if let Some(list) = only {
        filter_config.enabled = parse_provider_list(list)?;
    }

    let content = read_input(file)?;
    let filter = OembedFilter::from_config(config)?;

    let mut ctx = RenderContext::new();
    if let Some(script) = filter.setup(&filter_config, &mut ctx) {
        info!(
            module = script.module,
            init = script.init,
            "lazy placeholders need the activation script"
        );
    }

    let output = filter.apply(&content, &filter_config).await;
    print!("{output}");
    Ok(())
}

fn cmd_providers(config: &AppConfig) -> Result<()> {
    let enabled = FilterConfig::from(config);
    for spec in providers() {
        let state = if enabled.is_enabled(spec.id) { "on" } else { "off" };
        println!("{:<12} {:<7} {state}", spec.name(), spec.style.noun());
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_provider_list(list: &str) -> Result<BTreeSet<ProviderId>> {
    let providers = list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<ProviderId>())
        .collect::<std::result::Result<BTreeSet<_>, _>>()?;

    if providers.is_empty() {
        return Err(eyre!("--only needs at least one provider name"));
    }
    Ok(providers)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("cannot read stdin")?;
            Ok(buf)
        }
    }
}
