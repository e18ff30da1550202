use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Render the first matching view only instead of every match
    #[arg(long, env = "FIRST_MATCH_ONLY")]
    pub first_match_only: Option<bool>,

    /// Install the not-found view as a catch-all binding
    #[arg(long, env = "CATCH_ALL_ENABLED")]
    pub catch_all_enabled: Option<bool>,

    /// Render frames as JSON instead of markup
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Sign in this principal before rendering
    #[arg(long)]
    pub as_user: Option<String>,

    /// Paths to render, in order
    pub paths: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub routing: RoutingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// When true, only the first matching binding renders. The default is the
    /// overlay behavior: every matching binding renders in declared order.
    pub first_match_only: bool,
    /// When true, a path matching no binding falls back to the not-found view
    /// instead of rendering nothing.
    pub catch_all_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::load_with_cli(&cli)
    }

    /// Layering, lowest to highest: defaults, config file, `PORTAL_` env
    /// vars, CLI flags.
    pub fn load_with_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        builder = builder
            .set_default("routing.first_match_only", false)?
            .set_default("routing.catch_all_enabled", false)?
            .set_default("ui.title", "Portal")?;

        // Config file: explicit path wins, otherwise ./config.yaml if present.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config.yaml"));
        }

        // E.g. PORTAL_UI__TITLE="My Portal"
        builder = builder.add_source(
            Environment::with_prefix("PORTAL")
                .separator("__")
                .try_parsing(true),
        );

        // Manual env overrides for the boolean keys so that "true"/"false"
        // strings parse regardless of the generic source's handling.
        if let Ok(val) = env::var("PORTAL_ROUTING__FIRST_MATCH_ONLY") {
            if let Ok(bool_val) = val.parse::<bool>() {
                builder = builder.set_override("routing.first_match_only", bool_val)?;
            }
        }
        if let Ok(val) = env::var("PORTAL_ROUTING__CATCH_ALL_ENABLED") {
            if let Ok(bool_val) = val.parse::<bool>() {
                builder = builder.set_override("routing.catch_all_enabled", bool_val)?;
            }
        }

        // CLI flags override everything else.
        if let Some(fm) = cli.first_match_only {
            builder = builder.set_override("routing.first_match_only", fm)?;
        }
        if let Some(ca) = cli.catch_all_enabled {
            builder = builder.set_override("routing.catch_all_enabled", ca)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
