//! Portal shell demo binary.
//!
//! Wires an in-memory authentication backend into the shell and renders a
//! frame for each requested path, plain or as JSON.

use mimalloc::MiMalloc;

/// Global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use portal_shell::config::{AppConfig, Cli};
use portal_shell::session::MemoryAuthBackend;
use portal_shell::ui::AppShell;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load_with_cli(&cli)?;
    info!(
        name: "config.loaded",
        first_match_only = config.routing.first_match_only,
        catch_all = config.routing.catch_all_enabled,
        "configuration loaded"
    );

    let backend = MemoryAuthBackend::new();
    let shell = AppShell::new(&config, &backend)?;

    if let Some(uid) = &cli.as_user {
        backend.sign_in(uid.clone());
        info!(name: "auth.signed_in", uid = %uid, "signed in");
    }

    let paths = if cli.paths.is_empty() {
        vec!["/".to_string()]
    } else {
        cli.paths.clone()
    };

    for path in paths {
        shell.navigate(&path);
        let frame = shell.render();
        info!(
            name: "shell.rendered",
            path = %frame.path,
            views = frame.views.len(),
            "frame rendered"
        );
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&frame)?);
        } else {
            println!("{}", frame.html);
        }
    }

    Ok(())
}
