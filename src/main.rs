use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use portico::application::{MenuReconciler, SessionStore};
use portico::infrastructure::config::{Command, ServeArgs, SessionAction};
use portico::infrastructure::{
    AppConfig, CliArgs, ConfigError, DevServer, StorageManager, open_store,
};
use portico::presentation::render_menu;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

/// Returns the manager and, when the platform directory is missing, the
/// reason it fell back to the working directory.
fn config_manager() -> Result<(StorageManager, Option<ConfigError>)> {
    match StorageManager::new() {
        Ok(manager) => Ok((manager, None)),
        Err(e) => Ok((StorageManager::with_dir(std::env::current_dir()?), Some(e))),
    }
}

fn load_config(manager: &StorageManager, args: &CliArgs) -> Result<AppConfig> {
    let mut config = manager
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(args);

    Ok(config)
}

async fn serve(config: AppConfig, serve_args: &ServeArgs) -> Result<()> {
    let rules = match &serve_args.rules {
        Some(path) => StorageManager::load_rules(path).wrap_err("Failed to load proxy rules")?,
        None => config.proxy.rules,
    };

    for rule in &rules {
        info!(prefix = rule.path_prefix(), kind = ?rule.kind(), "Proxy rule");
    }

    let server = DevServer::new(&config.server, rules)?;
    server.run().await.wrap_err("Dev server failed")
}

fn session(config: &AppConfig, action: SessionAction) -> Result<()> {
    let storage = open_store(
        config.session.storage,
        config.session.storage_path.as_deref(),
    );
    let menu = MenuReconciler::new(SessionStore::new(storage));

    match action {
        SessionAction::Status => {
            if let Ok(Some(token)) = menu.session().get_token() {
                println!("{} ({token})", menu.state());
                return Ok(());
            }
        }
        SessionAction::Login => menu.login().wrap_err("Login failed")?,
        SessionAction::Logout => menu.logout().wrap_err("Logout failed")?,
        SessionAction::Menu => {
            print!("{}", render_menu(&menu));
            return Ok(());
        }
    }

    println!("{}", menu.state());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let (manager, fallback) = config_manager()?;
    let config = load_config(&manager, &args)?;

    init_logging(&config)?;

    if let Some(e) = fallback {
        warn!(
            error = %e,
            dir = %manager.config_dir().display(),
            "Falling back to current directory for configuration"
        );
    }

    info!(version = portico::VERSION, "Starting {}", portico::NAME);

    match &args.command {
        Command::Serve(serve_args) => serve(config, serve_args).await,
        Command::Session(session_args) => session(&config, session_args.action),
    }
}
