//! Signup portal - terminal entry point.
//!
//! Usage: `signup-portal [FRAGMENT]`, where FRAGMENT is the `#access_token=...`
//! part of a confirmation link, if the user arrived through one. Falls back
//! to `PORTAL__FRAGMENT`.

mod console;

use crate::console::{ConsoleNavigator, ConsoleView};
use account_gateway::{AccountGateway, SessionStore};
use anyhow::Context;
use identity_client::IdentityClient;
use signup_portal::{AppResult, Config, ControllerSettings, FormController};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting signup portal");

    // The service handle is built once and shared for the whole run.
    let client = IdentityClient::new(
        &config.identity.url,
        &config.identity.anon_key,
        config.identity.timeout,
    )?;

    if client.health_check().await {
        info!("Identity service reachable at {}", client.base_url());
    } else {
        warn!("Identity service health check failed - requests may fail");
    }

    let sessions = match &config.portal.session_path {
        Some(path) => SessionStore::open(path.clone()).await?,
        None => {
            info!("No session path configured, session marker kept in memory");
            SessionStore::memory()
        }
    };

    match sessions.current_user().await {
        Ok(Some(profile)) => info!("Previously signed in as {}", profile.email),
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable session marker: {}", e),
    }

    let gateway = AccountGateway::with_profile_table(
        Arc::new(client),
        config.identity.profile_table.clone(),
    );
    let fragment = std::env::args().nth(1).or_else(|| config.portal.fragment.clone());
    let navigator = Arc::new(ConsoleNavigator::new(fragment));
    let controller = FormController::new(
        gateway,
        sessions,
        Arc::new(ConsoleView),
        navigator.clone(),
        ControllerSettings::from(config.portal.clone()),
    );

    controller.init().await;

    while navigator.redirected_to().is_none() {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "login" => {
                controller.show_login();
                controller.login().await;
            }
            "register" => {
                controller.show_register();
                controller.register().await;
            }
            "welcome" | "back" => controller.show_welcome(),
            "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }

    info!("Shutting down");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
