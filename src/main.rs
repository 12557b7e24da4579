use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use branch_sweep::config::{Cli, Config, Mode, default_log_filter};
use branch_sweep::effects::GitHubInterpreter;
use branch_sweep::github::OctocrabClient;
use branch_sweep::poller::Poller;
use branch_sweep::server::{AppState, build_router};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(cli.debug).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let github =
        OctocrabClient::from_token(config.token.clone()).context("failed to build GitHub client")?;

    let bot = github
        .current_user()
        .await
        .context("failed to look up the authenticated user")?;
    info!(user = %bot, "Bot started for user");

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown_signal(cancel.clone()));

    match config.mode {
        Mode::Poll => {
            Poller::new(github, bot, config.poll).run(cancel).await;
        }
        Mode::Webhook { listen } => {
            if config.webhook_secret.is_none() {
                warn!("No webhook secret configured; deliveries are not authenticated");
            }

            let app = build_router(AppState::new(github, bot, config.webhook_secret));
            let listener = tokio::net::TcpListener::bind(listen)
                .await
                .with_context(|| format!("failed to bind {}", listen))?;
            info!("listening on {}", listen);

            axum::serve(listener, app)
                .with_graceful_shutdown(cancel.cancelled_owned())
                .await
                .context("webhook server failed")?;
        }
    }

    info!("Shut down");
    Ok(())
}

/// Cancels `cancel` on SIGINT or SIGTERM.
async fn cancel_on_shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
    cancel.cancel();
}
