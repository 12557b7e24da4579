//! Command-line configuration.
//!
//! [`Cli`] is what clap parses; [`Config::from_cli`] validates it into the
//! typed [`Config`] the binary runs with. Validation failures are
//! [`ConfigError`]s, which the binary treats as fatal.

mod duration;

use std::fmt;
use std::net::SocketAddr;

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::poller::{PollConfig, WatermarkPolicy};
use crate::webhooks::WebhookSecret;

pub use duration::{DurationError, parse_duration};

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter(debug: bool) -> &'static str {
    if debug {
        "branch_sweep=debug,tower_http=info"
    } else {
        "branch_sweep=info,tower_http=info"
    }
}

#[derive(Debug, Parser)]
#[command(name = "branch-sweep")]
#[command(about = "Deletes the head branches of merged pull requests owned by the bot account", long_about = None)]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Interval between notification polls (e.g. 30s, 5m, 1h30m)
    #[arg(long, default_value = "30s")]
    pub interval: String,

    /// Handle GitHub webhook deliveries instead of polling notifications
    #[arg(long)]
    pub webhook: bool,

    /// Address the webhook receiver listens on
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Shared secret for verifying webhook signatures
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Notifications requested per page
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(1..=50))]
    pub per_page: u8,

    /// Move the notification watermark forward after each successful poll
    #[arg(long)]
    pub advance_watermark: bool,

    /// Run in debug mode
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print version and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

/// Which ingestion path the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Poll,
    Webhook { listen: SocketAddr },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a GitHub token is required (--token or GITHUB_TOKEN)")]
    MissingToken,

    #[error("parsing {value} as duration failed: {source}")]
    InvalidInterval {
        value: String,
        #[source]
        source: DurationError,
    },

    #[error("poll interval must be positive, got {value}")]
    ZeroInterval { value: String },
}

/// Validated runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub mode: Mode,
    pub poll: PollConfig,
    pub webhook_secret: Option<WebhookSecret>,
    pub debug: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("mode", &self.mode)
            .field("poll", &self.poll)
            .field("webhook_secret", &self.webhook_secret)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let token = cli
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let interval =
            parse_duration(&cli.interval).map_err(|source| ConfigError::InvalidInterval {
                value: cli.interval.clone(),
                source,
            })?;
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                value: cli.interval,
            });
        }

        let mode = if cli.webhook {
            Mode::Webhook { listen: cli.listen }
        } else {
            Mode::Poll
        };

        let watermark_policy = if cli.advance_watermark {
            WatermarkPolicy::AdvanceOnSuccess
        } else {
            WatermarkPolicy::Pinned
        };

        Ok(Config {
            token,
            mode,
            poll: PollConfig {
                interval,
                per_page: cli.per_page,
                watermark_policy,
                ..PollConfig::new()
            },
            webhook_secret: cli
                .webhook_secret
                .filter(|s| !s.is_empty())
                .map(WebhookSecret::new),
            debug: cli.debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let mut argv = vec!["branch-sweep"];
        argv.extend_from_slice(args);
        Config::from_cli(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn defaults_to_polling_every_30_seconds() {
        let config = parse(&["--token", "abc"]).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.mode, Mode::Poll);
        assert_eq!(config.poll.interval, Duration::from_secs(30));
        assert_eq!(config.poll.per_page, 20);
        assert_eq!(config.poll.watermark_policy, WatermarkPolicy::Pinned);
        assert!(config.webhook_secret.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn webhook_mode_uses_listen_address() {
        let config = parse(&["--token", "abc", "--webhook", "--listen", "127.0.0.1:9000"]).unwrap();

        assert_eq!(
            config.mode,
            Mode::Webhook {
                listen: "127.0.0.1:9000".parse().unwrap()
            }
        );
    }

    #[test]
    fn webhook_listens_on_8080_by_default() {
        let config = parse(&["--token", "abc", "--webhook"]).unwrap();

        assert_eq!(
            config.mode,
            Mode::Webhook {
                listen: "0.0.0.0:8080".parse().unwrap()
            }
        );
    }

    #[test]
    fn flags_are_applied() {
        let config = parse(&[
            "--token",
            "abc",
            "--interval",
            "1h30m",
            "--per-page",
            "50",
            "--advance-watermark",
            "--webhook-secret",
            "s3cret",
            "-d",
        ])
        .unwrap();

        assert_eq!(config.poll.interval, Duration::from_secs(5400));
        assert_eq!(config.poll.per_page, 50);
        assert_eq!(config.poll.watermark_policy, WatermarkPolicy::AdvanceOnSuccess);
        assert!(config.webhook_secret.is_some());
        assert!(config.debug);
    }

    #[test]
    fn missing_token_is_an_error() {
        // Built directly so a GITHUB_TOKEN in the test environment is ignored.
        let cli = Cli {
            token: None,
            interval: "30s".to_string(),
            webhook: false,
            listen: "0.0.0.0:8080".parse().unwrap(),
            webhook_secret: None,
            per_page: 20,
            advance_watermark: false,
            debug: false,
            version: None,
        };
        assert_eq!(Config::from_cli(cli).unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn empty_token_is_missing() {
        assert_eq!(parse(&["--token", ""]).unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn bad_interval_is_an_error() {
        let err = parse(&["--token", "abc", "--interval", "30"]).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidInterval { .. }));
        assert_eq!(
            err.to_string(),
            "parsing 30 as duration failed: missing unit after \"30\""
        );
    }

    #[test]
    fn zero_interval_is_an_error() {
        assert!(matches!(
            parse(&["--token", "abc", "--interval", "0s"]),
            Err(ConfigError::ZeroInterval { .. })
        ));
    }

    #[test]
    fn per_page_is_bounded() {
        assert!(Cli::try_parse_from(["branch-sweep", "--per-page", "0"]).is_err());
        assert!(Cli::try_parse_from(["branch-sweep", "--per-page", "51"]).is_err());
    }

    #[test]
    fn version_flag_short_circuits() {
        let err = Cli::try_parse_from(["branch-sweep", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = parse(&["--token", "ghp_secret"]).unwrap();
        assert!(!format!("{:?}", config).contains("ghp_secret"));
    }

    #[test]
    fn log_filter_follows_debug_flag() {
        assert!(default_log_filter(true).starts_with("branch_sweep=debug"));
        assert!(default_log_filter(false).starts_with("branch_sweep=info"));
    }
}
