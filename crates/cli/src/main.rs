// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

// Wake Console - CLI Client
// Terminal presentation layer for the remote power-control console

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use indicatif::ProgressBar;

use wake_console_common::{ConsoleConfig, RemoteClient, Theme};
use wake_console_core::{
    ConnectionState, NoopStatusHandler, StatusColor, StatusController, StatusEventHandler,
    StatusViewModel, START_COMMAND,
};

#[derive(Parser)]
#[command(name = "wake-console")]
#[command(about = "Remote power-control console", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current status of the controlled host
    Status {
        /// Output as JSON for scripting
        #[arg(short, long)]
        json: bool,
    },

    /// Send the start (wake) command and report the post-action state
    Start {
        /// Dispatch even when the host already reports online
        #[arg(short, long)]
        force: bool,
    },

    /// Poll continuously and print state transitions until Ctrl-C
    Watch {
        /// Poll interval in seconds (defaults to the configured value)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show or set the persisted theme preference
    Theme {
        /// New theme; omit to show the current one
        mode: Option<ThemeArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status { json } => show_status(json).await,
        Commands::Start { force } => start_host(force).await,
        Commands::Watch { interval } => watch(interval).await,
        Commands::Theme { mode } => theme_command(mode),
    }
}

fn build_controller(
    config: &ConsoleConfig,
    handler: Arc<dyn StatusEventHandler>,
) -> Result<StatusController> {
    let client = RemoteClient::new(&config.service).context("Failed to create service client")?;
    Ok(StatusController::new(Arc::new(client), handler))
}

async fn show_status(json: bool) -> Result<()> {
    let config = ConsoleConfig::load().context("Failed to load configuration")?;
    let controller = build_controller(&config, Arc::new(NoopStatusHandler))?;

    controller.refresh_status().await;
    let state = controller.state();

    if json {
        let payload = serde_json::json!({
            "state": state,
            "online": state == ConnectionState::Online,
            "last_updated": controller.last_updated(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", render_status_line(&state));
        if let Some(detail) = StatusViewModel::status_detail_for(&state) {
            println!("  {}", detail.dimmed());
        }
    }

    if state.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

async fn start_host(force: bool) -> Result<()> {
    let config = ConsoleConfig::load().context("Failed to load configuration")?;
    let controller = build_controller(&config, Arc::new(NoopStatusHandler))?;

    // Same gating the UI applies: the start action is pointless while the
    // host is already online
    controller.refresh_status().await;
    if controller.state() == ConnectionState::Online && !force {
        println!("{}", "Host is already online".green());
        return Ok(());
    }

    tracing::debug!("Dispatching start command to {}", config.service.base_url());

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Starting...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    controller.dispatch_action(START_COMMAND).await;
    spinner.finish_and_clear();

    match controller.state() {
        ConnectionState::Online => {
            println!("{} Host is online", "✓".green());
            Ok(())
        }
        ConnectionState::Offline => {
            println!("Start command sent; host has not come up yet");
            Ok(())
        }
        state => {
            eprintln!("{} {}", "✗".red(), render_status_line(&state));
            anyhow::bail!("Start action failed")
        }
    }
}

async fn watch(interval: Option<u64>) -> Result<()> {
    let config = ConsoleConfig::load().context("Failed to load configuration")?;
    let interval = Duration::from_secs(interval.unwrap_or(config.poll_interval_secs).max(1));
    let controller = build_controller(&config, Arc::new(TransitionPrinter))?;

    println!(
        "Watching {} every {}s (Ctrl-C to stop)",
        config.service.base_url(),
        interval.as_secs()
    );

    controller.start(interval);
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    controller.stop();

    println!("Stopped");
    Ok(())
}

fn theme_command(mode: Option<ThemeArg>) -> Result<()> {
    let mut config = ConsoleConfig::load().context("Failed to load configuration")?;

    match mode {
        None => println!("{}", config.theme.as_str()),
        Some(arg) => {
            config.theme = arg.into();
            config.save().context("Failed to save configuration")?;
            println!("Theme set to {}", config.theme.as_str());
        }
    }
    Ok(())
}

/// Prints timestamped transitions as the controller applies them
struct TransitionPrinter;

impl StatusEventHandler for TransitionPrinter {
    fn on_state_changed(&self, state: ConnectionState) {
        let now = chrono::Local::now().format("%H:%M:%S");
        println!("[{now}] {}", render_status_line(&state));
    }

    fn on_pending_changed(&self, pending: Option<&str>) {
        if let Some(command) = pending {
            let now = chrono::Local::now().format("%H:%M:%S");
            println!("[{now}] Dispatching '{command}'...");
        }
    }
}

fn render_status_line(state: &ConnectionState) -> String {
    let vm = StatusViewModel::from_state(state, None);
    format!("{} {}", vm.status_icon, paint(&vm.status_text, vm.status_color))
}

fn paint(text: &str, color: StatusColor) -> ColoredString {
    match color {
        StatusColor::Green => text.green(),
        StatusColor::Orange => text.yellow(),
        StatusColor::Red => text.red(),
        StatusColor::Gray => text.dimmed(),
    }
}
