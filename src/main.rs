//! notify-actions
//!
//! Single-shot command: act on the notification given with `-id`.

use anyhow::Result;
use notify_actions::{Dispatcher, Error, Invocation, Outcome};
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let invocation = match Invocation::from_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            if let Some(Error::FlagParse(clap_err)) = e.downcast_ref::<Error>() {
                clap_err.exit();
            }
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let log_level = if invocation.verbose {
        "debug"
    } else {
        invocation.config.general.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("NOTIFY_ACTIONS_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if invocation.config.general.alert_on_error {
                notify_actions::alerts::alert_failure(&format!("{:#}", e));
            }
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(invocation: &Invocation) -> Result<()> {
    let id = invocation.id;
    let cancel = cancellation(invocation.config.deadline());
    let dispatcher = Dispatcher::from_config(&invocation.config.commands);

    match dispatcher.run(id, &cancel).await? {
        Outcome::Dismissed => info!("Dismissed notification {}", id),
        Outcome::Invoked { action, dismissed } => {
            info!("Ran {:?} on notification {} (dismissed: {})", action, id, dismissed)
        }
    }

    Ok(())
}

/// Token cancelled on Ctrl+C or once the run deadline passes
fn cancellation(timeout: Option<Duration>) -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = deadline => debug!("Run deadline reached"),
            Ok(()) = tokio::signal::ctrl_c() => debug!("Interrupted"),
        }
        trigger.cancel();
    });

    cancel
}
