// src/main.rs
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use specimen_storage::console::{self, Command, HELP};
use specimen_storage::{load_config, Config, Workstation};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration (this calls load_env_file internally)
    let config = load_config()?;

    // Setup logging
    setup_logging(&config)?;
    config.print_startup_info();

    let mut workstation = Workstation::new(&config).context("Failed to initialise workstation")?;

    println!("{}", HELP);
    print_prompt(&workstation);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = time::interval(Duration::from_millis(config.notification.tick_ms));
    ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    print_prompt(&workstation);
                    continue;
                }

                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => println!("{}", console::execute(&mut workstation, command)),
                    Err(err) => println!("{}", err),
                }
                print_prompt(&workstation);
            }
            _ = ticker.tick() => {
                if workstation.tick(Instant::now()) {
                    tracing::debug!("Notification cleared");
                }
            }
        }
    }

    tracing::info!(
        "Session closed: {} specimen(s) processed",
        workstation.stats().total_processed
    );
    Ok(())
}

fn print_prompt(workstation: &Workstation) {
    println!(
        "[{} @ {}] {}",
        workstation.mode(),
        workstation.active_location(),
        workstation.notification().unwrap_or("")
    );
}

fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let level = config.logging.level.as_str();
            tracing_subscriber::EnvFilter::new(level)
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
