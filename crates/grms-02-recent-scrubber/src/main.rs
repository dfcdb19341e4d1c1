//! # GRMS - GTK Recent Files Scrubber
//!
//! Watches the desktop's global "recently used" list and removes anything
//! whose URI matches a hashed blacklist of URI prefixes.
//!
//! ## Usage
//!
//! ```bash
//! # Blacklist a folder (and everything under it)
//! grms --add ~/Private
//!
//! # Stop blacklisting it
//! grms --remove ~/Private
//!
//! # Stay resident, scrubbing whenever the list changes
//! grms -v
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Parse arguments and set up logging to stderr
//! 2. Load the blacklist (a missing file is an empty blacklist)
//! 3. Non-resident: apply `--add`/`--remove`, save, exit
//! 4. Resident: fix permissions, scrub, optionally purge, then watch

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use grms_01_prefix_blacklist::{BlacklistStore, FileBlacklistStore, PrefixHashSet};
use grms_02_recent_scrubber::{
    apply_edits, watch_file, Args, RecentScrubber, ScrubberConfig, XbelRecentStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level())?;

    let config = ScrubberConfig::from_args(&args);
    let store = FileBlacklistStore::new(&config.blacklist_path);

    let mut blacklist = PrefixHashSet::new();
    blacklist
        .load(&store)
        .context("Refusing to continue with an unreadable blacklist")?;

    if args.is_edit() {
        apply_edits(&mut blacklist, &args.additions, &args.removals);
        blacklist
            .save(&store)
            .with_context(|| format!("Failed to save blacklist to {}", store.location()))?;
        return Ok(());
    }

    // Baseline fingerprint must predate the initial pass.
    let changes = (!config.once)
        .then(|| watch_file(config.recent_path.clone(), config.poll_interval));

    let recent = XbelRecentStore::new(&config.recent_path);
    let mut scrubber = RecentScrubber::new(blacklist, recent);
    scrubber
        .start()
        .context("Initial scrub of the recent items list failed")?;

    if config.purge {
        if let Err(e) = scrubber.purge() {
            debug!("Continuing without purge: {}", e);
        }
    }

    let Some(mut changes) = changes else {
        debug!("Single pass requested, exiting");
        return Ok(());
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    scrubber.run(&mut changes, shutdown_rx).await?;
    Ok(())
}

/// Log to stderr as `LEVEL message`; `RUST_LOG` overrides `-v`/`-q`
fn init_logging(level: LevelFilter) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the log subscriber")?;
    Ok(())
}
