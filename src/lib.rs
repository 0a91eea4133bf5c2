// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_settings, Settings};
use crate::engine::{DispatchCore, DispatchEvent, Dispatcher};
use crate::errors::Result;
use crate::exec::ProcessBackend;
use crate::fs::{FileSystem, RealFileSystem};

/// Capacity of the watcher -> dispatcher channel.
pub const DISPATCH_CHANNEL_CAPACITY: usize = 64;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (watch directory validation, project title, binary path)
/// - the file watcher
/// - the dispatcher and the process backend
/// - Ctrl-C handling
///
/// Returns an error only for startup failures; once running it returns on
/// Ctrl-C.
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    // Everything below depends on validated settings: a bad watch directory
    // fails here, before anything subscribes.
    let settings = Arc::new(load_settings(&args, fs.as_ref())?);

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel::<DispatchEvent>(DISPATCH_CHANNEL_CAPACITY);

    let _watcher = watch::spawn_watcher(Arc::clone(&settings), Arc::clone(&fs), tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(DispatchEvent::ShutdownRequested).await;
        });
    }
    drop(tx);

    let core = DispatchCore::new(Arc::clone(&settings));
    let dispatcher = Dispatcher::new(core, rx, ProcessBackend::new());
    let stats = dispatcher.run().await?;

    info!(
        dispatched = stats.dispatched,
        ignored = stats.ignored,
        "tiddlytime stopped"
    );
    Ok(())
}

/// Simple dry-run output: print the resolved settings.
fn print_dry_run(settings: &Settings) {
    println!("tiddlytime dry-run");
    println!("  wiki_dir            = {}", settings.wiki_dir.display());
    println!("  entries             = {}", settings.entry_count);
    println!("  cli_path            = {}", settings.cli_path.display());
    println!("  project             = {}", settings.project);
    println!("  category            = {}", settings.category);
    println!("  alternate_language  = {}", settings.alternate_language);
    println!(
        "  stability_threshold = {}ms",
        settings.debounce.stability_threshold.as_millis()
    );
    println!(
        "  poll_interval       = {}ms",
        settings.debounce.poll_interval.as_millis()
    );
    println!();

    println!("ignored:");
    for rule in settings.ignore.describe() {
        println!("  - {rule}");
    }

    debug!("dry-run complete (not watching)");
}
