//! # Stock-Ledger Runtime
//!
//! The service entry point: wires the file snapshot store, the change
//! broadcaster, and the inventory engine, then runs a live audit
//! monitor until shutdown.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration from environment
//! 3. Build the snapshot store and bus, load the engine (snapshot or seed)
//! 4. Start the audit monitor task
//! 5. Wait for Ctrl+C, then signal shutdown
//!
//! The HTTP layer is a separate adapter over [`stock_core::InventoryApi`]
//! and [`InventoryService::subscribe`]; this binary hosts the core and a
//! log-based observer.

mod config;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::RuntimeConfig;
use stock_bus::{EventFilter, InMemoryAuditBus};
use stock_core::{FileSnapshotStore, InventoryApi, InventoryService};

/// Subscribe to the bus and log every accepted mutation until the
/// shutdown signal flips.
async fn run_audit_monitor(
    service: Arc<InventoryService>,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut sub = service.subscribe(EventFilter::all());
    loop {
        tokio::select! {
            message = sub.recv() => {
                let Some(message) = message else {
                    info!("Audit bus closed, monitor exiting");
                    return;
                };
                let entry = message.entry();
                info!(
                    id = %entry.id,
                    kind = ?entry.kind,
                    action = ?entry.action,
                    "audit"
                );
            }
            _ = shutdown.changed() => {
                info!("Shutdown signal received, monitor exiting");
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Stock-Ledger Runtime v0.1.0");
    info!("===========================================");

    // Load configuration
    let config = RuntimeConfig::from_env();
    info!(data_dir = %config.data_dir.display(), file = %config.snapshot_file, "Configuration loaded");

    // Wire the engine
    let snapshots = Arc::new(FileSnapshotStore::new(config.snapshot_path()));
    let bus = Arc::new(InMemoryAuditBus::with_capacity(config.bus_capacity));
    let service = Arc::new(InventoryService::load(snapshots, bus));

    info!(
        goods = service.list_goods().len(),
        shares = service.list_shares().len(),
        bins = service.list_bins().len(),
        "Inventory engine ready"
    );

    // Start the audit monitor
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let monitor = tokio::spawn(run_audit_monitor(Arc::clone(&service), shutdown_rx));

    // Keep the service running
    info!("Service is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    // Graceful shutdown
    info!("Initiating graceful shutdown...");
    let _ = shutdown_tx.send(true);
    let _ = monitor.await;
    info!("Shutdown complete");

    Ok(())
}
