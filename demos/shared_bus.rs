//! # Shared Bus Example
//!
//! Shows two components meeting on the process-wide shared bus without
//! holding a reference to each other, including a fire from another
//! thread.
//!
//! ## Run
//! ```bash
//! cargo run --example shared_bus
//! ```

use std::sync::Arc;
use std::thread;

use notibus::{HandlerMap, NotificationBus, Payload, SubscriberRef};

/// The "UI" side: subscribes to connectivity changes.
fn wire_status_indicator() -> SubscriberRef {
    let indicator = HandlerMap::new("status-indicator")
        .on("on_connectivity_changed", |payload: &Payload| {
            let online = payload.downcast_ref::<bool>().copied().unwrap_or(false);
            println!(" ├─► indicator: {}", if online { "online" } else { "offline" });
        })
        .arc();
    NotificationBus::shared().subscribe(&indicator, ["ConnectivityChanged"]);
    indicator
}

/// The "network" side: publishes connectivity changes from its own thread.
fn report_connectivity(online: bool) {
    NotificationBus::shared().fire("ConnectivityChanged", Arc::new(online));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    NotificationBus::shared().add_mapping("ConnectivityChanged", "on_connectivity_changed");

    // Keep the strong reference; the bus only holds a weak one.
    let _indicator = wire_status_indicator();

    println!("reporting from the main thread:");
    report_connectivity(true);

    println!("reporting from a worker thread:");
    let worker = thread::spawn(|| {
        report_connectivity(false);
        report_connectivity(true);
    });
    worker.join().expect("worker thread panicked");

    println!(" └─► done");
}
