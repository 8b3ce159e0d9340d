//! # Login Flow Example
//!
//! Shows the full life of a notification: mapping types to handler
//! methods, subscribing two independent components, firing with a payload,
//! and the implicit unsubscribe when a subscriber is dropped.
//!
//! The example wires:
//! - An audit component implemented as a `Subscriber` trait impl
//! - A badge counter built from `HandlerMap` closures
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example login_flow
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use notibus::{HandlerMap, MethodName, NotificationBus, Payload, Subscriber, SubscriberRef};

struct AuditLog;

impl Subscriber for AuditLog {
    fn responds_to(&self, method: &MethodName) -> bool {
        matches!(method.as_str(), "on_user_logged_in" | "on_user_logged_out")
    }

    fn call(&self, method: &MethodName, payload: &Payload) {
        let user = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .unwrap_or("<unknown>");
        println!(" ├─► audit: {method} user={user}");
    }

    fn name(&self) -> &str {
        "audit"
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bus = NotificationBus::new();
    bus.add_mapping("UserLoggedIn", "on_user_logged_in");
    bus.add_mapping("UserLoggedOut", "on_user_logged_out");

    let audit: SubscriberRef = Arc::new(AuditLog);
    bus.subscribe(&audit, ["UserLoggedIn", "UserLoggedOut"]);

    let sessions = Arc::new(AtomicU64::new(0));
    let badge = {
        let sessions = Arc::clone(&sessions);
        HandlerMap::new("badge")
            .on("on_user_logged_in", move |_: &Payload| {
                let now = sessions.fetch_add(1, Ordering::Relaxed) + 1;
                println!(" ├─► badge: {now} active session(s)");
            })
            .arc()
    };
    bus.subscribe(&badge, ["UserLoggedIn"]);

    println!("firing UserLoggedIn(jane):");
    bus.fire("UserLoggedIn", Arc::new(String::from("jane")));

    println!("firing UserLoggedIn(june):");
    bus.fire("UserLoggedIn", Arc::new(String::from("june")));

    // The badge component goes away; no unsubscribe call needed.
    drop(badge);

    println!("firing UserLoggedOut(jane) with the badge dropped:");
    bus.fire("UserLoggedOut", Arc::new(String::from("jane")));

    // Unmapped types are silent no-ops, visible only to diagnostics.
    bus.fire("PasswordChanged", Arc::new(()));
    println!(" └─► done");
}
