//! # notibus
//!
//! **Notibus** is a lightweight in-process publish/subscribe notification
//! bus for Rust.
//!
//! It routes symbolic notification types to handler method names and fans
//! each fire out, synchronously, to the live subscribers registered under
//! that method. Subscribers are held weakly: the bus never extends an
//! object's lifetime, and dropped subscribers fall out of delivery on
//! their own. The crate is designed as a decoupling seam between
//! application components that should not reference each other directly.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Subscriber  │   │  Subscriber  │   │  Subscriber  │
//!     │ (trait impl) │   │ (HandlerMap) │   │ (HandlerMap) │
//!     └──────▲───────┘   └──────▲───────┘   └──────▲───────┘
//!            │ Weak             │ Weak             │ Weak
//! ┌──────────┴──────────────────┴──────────────────┴─────────────────┐
//! │  NotificationBus                                                  │
//! │  - routes:        NotificationType ──► MethodName                 │
//! │  - subscriptions: MethodName ──► Subscription (ordered weak list)  │
//! │  - drop hook:     observes every silent drop (optional)           │
//! └──────────▲────────────────────────────────────────▲──────────────┘
//!            │                                        │
//!     add_mapping(type, method)              fire(type, payload)
//!     subscribe(&sub, [types])              (synchronous fan-out on
//!                                            the firing thread)
//! ```
//!
//! ### A fire, step by step
//! ```text
//! fire("UserLoggedIn", payload)
//!   ├─► routes["UserLoggedIn"] ──► "on_login"        (miss → silent no-op)
//!   ├─► subscriptions["on_login"]                    (miss → silent no-op)
//!   └─► snapshot slots, release locks, then per slot:
//!         ├─ upgrade Weak ──► subscriber.call("on_login", &payload)
//!         └─ dead slot   ──► skip (reported to hook/tracing)
//! ```
//!
//! ## Features
//! | Area               | Description                                                         | Key types / traits                      |
//! |--------------------|---------------------------------------------------------------------|-----------------------------------------|
//! | **Routing**        | Map notification types to handler method names, last write wins.    | [`NotificationBus`], [`MethodName`]     |
//! | **Subscribing**    | Weakly-held, identity-deduplicated, insertion-ordered subscribers.  | [`Subscriber`], [`Subscription`]        |
//! | **Dispatch**       | Synchronous fan-out with an opaque per-fire payload.                | [`Payload`]                             |
//! | **Wiring**         | Declarative construction and closure-backed subscribers.            | [`BusBuilder`], [`HandlerMap`]          |
//! | **Diagnostics**    | Every silent drop is classified and observable.                     | [`BusError`]                            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogSubscriber`] _(demo/reference only)_.
//! - `crossbeam`: exports [`ChannelSubscriber`], bridging deliveries into a
//!   bounded channel for off-thread consumption.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use notibus::{HandlerMap, NotificationBus, Payload};
//!
//! let bus = NotificationBus::new();
//!
//! // Route two notification types onto handler methods.
//! bus.add_mapping("UserLoggedIn", "on_login");
//! bus.add_mapping("UserLoggedOut", "on_logout");
//!
//! // A subscriber is any Arc'd object implementing Subscriber; HandlerMap
//! // builds one from closures.
//! let audit = HandlerMap::new("audit")
//!     .on("on_login", |payload: &Payload| {
//!         if let Some(user) = payload.downcast_ref::<String>() {
//!             println!("audit: {user} logged in");
//!         }
//!     })
//!     .on("on_logout", |_: &Payload| println!("audit: logout"))
//!     .arc();
//!
//! bus.subscribe(&audit, ["UserLoggedIn", "UserLoggedOut"]);
//!
//! // Handlers run before fire() returns.
//! bus.fire("UserLoggedIn", Arc::new(String::from("jane")));
//!
//! // Dropping the last strong reference unsubscribes implicitly.
//! drop(audit);
//! bus.fire("UserLoggedOut", Arc::new(()));
//! ```

mod error;
mod registry;
mod subscribers;
mod subscription;
mod types;

// ---- Public re-exports ----

pub use error::BusError;
pub use registry::{BusBuilder, NotificationBus};
pub use subscribers::{HandlerMap, Subscriber, SubscriberRef};
pub use subscription::Subscription;
pub use types::{MethodName, NotificationType, Payload};

// Optional: bridge deliveries into a bounded crossbeam channel.
// Enable with: `--features crossbeam`
#[cfg(feature = "crossbeam")]
pub use subscribers::{ChannelSubscriber, Delivery};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogSubscriber;
