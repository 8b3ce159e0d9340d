//! # Subscribers: the capability trait and built-in implementations.
//!
//! This module provides the [`Subscriber`] trait, the contract for objects
//! receiving notifications dispatched through the
//! [`NotificationBus`](crate::NotificationBus), and ready-made
//! implementations for common wiring.
//!
//! ## Architecture
//! ```text
//! Notification flow:
//!   host ── fire(type, payload) ──► NotificationBus ──► Subscription fan-out
//!                                                           │
//!                                                      Subscriber::call
//!                                                           │
//!                                              ┌────────────┼──────────────┐
//!                                              ▼            ▼              ▼
//!                                         HandlerMap   LogSubscriber  ChannelSubscriber
//!                                         (closures)   ("logging")    ("crossbeam")
//! ```
//!
//! ## Built-in subscribers
//! - [`HandlerMap`] - closure table, no trait impl needed (always
//!   available)
//! - `LogSubscriber` - stdout debug printer (feature `logging`)
//! - `ChannelSubscriber` - bridges deliveries into a bounded channel
//!   (feature `crossbeam`)
//!
//! ## Implementing custom subscribers
//! ```rust
//! use notibus::{MethodName, Payload, Subscriber};
//!
//! struct Metrics;
//!
//! impl Subscriber for Metrics {
//!     fn responds_to(&self, method: &MethodName) -> bool {
//!         method.as_str() == "on_task_failed"
//!     }
//!
//!     fn call(&self, _method: &MethodName, _payload: &Payload) {
//!         // increment failure counter
//!     }
//!
//!     fn name(&self) -> &str {
//!         "metrics"
//!     }
//! }
//! ```

mod handler_map;
mod subscriber;

#[cfg(feature = "crossbeam")]
mod channel;
#[cfg(feature = "logging")]
mod log;

pub use handler_map::HandlerMap;
pub use subscriber::{Subscriber, SubscriberRef};

#[cfg(feature = "crossbeam")]
pub use channel::{ChannelSubscriber, Delivery};
#[cfg(feature = "logging")]
pub use log::LogSubscriber;
