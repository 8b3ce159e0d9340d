//! # Channel-bridging subscriber.
//!
//! [`ChannelSubscriber`] forwards every delivery into a bounded
//! [`crossbeam_channel`], so a worker thread can consume notifications off
//! the firing thread. The bus side stays synchronous and non-blocking; the
//! consuming side decides its own pace.
//!
//! ## Rules
//! - **Non-blocking**: forwarding uses `try_send`; the firing thread never
//!   waits on a slow consumer.
//! - **Overflow**: when the channel is full, the delivery is dropped **for
//!   this subscriber only** and other subscribers are unaffected.
//! - **FIFO per subscriber**: deliveries that make it into the channel come
//!   out in fire order.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use notibus::{ChannelSubscriber, NotificationBus, SubscriberRef};
//!
//! let bus = NotificationBus::new();
//! bus.add_mapping("UserLoggedIn", "on_login");
//!
//! let (bridge, deliveries) = ChannelSubscriber::bounded("bridge", 16);
//! let bridge: SubscriberRef = bridge;
//! bus.subscribe(&bridge, ["UserLoggedIn"]);
//!
//! bus.fire("UserLoggedIn", Arc::new(String::from("jane")));
//!
//! let (method, payload) = deliveries.recv().unwrap();
//! assert_eq!(method.as_str(), "on_login");
//! assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("jane"));
//! ```

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::subscribers::Subscriber;
use crate::types::{MethodName, Payload};

/// One forwarded delivery: the dispatched method and the fired payload.
pub type Delivery = (MethodName, Payload);

/// Subscriber that forwards deliveries into a bounded channel.
///
/// Responds to every method name; the consumer distinguishes deliveries by
/// the [`MethodName`] in each [`Delivery`].
pub struct ChannelSubscriber {
    name: &'static str,
    tx: Sender<Delivery>,
}

impl ChannelSubscriber {
    /// Creates the subscriber and the consuming end of its channel.
    ///
    /// `capacity` is clamped to a minimum of 1. Dropping the receiver
    /// closes the channel; further deliveries are dropped with a warning.
    pub fn bounded(name: &'static str, capacity: usize) -> (Arc<Self>, Receiver<Delivery>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (Arc::new(Self { name, tx }), rx)
    }
}

impl Subscriber for ChannelSubscriber {
    fn responds_to(&self, _method: &MethodName) -> bool {
        true
    }

    fn call(&self, method: &MethodName, payload: &Payload) {
        match self.tx.try_send((method.clone(), Arc::clone(payload))) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    subscriber = self.name,
                    method = %method,
                    reason = "full",
                    "delivery dropped"
                );
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!(
                    subscriber = self.name,
                    method = %method,
                    reason = "closed",
                    "delivery dropped"
                );
            }
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}
