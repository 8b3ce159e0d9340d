//! # Subscriber capability trait.
//!
//! Provides [`Subscriber`], the contract an object must satisfy to receive
//! notifications from the bus.
//!
//! Each subscriber:
//! - **Advertises its handlers** via [`Subscriber::responds_to`], consulted
//!   once when the object subscribes.
//! - **Performs its own named dispatch** via [`Subscriber::call`], invoked
//!   once per delivery on the firing thread.
//! - **Is held weakly**: the bus never keeps a subscriber alive; the host
//!   application owns the strong references.
//!
//! ## Architecture
//! ```text
//! subscribe(sub, type) ──► responds_to(method)? ──► stored as Weak
//! fire(type, payload)  ──► upgrade ──► sub.call(method, &payload)
//! ```
//!
//! ## Rules
//! - `call` runs synchronously on the firing thread; keep handlers quick
//!   and non-blocking.
//! - `responds_to` must be stable for the lifetime of the subscription: a
//!   method accepted at subscribe time is assumed callable at every fire.
//! - `call` may receive a method the object was never asked about;
//!   implementations are free to ignore unknown names.
//!
//! ## Example
//! ```rust
//! use notibus::{MethodName, Payload, Subscriber};
//!
//! struct Audit;
//!
//! impl Subscriber for Audit {
//!     fn responds_to(&self, method: &MethodName) -> bool {
//!         method.as_str() == "on_login"
//!     }
//!
//!     fn call(&self, method: &MethodName, payload: &Payload) {
//!         if method.as_str() == "on_login" {
//!             if let Some(user) = payload.downcast_ref::<String>() {
//!                 println!("login: {user}");
//!             }
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "audit"
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::types::{MethodName, Payload};

/// Shared handle to a type-erased subscriber.
///
/// The bus API works in terms of this alias; concrete subscribers coerce
/// into it at the binding site:
/// ```rust
/// use notibus::{HandlerMap, SubscriberRef};
/// use std::sync::Arc;
///
/// let sub: SubscriberRef = Arc::new(HandlerMap::new("noop"));
/// ```
pub type SubscriberRef = Arc<dyn Subscriber>;

/// Receiver of dispatched notifications.
///
/// The two required methods mirror the bus's gatekeeping and dispatch:
/// [`responds_to`](Self::responds_to) is checked once at subscribe time,
/// [`call`](Self::call) runs on every fire that routes to the object.
///
/// ### Implementation requirements
/// - `call` runs on the firing thread; avoid blocking in handlers.
/// - Handle errors internally; do not panic.
/// - Keep `responds_to` cheap (a name comparison or table lookup).
pub trait Subscriber: Send + Sync + 'static {
    /// Whether this subscriber exposes a handler under `method`.
    ///
    /// Consulted by
    /// [`Subscription::can_add_reference`](crate::Subscription::can_add_reference)
    /// before a weak reference is stored. Objects that return `false` are
    /// silently rejected from that subscription.
    fn responds_to(&self, method: &MethodName) -> bool;

    /// Invokes the handler registered under `method` with `payload`.
    ///
    /// Called in subscription order; each invocation completes before the
    /// next subscriber is called.
    fn call(&self, method: &MethodName, payload: &Payload);

    /// Returns the subscriber name used in logs and drop diagnostics.
    ///
    /// Prefer short, descriptive names (e.g., "audit", "metrics", "badge").
    /// The default uses `type_name::<Self>()`, which can be verbose -
    /// override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
