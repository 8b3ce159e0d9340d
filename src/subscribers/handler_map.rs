//! # Closure-backed subscriber (`HandlerMap`)
//!
//! [`HandlerMap`] implements [`Subscriber`] over a table of named closures,
//! so hosts can wire handlers without writing a trait impl. Each closure is
//! registered once at construction; `responds_to` is a table lookup and
//! `call` dispatches to the matching entry.
//!
//! ## Example
//! ```rust
//! use notibus::{HandlerMap, Payload, Subscriber};
//!
//! let sub = HandlerMap::new("audit")
//!     .on("on_login", |payload: &Payload| {
//!         if let Some(user) = payload.downcast_ref::<String>() {
//!             println!("login: {user}");
//!         }
//!     })
//!     .arc();
//!
//! assert_eq!(sub.name(), "audit");
//! assert!(sub.responds_to(&"on_login".into()));
//! assert!(!sub.responds_to(&"on_logout".into()));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::subscribers::subscriber::{Subscriber, SubscriberRef};
use crate::types::{MethodName, Payload};

/// Boxed handler stored per method name.
type Handler = Box<dyn Fn(&Payload) + Send + Sync>;

/// Table of named handler closures implementing [`Subscriber`].
///
/// Handlers share no state unless the host captures an `Arc<...>` into
/// several closures explicitly.
pub struct HandlerMap {
    name: Cow<'static, str>,
    handlers: HashMap<MethodName, Handler>,
}

impl HandlerMap {
    /// Creates an empty handler table with the given diagnostic name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` under `method`, replacing any previous handler
    /// registered with the same name.
    pub fn on(
        mut self,
        method: impl Into<MethodName>,
        handler: impl Fn(&Payload) + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(method.into(), Box::new(handler));
        self
    }

    /// Returns the table as a shared handle, ready for
    /// [`NotificationBus::subscribe`](crate::NotificationBus::subscribe).
    ///
    /// ## Example
    /// ```rust
    /// use notibus::{HandlerMap, Payload, SubscriberRef};
    ///
    /// let sub: SubscriberRef = HandlerMap::new("badge")
    ///     .on("on_unread_changed", |_: &Payload| {})
    ///     .arc();
    /// ```
    pub fn arc(self) -> SubscriberRef {
        Arc::new(self)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Subscriber for HandlerMap {
    fn responds_to(&self, method: &MethodName) -> bool {
        self.handlers.contains_key(method)
    }

    fn call(&self, method: &MethodName, payload: &Payload) {
        if let Some(handler) = self.handlers.get(method) {
            handler(payload);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_on_registers_and_call_dispatches() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = Arc::clone(&hits);

        let sub = HandlerMap::new("counter").on("on_ping", move |_: &Payload| {
            hits_in.fetch_add(1, Ordering::SeqCst);
        });

        let ping = MethodName::from("on_ping");
        let payload: Payload = Arc::new(());

        assert!(sub.responds_to(&ping));
        sub.call(&ping, &payload);
        sub.call(&ping, &payload);
        assert_eq!(hits.load(Ordering::SeqCst), 2, "each call should run the handler");
    }

    #[test]
    fn test_call_with_unknown_method_is_ignored() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = Arc::clone(&hits);

        let sub = HandlerMap::new("counter").on("on_ping", move |_: &Payload| {
            hits_in.fetch_add(1, Ordering::SeqCst);
        });

        sub.call(&MethodName::from("on_pong"), &(Arc::new(()) as Payload));
        assert_eq!(hits.load(Ordering::SeqCst), 0, "unknown method must not dispatch");
    }

    #[test]
    fn test_on_replaces_existing_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&hits);
        let second = Arc::clone(&hits);

        let sub = HandlerMap::new("replace")
            .on("on_ping", move |_: &Payload| {
                first.fetch_add(1, Ordering::SeqCst);
            })
            .on("on_ping", move |_: &Payload| {
                second.fetch_add(10, Ordering::SeqCst);
            });

        assert_eq!(sub.len(), 1, "same method name should keep one entry");
        sub.call(&MethodName::from("on_ping"), &(Arc::new(()) as Payload));
        assert_eq!(hits.load(Ordering::SeqCst), 10, "latest registration wins");
    }

    #[test]
    fn test_handler_downcasts_payload() {
        let seen = Arc::new(parking_lot::Mutex::new(String::new()));
        let seen_in = Arc::clone(&seen);

        let sub = HandlerMap::new("downcast").on("on_login", move |payload: &Payload| {
            if let Some(user) = payload.downcast_ref::<String>() {
                seen_in.lock().push_str(user);
            }
        });

        sub.call(
            &MethodName::from("on_login"),
            &(Arc::new(String::from("jane")) as Payload),
        );
        assert_eq!(seen.lock().as_str(), "jane");
    }
}
