//! # The notification bus: routing table plus subscription registry.
//!
//! [`NotificationBus`] owns two maps guarded by independent locks:
//! - **routes**: notification type → method name, written by
//!   [`add_mapping`](NotificationBus::add_mapping);
//! - **subscriptions**: method name → [`Subscription`], created lazily the
//!   first time a subscriber lands on a method.
//!
//! ## Architecture
//! ```text
//! add_mapping("UserLoggedIn", "on_login")
//!                 │
//!                 ▼
//!      routes: type ──► method            subscriptions: method ──► Subscription
//!                 │                                          │
//! fire("UserLoggedIn", payload) ─────────────────────────────┤
//!                                                            ▼
//!                                               [Weak sub, Weak sub, ...]
//!                                                 │ upgrade + call
//!                                                 ▼ (on the firing thread)
//!                                               subscriber.call(method, &payload)
//! ```
//!
//! ## Rules
//! - **Single hop**: a fire resolves the type to exactly one method and
//!   fans out over that method's subscription; there is no pattern or
//!   wildcard matching.
//! - **Silent drops**: unknown types, ineligible or duplicate subscribers
//!   and dead references never error or panic; they surface only through
//!   `tracing` and the optional drop hook.
//! - **No lock across handlers**: both maps are released before any
//!   subscriber code runs, so handlers may re-enter the bus freely.
//! - **Retargeting**: remapping a type changes future routing only;
//!   subscriptions already made through the old route stay with the old
//!   method.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::BusError;
use crate::registry::builder::BusBuilder;
use crate::subscribers::SubscriberRef;
use crate::subscription::Subscription;
use crate::types::{MethodName, NotificationType, Payload};

/// Sink invoked on every silent drop, installed via
/// [`BusBuilder::with_drop_hook`].
pub(crate) type DropHook = Arc<dyn Fn(&BusError) + Send + Sync>;

/// In-process publish/subscribe registry with name-based routing and
/// weakly-held subscribers.
///
/// Cheap to construct; hosts that want a process-wide instance use
/// [`NotificationBus::shared`]. All methods take `&self` and are safe to
/// call from any thread.
pub struct NotificationBus {
    routes: RwLock<HashMap<NotificationType, MethodName>>,
    subscriptions: RwLock<HashMap<MethodName, Arc<Subscription>>>,
    drop_hook: Option<DropHook>,
}

impl NotificationBus {
    /// Creates an empty bus with no mappings, subscriptions or drop hook.
    pub fn new() -> Self {
        Self::new_with_hook(None)
    }

    pub(crate) fn new_with_hook(drop_hook: Option<DropHook>) -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            subscriptions: RwLock::new(HashMap::new()),
            drop_hook,
        }
    }

    /// Returns a builder for declarative wiring.
    pub fn builder() -> BusBuilder {
        BusBuilder::new()
    }

    /// Returns the process-wide shared bus.
    ///
    /// Created empty on first access and never dropped. Independent buses
    /// can still be constructed with [`NotificationBus::new`]; the shared
    /// instance is a convenience for hosts that want one well-known
    /// rendezvous point.
    ///
    /// # Example
    /// ```
    /// use notibus::NotificationBus;
    ///
    /// let a = NotificationBus::shared();
    /// let b = NotificationBus::shared();
    /// assert!(std::ptr::eq(a, b));
    /// ```
    pub fn shared() -> &'static NotificationBus {
        static SHARED: OnceLock<NotificationBus> = OnceLock::new();
        SHARED.get_or_init(NotificationBus::new)
    }

    /// Registers (or replaces) the route from `notification_type` to
    /// `method`.
    ///
    /// Last write wins: remapping an existing type replaces the route for
    /// future subscribes and fires, while subscriptions made through the
    /// old route keep dispatching under the old method name. Empty names
    /// are ignored with a warning.
    ///
    /// # Example
    /// ```
    /// use notibus::NotificationBus;
    ///
    /// let bus = NotificationBus::new();
    /// bus.add_mapping("UserLoggedIn", "on_login");
    /// bus.add_mapping("UserLoggedIn", "on_login_v2");
    ///
    /// assert_eq!(bus.method_for("UserLoggedIn").unwrap().as_str(), "on_login_v2");
    /// ```
    pub fn add_mapping(
        &self,
        notification_type: impl Into<NotificationType>,
        method: impl Into<MethodName>,
    ) {
        let ty = notification_type.into();
        let method = method.into();
        if ty.is_empty() || method.is_empty() {
            tracing::warn!(notification_type = %ty, method = %method, "ignored mapping with empty name");
            return;
        }
        let previous = self.routes.write().insert(ty.clone(), method.clone());
        if let Some(old) = previous {
            if old != method {
                tracing::debug!(notification_type = %ty, from = %old, to = %method, "notification type retargeted");
            }
        }
    }

    /// Subscribes `subscriber` to each of the given notification types.
    ///
    /// For each type the bus resolves the mapped method, checks that the
    /// subscriber responds to it and that it is not already present, then
    /// stores a weak reference at the end of that method's subscription.
    /// Types that fail any step are skipped silently; the rest still go
    /// through.
    ///
    /// The bus keeps no strong reference: dropping the last `Arc` outside
    /// the bus unsubscribes the object implicitly.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use notibus::{HandlerMap, NotificationBus, Payload};
    ///
    /// let bus = NotificationBus::new();
    /// bus.add_mapping("UserLoggedIn", "on_login");
    ///
    /// let audit = HandlerMap::new("audit")
    ///     .on("on_login", |_: &Payload| {})
    ///     .arc();
    /// bus.subscribe(&audit, ["UserLoggedIn"]);
    ///
    /// assert!(bus.has_any_subscriptions("UserLoggedIn"));
    /// ```
    pub fn subscribe(
        &self,
        subscriber: &SubscriberRef,
        types: impl IntoIterator<Item = impl AsRef<str>>,
    ) {
        for ty in types {
            let ty = ty.as_ref();
            let Some(method) = self.route(ty) else {
                self.report(&BusError::UnmappedType {
                    notification_type: ty.into(),
                });
                continue;
            };
            let subscription = self.subscription_for(&method);
            match subscription.try_add(subscriber) {
                Ok(()) => {
                    tracing::trace!(
                        subscriber = subscriber.name(),
                        notification_type = ty,
                        method = %method,
                        "subscribed"
                    );
                }
                Err(err) => self.report(&err),
            }
        }
    }

    /// Fires a notification: resolves the type and synchronously invokes
    /// the mapped method on every live subscriber, in subscription order,
    /// passing `payload` to each.
    ///
    /// Returns once every handler has run. Unmapped types and fires with
    /// no subscribers are silent no-ops. Both internal locks are released
    /// before the first handler runs, so handlers may fire further
    /// notifications or subscribe; additions made mid-fire are first seen
    /// by the next fire.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use notibus::{HandlerMap, NotificationBus, Payload};
    ///
    /// let bus = NotificationBus::new();
    /// bus.add_mapping("UserLoggedIn", "on_login");
    ///
    /// let audit = HandlerMap::new("audit")
    ///     .on("on_login", |payload: &Payload| {
    ///         assert_eq!(payload.downcast_ref::<&str>(), Some(&"jane"));
    ///     })
    ///     .arc();
    /// bus.subscribe(&audit, ["UserLoggedIn"]);
    ///
    /// bus.fire("UserLoggedIn", Arc::new("jane"));
    /// ```
    pub fn fire(&self, notification_type: impl AsRef<str>, payload: Payload) {
        let ty = notification_type.as_ref();
        let Some(method) = self.route(ty) else {
            self.report(&BusError::UnmappedType {
                notification_type: ty.into(),
            });
            return;
        };
        let Some(subscription) = self.subscription_if_exists(&method) else {
            tracing::trace!(notification_type = ty, method = %method, "fire with no subscribers");
            return;
        };
        tracing::trace!(notification_type = ty, method = %method, "fire");
        subscription.call_with_report(&payload, &|err| self.report(err));
    }

    /// Returns the method name `notification_type` currently routes to.
    pub fn method_for(&self, notification_type: &str) -> Option<MethodName> {
        self.route(notification_type)
    }

    /// Returns all mapped notification types, sorted by name.
    pub fn mapped_types(&self) -> Vec<NotificationType> {
        let mut types: Vec<NotificationType> = self.routes.read().keys().cloned().collect();
        types.sort_unstable();
        types
    }

    /// Returns whether at least one live subscriber would currently
    /// receive a fire of `notification_type`.
    ///
    /// False for unmapped types, methods nobody ever subscribed to, and
    /// subscriptions whose subscribers have all been dropped.
    pub fn has_any_subscriptions(&self, notification_type: &str) -> bool {
        match self.route(notification_type) {
            Some(method) => self
                .subscription_if_exists(&method)
                .is_some_and(|subscription| subscription.has_any_subscriptions()),
            None => false,
        }
    }

    fn route(&self, notification_type: &str) -> Option<MethodName> {
        self.routes.read().get(notification_type).cloned()
    }

    /// Existing subscription for `method`, or a fresh empty one inserted
    /// under the write lock.
    fn subscription_for(&self, method: &MethodName) -> Arc<Subscription> {
        if let Some(existing) = self.subscriptions.read().get(method) {
            return Arc::clone(existing);
        }
        let mut subscriptions = self.subscriptions.write();
        Arc::clone(
            subscriptions
                .entry(method.clone())
                .or_insert_with(|| Arc::new(Subscription::new(method.clone()))),
        )
    }

    fn subscription_if_exists(&self, method: &MethodName) -> Option<Arc<Subscription>> {
        self.subscriptions.read().get(method).map(Arc::clone)
    }

    /// Routes every silent drop through one place: a `tracing` event plus
    /// the optional hook. Never called with a lock held.
    fn report(&self, err: &BusError) {
        if err.is_wiring() {
            tracing::debug!(%err, reason = err.as_label(), "bus drop");
        } else {
            tracing::trace!(%err, reason = err.as_label(), "bus drop");
        }
        if let Some(hook) = &self.drop_hook {
            hook(err);
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::subscribers::HandlerMap;

    fn recorder(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> SubscriberRef {
        let log = Arc::clone(log);
        HandlerMap::new(label)
            .on("on_login", move |_: &Payload| log.lock().push(label))
            .arc()
    }

    #[test]
    fn test_add_mapping_and_method_for() {
        let bus = NotificationBus::new();
        bus.add_mapping("UserLoggedIn", "on_login");

        assert_eq!(
            bus.method_for("UserLoggedIn").map(|m| m.to_string()),
            Some("on_login".to_string())
        );
        assert!(bus.method_for("UserLoggedOut").is_none());
    }

    #[test]
    fn test_empty_names_are_ignored() {
        let bus = NotificationBus::new();
        bus.add_mapping("", "on_login");
        bus.add_mapping("UserLoggedIn", "");

        assert!(bus.mapped_types().is_empty(), "empty names must not create routes");
    }

    #[test]
    fn test_mapped_types_are_sorted() {
        let bus = NotificationBus::new();
        bus.add_mapping("Zeta", "on_z");
        bus.add_mapping("Alpha", "on_a");
        bus.add_mapping("Mid", "on_m");

        let types = bus.mapped_types();
        let names: Vec<&str> = types.iter().map(NotificationType::as_str).collect();
        assert_eq!(names, ["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_fire_delivers_to_subscribers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = NotificationBus::new();
        bus.add_mapping("UserLoggedIn", "on_login");

        let audit = recorder("audit", &log);
        bus.subscribe(&audit, ["UserLoggedIn"]);
        bus.fire("UserLoggedIn", Arc::new(()));

        assert_eq!(log.lock().as_slice(), ["audit"]);
    }

    #[test]
    fn test_fire_unmapped_type_is_noop() {
        let bus = NotificationBus::new();
        bus.fire("Nope", Arc::new(()));
    }

    #[test]
    fn test_fire_without_subscribers_is_noop() {
        let bus = NotificationBus::new();
        bus.add_mapping("UserLoggedIn", "on_login");
        bus.fire("UserLoggedIn", Arc::new(()));
    }

    #[test]
    fn test_subscribe_to_unmapped_type_is_skipped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = NotificationBus::new();
        bus.add_mapping("UserLoggedIn", "on_login");

        let audit = recorder("audit", &log);
        bus.subscribe(&audit, ["Unmapped", "UserLoggedIn"]);
        bus.fire("UserLoggedIn", Arc::new(()));

        assert_eq!(
            log.lock().as_slice(),
            ["audit"],
            "the mapped type must still be subscribed when another is unmapped"
        );
    }

    #[test]
    fn test_has_any_subscriptions_follows_liveness() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = NotificationBus::new();
        bus.add_mapping("UserLoggedIn", "on_login");

        assert!(!bus.has_any_subscriptions("UserLoggedIn"), "no subscribers yet");
        assert!(!bus.has_any_subscriptions("Unmapped"));

        let audit = recorder("audit", &log);
        bus.subscribe(&audit, ["UserLoggedIn"]);
        assert!(bus.has_any_subscriptions("UserLoggedIn"));

        drop(audit);
        assert!(
            !bus.has_any_subscriptions("UserLoggedIn"),
            "dropped subscriber must not count as live"
        );
    }

    #[test]
    fn test_retarget_keeps_old_subscriptions_on_old_method() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = NotificationBus::new();
        bus.add_mapping("ConfigChanged", "on_login");

        let early = recorder("early", &log);
        bus.subscribe(&early, ["ConfigChanged"]);

        bus.add_mapping("ConfigChanged", "on_config_v2");
        bus.fire("ConfigChanged", Arc::new(()));
        assert!(
            log.lock().is_empty(),
            "after retargeting, fires must follow the new route only"
        );

        // The old subscription still dispatches for types that route to it.
        bus.add_mapping("LegacyConfigChanged", "on_login");
        bus.fire("LegacyConfigChanged", Arc::new(()));
        assert_eq!(log.lock().as_slice(), ["early"]);
    }

    #[test]
    fn test_shared_is_one_instance() {
        assert!(std::ptr::eq(
            NotificationBus::shared(),
            NotificationBus::shared()
        ));
    }
}
