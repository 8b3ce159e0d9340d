//! Declarative construction of a wired [`NotificationBus`].

use std::sync::Arc;

use crate::error::BusError;
use crate::registry::bus::{DropHook, NotificationBus};
use crate::subscribers::SubscriberRef;
use crate::types::{MethodName, NotificationType};

/// Builder collecting mappings, subscribers and diagnostics before the bus
/// exists.
///
/// `build` applies all mappings first and subscribers second, so a
/// subscriber may be declared before the mapping it relies on.
///
/// ## Example
/// ```rust
/// use notibus::{HandlerMap, NotificationBus, Payload};
///
/// let audit = HandlerMap::new("audit")
///     .on("on_login", |_: &Payload| {})
///     .arc();
///
/// let bus = NotificationBus::builder()
///     .with_mapping("UserLoggedIn", "on_login")
///     .subscribe(&audit, ["UserLoggedIn"])
///     .build();
///
/// assert!(bus.has_any_subscriptions("UserLoggedIn"));
/// ```
pub struct BusBuilder {
    mappings: Vec<(NotificationType, MethodName)>,
    subscribers: Vec<(SubscriberRef, Vec<NotificationType>)>,
    drop_hook: Option<DropHook>,
}

impl BusBuilder {
    pub(crate) fn new() -> Self {
        Self {
            mappings: Vec::new(),
            subscribers: Vec::new(),
            drop_hook: None,
        }
    }

    /// Adds a notification type → method route.
    ///
    /// Declaring the same type twice keeps the later route, matching
    /// [`NotificationBus::add_mapping`].
    pub fn with_mapping(
        mut self,
        notification_type: impl Into<NotificationType>,
        method: impl Into<MethodName>,
    ) -> Self {
        self.mappings.push((notification_type.into(), method.into()));
        self
    }

    /// Registers `subscriber` for the given notification types once the
    /// bus is built.
    pub fn subscribe(
        mut self,
        subscriber: &SubscriberRef,
        types: impl IntoIterator<Item = impl Into<NotificationType>>,
    ) -> Self {
        self.subscribers.push((
            Arc::clone(subscriber),
            types.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Installs a sink observing every silent drop (unmapped types,
    /// ineligible or duplicate subscribers, dead references).
    ///
    /// The hook runs on the thread that hit the drop, after the bus has
    /// released its internal locks. Keep it quick; one sink per bus.
    pub fn with_drop_hook(mut self, hook: impl Fn(&BusError) + Send + Sync + 'static) -> Self {
        self.drop_hook = Some(Arc::new(hook));
        self
    }

    /// Builds the bus: installs the hook, applies mappings in declaration
    /// order, then runs the collected subscribes.
    ///
    /// Subscribes that reference a type no mapping covers are dropped
    /// silently, visible to the hook like any other drop.
    pub fn build(self) -> NotificationBus {
        let bus = NotificationBus::new_with_hook(self.drop_hook);
        for (ty, method) in self.mappings {
            bus.add_mapping(ty, method);
        }
        for (subscriber, types) in self.subscribers {
            bus.subscribe(&subscriber, types.iter().map(NotificationType::as_str));
        }
        bus
    }
}
