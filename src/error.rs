//! Error types describing why the bus dropped a notification or subscription.
//!
//! The bus is best-effort by contract: no public operation returns an error
//! or panics, and every failure degrades to "not delivered". [`BusError`]
//! classifies those silent drops so hosts can still observe them, either
//! through the drop hook
//! ([`BusBuilder::with_drop_hook`](crate::BusBuilder::with_drop_hook)) or
//! through the `tracing` events the bus emits on the same paths.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics and [`BusError::is_wiring`] to separate mis-wiring from
//! ordinary weak-reference lifecycle.

use thiserror::Error;

use crate::types::{MethodName, NotificationType};

/// # Reasons a notification or subscription was silently dropped.
///
/// Values are reported to diagnostics sinks only; they are never returned
/// to callers and never abort an operation.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum BusError {
    /// `subscribe` or `fire` named a notification type that was never
    /// registered via `add_mapping`.
    #[error("no mapping for notification type \"{notification_type}\"")]
    UnmappedType {
        /// The notification type that had no route.
        notification_type: NotificationType,
    },

    /// A subscribe candidate does not respond to the method its
    /// notification type resolves to.
    #[error("subscriber \"{subscriber}\" does not respond to \"{method}\"")]
    IneligibleSubscriber {
        /// Diagnostic name of the rejected subscriber.
        subscriber: String,
        /// The method the route resolved to.
        method: MethodName,
    },

    /// A subscribe candidate is already present for that method.
    #[error("subscriber \"{subscriber}\" is already subscribed for \"{method}\"")]
    DuplicateSubscription {
        /// Diagnostic name of the rejected subscriber.
        subscriber: String,
        /// The method the route resolved to.
        method: MethodName,
    },

    /// A previously subscribed object had been dropped by the time a fire
    /// reached its slot; the slot was skipped.
    #[error("dropped subscriber skipped while dispatching \"{method}\"")]
    DeadSubscriber {
        /// The method being dispatched when the dead slot was found.
        method: MethodName,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use notibus::BusError;
    ///
    /// let err = BusError::UnmappedType { notification_type: "UserLoggedIn".into() };
    /// assert_eq!(err.as_label(), "unmapped_type");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::UnmappedType { .. } => "unmapped_type",
            BusError::IneligibleSubscriber { .. } => "ineligible_subscriber",
            BusError::DuplicateSubscription { .. } => "duplicate_subscription",
            BusError::DeadSubscriber { .. } => "dead_subscriber",
        }
    }

    /// Returns a human-readable message with details about the drop.
    pub fn as_message(&self) -> String {
        match self {
            BusError::UnmappedType { notification_type } => {
                format!("unmapped type: {notification_type}")
            }
            BusError::IneligibleSubscriber { subscriber, method } => {
                format!("ineligible: {subscriber} for {method}")
            }
            BusError::DuplicateSubscription { subscriber, method } => {
                format!("duplicate: {subscriber} for {method}")
            }
            BusError::DeadSubscriber { method } => format!("dead subscriber: {method}"),
        }
    }

    /// Indicates whether the drop points at a wiring mistake.
    ///
    /// Returns `true` for [`BusError::UnmappedType`],
    /// [`BusError::IneligibleSubscriber`] and
    /// [`BusError::DuplicateSubscription`], which usually mean the host
    /// wired names up wrong. Returns `false` for
    /// [`BusError::DeadSubscriber`], which is the expected consequence of
    /// weak references outliving their subscriber.
    ///
    /// # Example
    /// ```
    /// use notibus::BusError;
    ///
    /// let wiring = BusError::UnmappedType { notification_type: "Nope".into() };
    /// assert!(wiring.is_wiring()); // true
    ///
    /// let lifecycle = BusError::DeadSubscriber { method: "on_ping".into() };
    /// assert!(!lifecycle.is_wiring()); // false
    /// ```
    pub fn is_wiring(&self) -> bool {
        !matches!(self, BusError::DeadSubscriber { .. })
    }
}
