//! # Names and payloads that flow through the bus.
//!
//! Routing is entirely name-based, so the two kinds of names get their own
//! newtypes:
//! - [`NotificationType`]: the symbolic name a notification is fired under
//!   (e.g. `"UserLoggedIn"`).
//! - [`MethodName`]: the handler name a notification type resolves to
//!   (e.g. `"on_user_logged_in"`).
//!
//! Keeping them distinct at the type level prevents mixing up the two sides
//! of the routing table (type → method → subscribers). Both wrap an
//! `Arc<str>`, so clones are cheap and values can be stored as map keys and
//! handed across threads freely.
//!
//! [`Payload`] is the opaque object reference that travels with every fire.
//! Handlers downcast it to the concrete type they expect.
//!
//! ## Example
//! ```rust
//! use notibus::{MethodName, NotificationType, Payload};
//! use std::sync::Arc;
//!
//! let ty = NotificationType::from("UserLoggedIn");
//! let method: MethodName = "on_user_logged_in".into();
//! assert_eq!(ty.as_str(), "UserLoggedIn");
//! assert_eq!(method.to_string(), "on_user_logged_in");
//!
//! let payload: Payload = Arc::new(String::from("jane"));
//! assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("jane"));
//! ```

use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Symbolic name for a category of notification.
///
/// Plain map-key semantics: any non-empty string is valid, and several
/// notification types may resolve to the same [`MethodName`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationType(Arc<str>);

/// Name of the handler method a subscriber exposes.
///
/// Acts as the dispatch key: every
/// [`Subscription`](crate::Subscription) fans out to the subscribers
/// registered under exactly one method name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodName(Arc<str>);

/// Opaque payload reference delivered to handlers.
///
/// The bus never inspects the payload; it clones the reference per fire and
/// passes it to every live subscriber. Handlers use `downcast_ref` to
/// recover the concrete type.
pub type Payload = Arc<dyn Any + Send + Sync>;

impl NotificationType {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty name, which the bus rejects in mappings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl MethodName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty name, which the bus rejects in mappings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationType {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for NotificationType {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&str> for MethodName {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for MethodName {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

// Lets `HashMap<NotificationType, _>` and `HashMap<MethodName, _>` be
// queried with plain `&str` keys.
impl Borrow<str> for NotificationType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MethodName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NotificationType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MethodName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_newtypes_are_distinct_map_keys() {
        let mut routes: HashMap<NotificationType, MethodName> = HashMap::new();
        routes.insert("UserLoggedIn".into(), "on_login".into());

        let hit = routes.get("UserLoggedIn");
        assert_eq!(
            hit.map(MethodName::as_str),
            Some("on_login"),
            "str lookup should find the mapped method"
        );
        assert!(routes.get("UserLoggedOut").is_none());
    }

    #[test]
    fn test_clone_is_cheap_and_equal() {
        let ty = NotificationType::from("ConfigChanged");
        let copy = ty.clone();
        assert_eq!(ty, copy);
        assert_eq!(copy.as_str(), "ConfigChanged");
    }

    #[test]
    fn test_empty_names_are_detected() {
        assert!(NotificationType::from("").is_empty());
        assert!(MethodName::from(String::new()).is_empty());
        assert!(!MethodName::from("on_ping").is_empty());
    }
}
