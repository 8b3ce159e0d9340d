//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogSubscriber`] prints every delivery it receives to stdout in a
//! human-readable format. This is primarily useful for development,
//! debugging, and examples.
//!
//! ## Output format
//! ```text
//! [delivered] method=on_login payload="jane"
//! [delivered] method=on_unread_changed
//! ```
//! String payloads (`String` or `&str`) are shown inline; other payload
//! types print without a value.

use crate::subscribers::Subscriber;
use crate::types::{MethodName, Payload};

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Responds to every method name, so it
/// can be subscribed to any mapped notification type without further
/// wiring.
///
/// Not intended for production use - implement a custom [`Subscriber`] for
/// structured logging or metrics collection.
#[derive(Debug, Default)]
pub struct LogSubscriber;

impl Subscriber for LogSubscriber {
    fn responds_to(&self, _method: &MethodName) -> bool {
        true
    }

    fn call(&self, method: &MethodName, payload: &Payload) {
        match text_of(payload) {
            Some(text) => println!("[delivered] method={method} payload={text:?}"),
            None => println!("[delivered] method={method}"),
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}

fn text_of(payload: &Payload) -> Option<&str> {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_responds_to_everything() {
        let log = LogSubscriber;
        assert!(log.responds_to(&MethodName::from("on_anything")));
        assert!(log.responds_to(&MethodName::from("")));
    }

    #[test]
    fn test_text_of_handles_string_payloads() {
        assert_eq!(text_of(&(Arc::new(String::from("jane")) as Payload)), Some("jane"));
        assert_eq!(text_of(&(Arc::new("june") as Payload)), Some("june"));
        assert_eq!(text_of(&(Arc::new(42_u32) as Payload)), None);
    }
}
