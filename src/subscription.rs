//! # Per-method fan-out list (`Subscription`)
//!
//! A [`Subscription`] owns the ordered set of weak subscriber references
//! routed to a single method name, and performs the synchronous fan-out
//! over them when a notification fires.
//!
//! ## Architecture
//! ```text
//! call_on_references(payload)
//!     │ snapshot slots under lock, invoke outside it
//!     ├──► upgrade(slot 0) ──► subscriber.call(method, payload)
//!     ├──► upgrade(slot 1) ──► (dropped → skip)
//!     └──► upgrade(slot 2) ──► subscriber.call(method, payload)
//! ```
//!
//! ## Rules
//! - **Insertion order is delivery order**: fires walk the list front to
//!   back, and each handler completes before the next begins.
//! - **No duplicates**: a subscriber appears at most once per method,
//!   compared by reference identity, never by name or contents.
//! - **Weak references only**: the list never keeps a subscriber alive.
//!   Slots whose subscriber was dropped are skipped at dispatch and pruned
//!   the next time a reference is appended.
//! - **No removal API**: subscribers leave by being dropped.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use notibus::{HandlerMap, Payload, Subscription};
//!
//! let subscription = Subscription::new("on_ping".into());
//! let probe = HandlerMap::new("probe").on("on_ping", |_: &Payload| {}).arc();
//!
//! assert!(subscription.can_add_reference(&probe));
//! subscription.add_reference(&probe);
//! assert!(subscription.has_any_subscriptions());
//!
//! subscription.call_on_references(&(Arc::new(()) as Payload));
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::BusError;
use crate::subscribers::Subscriber;
use crate::types::{MethodName, Payload};

/// Ordered, weakly-held fan-out list for one method name.
///
/// Usually created and owned by the bus (one per mapped method); it can
/// also be used standalone when no routing table is needed.
pub struct Subscription {
    method: MethodName,
    refs: Mutex<Vec<Weak<dyn Subscriber>>>,
}

impl Subscription {
    /// Creates an empty subscription dispatching to `method`.
    pub fn new(method: MethodName) -> Self {
        Self {
            method,
            refs: Mutex::new(Vec::new()),
        }
    }

    /// Returns the method name this subscription dispatches to.
    pub fn method(&self) -> &MethodName {
        &self.method
    }

    /// Returns whether `candidate` may be appended.
    ///
    /// True iff the candidate responds to this subscription's method and is
    /// not already present (by reference identity). This is the sole
    /// gatekeeping and deduplication point.
    ///
    /// ### Notes
    /// The check/commit split is part of the contract:
    /// [`add_reference`](Self::add_reference) does not re-validate. The bus
    /// runs both steps under one lock; standalone callers that skip the
    /// check own the resulting duplicates.
    pub fn can_add_reference(&self, candidate: &Arc<dyn Subscriber>) -> bool {
        candidate.responds_to(&self.method) && !contains(&self.refs.lock(), candidate)
    }

    /// Appends a weak reference to `candidate` at the end of the list.
    ///
    /// Eligibility and deduplication are
    /// [`can_add_reference`](Self::can_add_reference)'s job; this method
    /// appends unconditionally. Dead slots are pruned while the lock is
    /// held, so the list length stays proportional to live subscribers.
    pub fn add_reference(&self, candidate: &Arc<dyn Subscriber>) {
        let mut refs = self.refs.lock();
        refs.retain(|slot| slot.strong_count() > 0);
        refs.push(Arc::downgrade(candidate));
    }

    /// Returns true when at least one live subscriber remains.
    ///
    /// Liveness is re-checked on every call: dead slots do not count, and
    /// no cached flag is kept.
    pub fn has_any_subscriptions(&self) -> bool {
        self.refs.lock().iter().any(|slot| slot.strong_count() > 0)
    }

    /// Number of slots currently held, dead ones included.
    pub fn len(&self) -> usize {
        self.refs.lock().len()
    }

    /// True when no slots are held at all.
    pub fn is_empty(&self) -> bool {
        self.refs.lock().is_empty()
    }

    /// Invokes this subscription's method on every live subscriber in
    /// insertion order, passing `payload` to each.
    ///
    /// The slot list is snapshotted under the lock and handlers run outside
    /// it, so a handler may re-enter the bus or this subscription freely; a
    /// reference added during the fan-out is first seen by the next fire.
    /// Dead slots are skipped and left in place.
    pub fn call_on_references(&self, payload: &Payload) {
        self.call_with_report(payload, &|_| {});
    }

    /// Fan-out with a sink for per-slot drop reports, used by the bus to
    /// feed its diagnostics.
    pub(crate) fn call_with_report(&self, payload: &Payload, report: &dyn Fn(&BusError)) {
        let snapshot: Vec<Weak<dyn Subscriber>> = self.refs.lock().clone();
        for slot in &snapshot {
            match slot.upgrade() {
                Some(subscriber) => subscriber.call(&self.method, payload),
                None => report(&BusError::DeadSubscriber {
                    method: self.method.clone(),
                }),
            }
        }
    }

    /// Atomic eligibility check + append for the bus's subscribe path.
    ///
    /// Holds the slot lock across check and commit, so two concurrent
    /// subscribes of the same object cannot both pass the duplicate check.
    pub(crate) fn try_add(&self, candidate: &Arc<dyn Subscriber>) -> Result<(), BusError> {
        if !candidate.responds_to(&self.method) {
            return Err(BusError::IneligibleSubscriber {
                subscriber: candidate.name().to_string(),
                method: self.method.clone(),
            });
        }
        let mut refs = self.refs.lock();
        if contains(&refs, candidate) {
            return Err(BusError::DuplicateSubscription {
                subscriber: candidate.name().to_string(),
                method: self.method.clone(),
            });
        }
        refs.retain(|slot| slot.strong_count() > 0);
        refs.push(Arc::downgrade(candidate));
        Ok(())
    }
}

/// Reference-identity membership test.
///
/// Compares the allocation addresses as thin pointers, so two handles to
/// the same object always match regardless of vtable. A dead slot can never
/// equal a live candidate: the slot's weak count keeps its allocation from
/// being reused.
fn contains(refs: &[Weak<dyn Subscriber>], candidate: &Arc<dyn Subscriber>) -> bool {
    let target = Arc::as_ptr(candidate) as *const ();
    refs.iter().any(|slot| slot.as_ptr() as *const () == target)
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex as PlainMutex;

    use super::*;
    use crate::subscribers::{HandlerMap, SubscriberRef};

    fn recorder(label: &'static str, log: &Arc<PlainMutex<Vec<&'static str>>>) -> SubscriberRef {
        let log = Arc::clone(log);
        HandlerMap::new(label)
            .on("on_ping", move |_: &Payload| log.lock().push(label))
            .arc()
    }

    fn unit_payload() -> Payload {
        Arc::new(())
    }

    #[test]
    fn test_can_add_requires_matching_method() {
        let subscription = Subscription::new("on_ping".into());
        let responder = HandlerMap::new("yes").on("on_ping", |_: &Payload| {}).arc();
        let stranger = HandlerMap::new("no").on("on_pong", |_: &Payload| {}).arc();

        assert!(subscription.can_add_reference(&responder));
        assert!(
            !subscription.can_add_reference(&stranger),
            "object without the handler must be rejected"
        );
    }

    #[test]
    fn test_can_add_rejects_already_present() {
        let subscription = Subscription::new("on_ping".into());
        let sub = HandlerMap::new("once").on("on_ping", |_: &Payload| {}).arc();

        assert!(subscription.can_add_reference(&sub));
        subscription.add_reference(&sub);
        assert!(
            !subscription.can_add_reference(&sub),
            "same object must not be addable twice"
        );

        let twin = HandlerMap::new("once").on("on_ping", |_: &Payload| {}).arc();
        assert!(
            subscription.can_add_reference(&twin),
            "identity is by reference, a same-named distinct object is fine"
        );
    }

    #[test]
    fn test_delivery_follows_insertion_order() {
        let log = Arc::new(PlainMutex::new(Vec::new()));
        let subscription = Subscription::new("on_ping".into());

        let first = recorder("first", &log);
        let second = recorder("second", &log);
        let third = recorder("third", &log);
        for sub in [&first, &second, &third] {
            subscription.add_reference(sub);
        }

        subscription.call_on_references(&unit_payload());
        assert_eq!(
            log.lock().as_slice(),
            ["first", "second", "third"],
            "fan-out must walk slots front to back"
        );
    }

    #[test]
    fn test_dropped_subscriber_is_skipped() {
        let log = Arc::new(PlainMutex::new(Vec::new()));
        let subscription = Subscription::new("on_ping".into());

        let keep = recorder("keep", &log);
        let gone = recorder("gone", &log);
        subscription.add_reference(&keep);
        subscription.add_reference(&gone);

        drop(gone);
        subscription.call_on_references(&unit_payload());

        assert_eq!(log.lock().as_slice(), ["keep"], "dead slot must be skipped");
        assert_eq!(subscription.len(), 2, "dispatch itself does not prune");
    }

    #[test]
    fn test_add_reference_prunes_dead_slots() {
        let subscription = Subscription::new("on_ping".into());

        let short_lived = HandlerMap::new("gone").on("on_ping", |_: &Payload| {}).arc();
        subscription.add_reference(&short_lived);
        drop(short_lived);
        assert_eq!(subscription.len(), 1);

        let fresh = HandlerMap::new("fresh").on("on_ping", |_: &Payload| {}).arc();
        subscription.add_reference(&fresh);
        assert_eq!(subscription.len(), 1, "append should drop the dead slot");
        assert!(subscription.has_any_subscriptions());
    }

    #[test]
    fn test_has_any_subscriptions_tracks_liveness() {
        let subscription = Subscription::new("on_ping".into());
        assert!(!subscription.has_any_subscriptions());

        let sub = HandlerMap::new("live").on("on_ping", |_: &Payload| {}).arc();
        subscription.add_reference(&sub);
        assert!(subscription.has_any_subscriptions());

        drop(sub);
        assert!(
            !subscription.has_any_subscriptions(),
            "no live slots means no subscriptions, dead slots do not count"
        );
        assert!(!subscription.is_empty(), "the dead slot is still stored");
    }

    #[test]
    fn test_try_add_reports_each_rejection() {
        let subscription = Subscription::new("on_ping".into());
        let sub = HandlerMap::new("dup").on("on_ping", |_: &Payload| {}).arc();
        let stranger = HandlerMap::new("other").on("on_pong", |_: &Payload| {}).arc();

        assert!(subscription.try_add(&sub).is_ok());
        let dup = subscription.try_add(&sub).unwrap_err();
        assert_eq!(dup.as_label(), "duplicate_subscription");

        let ineligible = subscription.try_add(&stranger).unwrap_err();
        assert_eq!(ineligible.as_label(), "ineligible_subscriber");
        assert_eq!(subscription.len(), 1, "rejections must not grow the list");
    }

    #[test]
    fn test_reference_added_during_fanout_waits_for_next_fire() {
        let log = Arc::new(PlainMutex::new(Vec::new()));
        let subscription = Arc::new(Subscription::new("on_ping".into()));
        let late = recorder("late", &log);

        let adder = {
            let subscription = Arc::clone(&subscription);
            let log = Arc::clone(&log);
            let late = late.clone();
            HandlerMap::new("adder")
                .on("on_ping", move |_: &Payload| {
                    log.lock().push("adder");
                    if subscription.can_add_reference(&late) {
                        subscription.add_reference(&late);
                    }
                })
                .arc()
        };
        subscription.add_reference(&adder);

        subscription.call_on_references(&unit_payload());
        assert_eq!(
            log.lock().as_slice(),
            ["adder"],
            "a reference added mid-fire joins the next round"
        );

        subscription.call_on_references(&unit_payload());
        assert_eq!(log.lock().as_slice(), ["adder", "adder", "late"]);
    }

    #[test]
    fn test_dead_slots_are_reported_to_sink() {
        let subscription = Subscription::new("on_ping".into());
        let gone = HandlerMap::new("gone").on("on_ping", |_: &Payload| {}).arc();
        subscription.add_reference(&gone);
        drop(gone);

        let reports = PlainMutex::new(Vec::new());
        subscription.call_with_report(&unit_payload(), &|err| {
            reports.lock().push(err.as_label());
        });
        assert_eq!(reports.lock().as_slice(), ["dead_subscriber"]);
    }
}
