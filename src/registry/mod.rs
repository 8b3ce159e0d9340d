//! Registry core: routing table, subscription store and wiring.
//!
//! The public API from this module is [`NotificationBus`], the central
//! type → method → subscribers registry, and [`BusBuilder`] for declarative
//! construction.
//!
//! Internal modules:
//! - [`bus`]: the two-level registry and its fire/subscribe paths;
//! - [`builder`]: collects mappings, subscribers and the drop hook up front.

mod builder;
mod bus;

pub use builder::BusBuilder;
pub use bus::NotificationBus;
