//! # Channel Bridge Example
//!
//! Shows `ChannelSubscriber` moving deliveries off the firing thread: the
//! bus side stays synchronous while a worker drains the channel at its own
//! pace. Requires the `crossbeam` feature.
//!
//! ## Run
//! ```bash
//! cargo run --example channel_bridge --features crossbeam
//! ```

use std::sync::Arc;
use std::thread;

use notibus::{ChannelSubscriber, NotificationBus, SubscriberRef};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bus = NotificationBus::new();
    bus.add_mapping("SensorReading", "on_sensor_reading");

    let (bridge, deliveries) = ChannelSubscriber::bounded("bridge", 32);
    let bridge: SubscriberRef = bridge;
    bus.subscribe(&bridge, ["SensorReading"]);

    let consumer = thread::spawn(move || {
        // recv() returns Err once every sender is gone.
        while let Ok((method, payload)) = deliveries.recv() {
            let value = payload.downcast_ref::<f64>().copied().unwrap_or(f64::NAN);
            println!(" ├─► consumer: {method} value={value:.2}");
        }
        println!(" └─► channel closed, consumer exits");
    });

    for reading in [20.5, 20.7, 21.3, 22.0] {
        bus.fire("SensorReading", Arc::new(reading));
    }

    // Dropping the subscriber closes the channel and ends the consumer.
    drop(bridge);
    drop(bus);
    consumer.join().expect("consumer thread panicked");
}
