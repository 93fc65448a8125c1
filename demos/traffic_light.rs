//! Traffic Light
//!
//! This example demonstrates a cyclic registry over a closed enumeration.
//!
//! Key concepts:
//! - Declaring states with `state_enum!`
//! - Registering every variant with `from_enum`
//! - Enter hooks reacting to specific states
//!
//! Run with: cargo run --example traffic_light

use hookstate::state_enum;
use hookstate::StateRegistry;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

fn next(light: TrafficLight) -> TrafficLight {
    match light {
        TrafficLight::Red => TrafficLight::Green,
        TrafficLight::Green => TrafficLight::Yellow,
        TrafficLight::Yellow => TrafficLight::Red,
    }
}

fn main() {
    println!("=== Traffic Light Registry ===\n");

    let mut light: StateRegistry<TrafficLight> =
        StateRegistry::from_enum(TrafficLight::Red).expect("every variant is registered");

    light
        .bind_enter(&TrafficLight::Red, |_, _| println!("  (Stop!)"))
        .expect("Red is registered");
    light
        .bind_enter(&TrafficLight::Green, |_, _| println!("  (Go!)"))
        .expect("Green is registered");
    light.bind_transition(|change| println!("{} -> {}", change.previous, change.next));

    for _ in 0..6 {
        let target = next(*light.current());
        light.set_state(target).expect("target is registered");
    }

    println!("\nVisited: {:?}", light.history().get_path());
    println!("\n=== Example Complete ===");
}
