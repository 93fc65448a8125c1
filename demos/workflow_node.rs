//! Workflow Node
//!
//! This example embeds a registry inside an owning object and uses the
//! context object to tell observers which owner changed state.
//!
//! Key concepts:
//! - Builder construction with a context object
//! - Global, exit and enter hooks and their dispatch order
//! - Rejected operations returning errors instead of panicking
//!
//! Run with: cargo run --example workflow_node

use hookstate::{RegistryBuilder, StateRegistry};

struct WorkflowNode {
    state: StateRegistry<&'static str, String>,
}

impl WorkflowNode {
    fn new(name: &str) -> Self {
        let state = RegistryBuilder::new()
            .states(["Idle", "Running", "Done"])
            .initial("Idle")
            .protect("Idle")
            .context(name.to_string())
            .on_transition(|change| {
                let owner = change.sender.map(String::as_str).unwrap_or("?");
                println!("[{owner}] {} -> {}", change.previous, change.next);
            })
            .build()
            .expect("static configuration is valid");

        Self { state }
    }

    fn run(&mut self) {
        self.state.set_state("Running").expect("Running is registered");
        self.state.set_state("Done").expect("Done is registered");
    }
}

fn main() {
    println!("=== Workflow Node ===\n");

    let mut node = WorkflowNode::new("extract");

    node.state
        .bind_exit(&"Idle", |next, owner| {
            println!("  leaving Idle for {next} (owner {owner:?})")
        })
        .expect("Idle is registered");
    node.state
        .bind_enter(&"Done", |previous, _| println!("  finished after {previous}"))
        .expect("Done is registered");

    node.run();

    println!("\nRejected operations:");
    if let Err(error) = node.state.set_state("Paused") {
        println!("  set_state: {error}");
    }
    if let Err(error) = node.state.remove_state(&"Done") {
        println!("  remove_state: {error}");
    }
    if let Err(error) = node.state.remove_state(&"Idle") {
        println!("  remove_state: {error}");
    }

    println!("\nTransitions recorded: {}", node.state.history().len());
    println!("\n=== Example Complete ===");
}
