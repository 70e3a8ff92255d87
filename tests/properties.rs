//! Property tests for Tilde.
//!
//! Properties use randomized input generation to protect the invariants the
//! watch engine relies on: a total priority order, deterministic
//! aggregation, and a loop that only ever hands back a cancel.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/strategies.rs"]
mod strategies;

#[path = "properties/action_order.rs"]
mod action_order;

#[path = "properties/aggregator.rs"]
mod aggregator;

#[path = "properties/watch_loop.rs"]
mod watch_loop;

#[path = "properties/termination.rs"]
mod termination;
