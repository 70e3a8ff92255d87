//! Domain Layer
//!
//! The watch decision engine - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Actions and file events
//! - `value_objects/` - Immutable value types (Fingerprint, Iteration)
//! - `services/` - Aggregator and keystroke parser
//! - `policies/` - Event-to-action policies and debounce timing
//! - `ports/` - Interface definitions for the host and infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or terminal directly
//! 2. **Pure Functions** - Policies and services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
