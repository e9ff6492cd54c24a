//! Domain types shared by the fleetdoc engine, its service adapters and the CLI.
//!
//! Nothing in this crate performs I/O: profiles, targets, documents and tasks are
//! plain values that the engine moves between components.

mod domain;
pub use domain::*;

mod kind;
pub use kind::OperationKind;

mod task;
pub use task::*;
