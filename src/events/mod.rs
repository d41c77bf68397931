//! Event handling module.
//!
//! Terminal key events are polled on a dedicated thread and dispatched to
//! controller methods on the main thread.

pub mod terminal;
