//! Application layer use cases for the overlay.
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules in `inputmon-core`) and the infrastructure (OS hooks, windowing,
//! files).  Use cases here orchestrate domain objects and contain no OS calls.
//!
//! # Sub-modules
//!
//! - **`monitor_input`** – Folds captured keyboard and mouse events into the
//!   overlay's display state.  Runs on the UI thread for every event.

pub mod monitor_input;
