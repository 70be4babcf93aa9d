//! Infrastructure layer for the overlay.
//!
//! Contains OS-facing adapters: the global input hook, lock-key LED probes,
//! configuration file loading, icon decoding and the egui window.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `inputmon_core`, but MUST NOT be imported by the domain crate.

pub mod icons;
pub mod input_capture;
pub mod lock_state;
pub mod storage;
pub mod ui_bridge;
