//! Storage infrastructure: configuration file loading.
//!
//! The overlay keeps no runtime state on disk; the only file it reads is the
//! optional TOML configuration handled by [`config`].

pub mod config;
