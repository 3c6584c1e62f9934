//! Configuration loaded from the vault root.

pub mod settings;

pub use settings::{resolve_root, Settings};
