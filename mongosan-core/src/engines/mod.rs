// mongosan-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.
//!
//! To add a new engine, create a new file in this directory, implement the
//! trait and declare it here with `pub mod <engine_name>;`.

pub mod operator_engine;
