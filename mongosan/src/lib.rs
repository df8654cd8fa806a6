// mongosan/src/lib.rs
//! # Mongosan CLI Application
//!
//! This crate provides the command-line front end for `mongosan-core`:
//! sanitizing JSON documents, scanning them for operator characters and
//! running the request adapter over JSON request envelopes.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
