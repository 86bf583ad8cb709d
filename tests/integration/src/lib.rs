//! Integration test utilities for the reservation engine
//!
//! This crate provides helpers for driving the engine end to end, from a
//! bearer token through the service layer to a store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
