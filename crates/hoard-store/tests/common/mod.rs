//! Common test infrastructure for hoard-store tests
//!
//! # Modules
//!
//! - `memory_store`: in-memory `SecretStore` that records API calls
//! - `fixtures`: certificate fixtures and record builders

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod memory_store;

pub use fixtures::*;
pub use memory_store::*;
