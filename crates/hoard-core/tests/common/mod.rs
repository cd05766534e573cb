//! Common test infrastructure for hoard-core tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
