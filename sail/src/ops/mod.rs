//! Core operations.
//!
//! This module contains the business logic for go-sail commands,
//! separated from CLI argument parsing and output rendering.

pub mod clone;
pub mod create;
pub mod process;
pub mod toolchain;

pub use create::{CreateError, CreateOptions, create};
