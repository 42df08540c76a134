//! Common test utilities for cartoee.
//!
//! Shared assertions, image helpers, and in-memory collaborators.
#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod mocks;
