//! skelly-lib: Core logic for skelly
//!
//! This crate provides the pieces behind the `skelly` binary:
//! - `manifest`: YAML manifest loading and shape validation
//! - `expand`: brace-group path pattern expansion
//! - `apply`: idempotent filesystem materialization and the action log

pub mod apply;
pub mod expand;
pub mod manifest;
