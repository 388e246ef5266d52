//! Core library for jirascope
//!
//! This crate implements the **Functional Core** of the jirascope adapter,
//! following the Functional Core - Imperative Shell pattern:
//!
//! - **`jirascope_core`** (this crate): pure transformation functions with
//!   zero I/O — pagination normalization, field projection, parameter
//!   validation, and the error taxonomy.
//! - **`jirascope`**: the imperative shell — HTTP transport, operation
//!   dispatch, CLI, and the MCP server.
//!
//! Everything here is deterministic and testable with fixture data; no
//! network, filesystem, or clock access anywhere in this crate.

pub mod error;
pub mod jira;
pub mod pagination;
pub mod projection;
pub mod validate;
