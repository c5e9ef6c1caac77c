//! Curbside - tiered ZIP-code lookup for local disposal and recycling rules
//!
//! Curbside answers "how do I dispose of this, here?" by resolving a
//! 5-digit ZIP code against a hierarchical rules store with an ordered
//! fallback: exact code, then city, then state, then 3-digit region
//! prefix, then a national default. The store is maintained through
//! explicit scoped edit operations and persisted as a single JSON
//! document.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to core)
//! - [`core`] - Domain types, rule store, resolution engine, persistence
//! - [`geo`] - Single interface for the external ZIP-to-place capability
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. Scope keys are validated at construction; invalid keys are
//!    unrepresentable
//! 2. All store edits flow through explicit mutation operations
//! 3. Resolution is pure: fixed store + fixed code = fixed result
//! 4. The persisted document always carries all four partitions

pub mod cli;
pub mod core;
pub mod geo;
pub mod ui;
