//! core
//!
//! Domain types, the rule store, the tiered resolution engine, and the
//! persistence gateway.

pub mod config;
pub mod detect;
pub mod paths;
pub mod persist;
pub mod resolve;
pub mod rules;
pub mod store;
pub mod synth;
pub mod types;
