//! Data-driven ability content and loaders.
//!
//! This crate turns RON ability-catalog files into a validated
//! [`battle_core::AbilityRegistry`]. All structural validation happens here,
//! at load time: a malformed pattern is an integration error that fails
//! fast, never a gameplay-time failure inside the rules engine.

pub mod loaders;

pub use loaders::{AbilityLoader, LoadResult};
