//! Logic modules: translate configuration choices into concrete actions.
//!
//! # Modules
//!
//! - `rules`: the static removal directive table and its integrity check
//! - `resolver`: evaluates the table against a configuration and prunes the tree

pub mod resolver;
pub mod rules;
