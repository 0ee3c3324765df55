//! Engine modules: the part that actually changes the rendered tree.
//!
//! The engine sits between the resolver (which paths must go) and the
//! filesystem. It owns ordered, validated deletion plans.

pub mod prune;
