//! pcsell Core
//!
//! Core library for declarative partner onboarding: configuration parsing,
//! schemas, diffing and effect interpretation. Side effects are values until
//! an Interpreter runs them against a Provider.

pub mod differ;
pub mod effect;
pub mod interpreter;
pub mod parser;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod schema;
