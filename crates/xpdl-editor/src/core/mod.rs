//! Core data model for process diagrams
//!
//! This module defines the entity shapes, identifier allocation, the entity
//! factory, and the store trait every live store implements.

pub mod audit;
mod config;
mod entity;
mod error;
pub mod factory;
pub mod ids;
pub mod logging;
mod store;
mod types;

pub use config::*;
pub use entity::*;
pub use error::*;
pub use logging::*;
pub use store::*;
pub use types::*;
