//! Live editing model
//!
//! Stores for the selected process's diagram, the rules that keep them
//! consistent, and the registry, project, and session layers above them.

mod activity;
mod actor;
mod diagram;
mod edge_store;
mod extend;
mod node_store;
mod process;
mod project;
mod session;
mod topology;
mod transition;

pub use actor::*;
pub use diagram::*;
pub use edge_store::*;
pub use node_store::*;
pub use process::*;
pub use project::*;
pub use session::*;
pub use topology::*;
