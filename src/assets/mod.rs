//! Asset loading
//!
//! - [`AssetServer`]: resolves asset names and starts background loads
//! - [`PendingModel`]: pollable handle reporting progress and the result
//! - [`ModelDocument`]: parsed node hierarchy, instantiated into a scene

pub mod document;
pub mod io;
pub mod server;

pub use document::{MeshInfo, ModelDocument, ModelNode};
pub use io::AssetSource;
pub use server::{AssetServer, LoadEvent, LoadProgress, PendingModel};
