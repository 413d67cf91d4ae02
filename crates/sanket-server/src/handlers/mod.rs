//! HTTP request handlers organized by domain

pub mod export;
pub mod merge;
pub mod reference;
pub mod upload;

// Re-export all handlers for use in router
pub use export::*;
pub use merge::*;
pub use reference::*;
pub use upload::*;
