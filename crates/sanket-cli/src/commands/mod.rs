//! Command implementations

mod enrich;
mod reference;
mod serve;

pub use enrich::{cmd_enrich, cmd_preview};
pub use reference::cmd_reference;
pub use serve::cmd_serve;
