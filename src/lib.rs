//! cmdgen - resolve requested tools into shell commands
//!
//! A user config lists tool requests by type with named parameter values; a
//! tool catalog says how each type is invoked. Every request is matched to
//! the catalog entries of the same type and each entry's argument template is
//! rendered with the request's parameters, giving one command line per match.

pub mod error;
pub mod loader;
pub mod model;
pub mod render;
pub mod resolver;

pub use error::{CmdgenError, Result};
pub use loader::YamlDocument;
pub use model::{SystemConfig, SystemTool, SystemToolAction, UserConfig, UserTool};
pub use render::ArgsRenderer;
pub use resolver::{CommandResolver, ResolvedCommand};
