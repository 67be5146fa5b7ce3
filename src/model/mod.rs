//! Data model - user tool requests and the system tool catalog
//!
//! Both documents share one parameter shape, see [`Parameter`].

mod parameter;
mod system;
mod user;

pub use parameter::{ParamRequirement, ParamValue, Parameter, SystemParam, UserParam};
pub use system::{SystemConfig, SystemTool, SystemToolAction};
pub use user::{UserConfig, UserTool};
