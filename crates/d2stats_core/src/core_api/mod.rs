mod engine;
mod error;
mod types;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode, RenderError};
pub use types::{
    Breakpoints, DisplayAttributes, DisplayStats, Keys, Resistances, SpeedRunItems,
};
