mod error;
mod theme;
mod types;

pub use error::*;
pub use theme::*;
pub use types::*;
