pub mod context;
pub mod error;
pub mod library;

pub use context::AppContext;
pub use error::{Result, SajadahError};
pub use library::LiveLibrary;
