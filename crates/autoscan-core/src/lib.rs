pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod prelude;
pub mod rewrite;
pub mod server;
pub mod target;
pub mod version;

pub use config::*;
pub use error::*;
pub use library::*;
pub use target::*;
