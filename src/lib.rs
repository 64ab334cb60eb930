pub mod adapters;
pub mod config;
pub mod driver;
pub mod error;
pub mod kernel;
pub mod ports;

// Re-export specific items if needed for convenient access
pub use driver::Driver;
pub use error::{Error, Result};
pub use kernel::controller::DialogueController;
