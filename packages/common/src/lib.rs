//! Common infrastructure shared by the passhash crates
//!
//! Currently this is the logging layer: `env_logger` initialisation and
//! helpers that keep passwords, salts and digests out of log output.

pub mod logging;

pub use logging::LoggingTransformer;
