//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GuardConfig (validated, immutable)
//!     → consumed by ScreenplayReader::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require constructing a new reader
//! - All fields have defaults to allow minimal (or empty) configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BackendConfig;
pub use schema::BreakerConfig;
pub use schema::GuardConfig;
pub use schema::TimeoutConfig;
