//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, env/CLI overrides)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed to LbaasDriver at construction
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup; there is no runtime reconfiguration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, parse_config, ConfigError, ConfigOverrides};
pub use schema::{ControllerConfig, LogFormat, ObservabilityConfig, RelayConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
