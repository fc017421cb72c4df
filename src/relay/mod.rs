//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! Framework callback (create/update/delete/refresh/stats)
//!     → driver.rs (picks the manager for the resource kind)
//!     → manager.rs (instrumentation, envelope, method choice)
//!     → path.rs (pure path construction, fails before any I/O)
//!     → client.rs (one HTTP request, Basic auth, JSON body)
//!     → 2xx = Ok, anything else = RelayError to the caller
//! ```
//!
//! # Design Decisions
//! - One generic manager, parameterized by resource kind
//! - No retries, no queueing, no local state beyond immutable config
//! - Compensating action on failure belongs to the caller

pub mod client;
pub mod driver;
pub mod error;
pub mod manager;
pub mod path;

pub use client::ControllerClient;
pub use driver::LbaasDriver;
pub use error::{RelayError, RelayResult};
pub use manager::{Operation, OperationContext, PlannedRequest, ResourceManager, UnknownOperation};
pub use path::ResourcePath;
