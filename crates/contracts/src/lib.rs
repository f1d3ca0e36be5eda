//! # Contracts
//!
//! Frozen interface contracts shared by every fanlog crate.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Every record is stamped with a UTC wall-clock timestamp at dispatch time

mod channel;
mod config;
mod error;
mod message;
mod record;
mod severity;
mod sink;

pub use channel::*;
pub use config::*;
pub use error::*;
pub use message::*;
pub use record::*;
pub use severity::{threshold, Severity};
pub use sink::*;
