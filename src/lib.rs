//! amdctl - sysfs-based AMD GPU control library
//!
//! This library provides table-driven access to the per-device attribute
//! files of the amdgpu driver, plus the performance, clock and power
//! profile controls built on top of them.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`services`]: Control operations and status queries
//! - [`sysfs`]: Attribute table and device file access

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod sysfs;

pub use error::{AppError, Result};
