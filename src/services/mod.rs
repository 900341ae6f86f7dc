//! Service layer for GPU control operations
//!
//! Services compose attribute reads and writes into control operations and
//! status snapshots.

pub mod perf_service;
pub mod query;

pub use perf_service::{OverDriveTarget, PerfService};
pub use query::{device_info, device_status, optional, DeviceStatus};
