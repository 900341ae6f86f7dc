//! Domain models for amdctl
//!
//! This module contains the typed values read from and written to device
//! attributes. Types are validated on construction (fail-fast pattern).

pub mod clock;
pub mod gpu;
pub mod performance;
pub mod power;

pub use clock::{ClockKind, ClockLevel, ClockSelection, ClockSpeed, FrequencyTable};
pub use gpu::DeviceInfo;
pub use performance::{BusyPercent, MemoryInfo, OverDriveLevel, PerformanceLevel};
pub use power::{PowerProfile, PowerProfileTable};
