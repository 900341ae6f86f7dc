//! sysfs attribute access layer
//!
//! Table-driven reads and writes of the per-device files the amdgpu driver
//! exposes under `/sys/class/drm/cardN/device/`.

pub mod attribute;
pub mod capability;
pub mod device;
pub mod monitor;

pub use attribute::{AttributeSpec, Codec, DevInfoType, NumberFormat, WriteRule, ATTRIBUTE_TABLE};
pub use capability::{EventGroup, SupportedFuncMap, DEFAULT_VARIANT};
pub use device::{Device, DeviceEnv};
pub use monitor::{Monitor, PowerMonitor};
