//! Device status queries
//!
//! Gathers a snapshot of a device's attributes. Attributes the driver does
//! not expose are reported as absent rather than failing the whole query.

use crate::domain::{BusyPercent, DeviceInfo, MemoryInfo, PerformanceLevel};
use crate::error::DevInfoError;
use crate::sysfs::{DevInfoType, Device};

use serde::Serialize;

/// Point-in-time view of a device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStatus {
    pub info: DeviceInfo,
    pub perf_level: Option<PerformanceLevel>,
    pub overdrive_percent: Option<u64>,
    pub gpu_busy: Option<BusyPercent>,
    pub memory_busy: Option<BusyPercent>,
    pub vram: Option<MemoryInfo>,
    pub gtt: Option<MemoryInfo>,
    pub pcie_replay_count: Option<u64>,
    /// `-1` when the device has no NUMA affinity
    pub numa_node: Option<i64>,
}

/// Read a value, turning "not exposed" into `None`
pub fn optional<T>(result: Result<T, DevInfoError>) -> Result<Option<T>, DevInfoError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_exposed() => {
            log::debug!("Attribute not exposed: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Read identification attributes
pub fn device_info(device: &Device) -> Result<DeviceInfo, DevInfoError> {
    let mut info = DeviceInfo::new(device.index());
    info.device_id = optional(device.read_u64(DevInfoType::DevId))?;
    info.vendor_id = optional(device.read_u64(DevInfoType::VendorId))?;
    info.subsystem_device_id = optional(device.read_u64(DevInfoType::SubSysDevId))?;
    info.subsystem_vendor_id = optional(device.read_u64(DevInfoType::SubSysVendorId))?;
    info.product_name = optional(device.read_line(DevInfoType::DevProdName))?
        .filter(|name| !name.trim().is_empty());
    info.vbios_version = optional(device.read_str(DevInfoType::VBiosVer))?;
    info.unique_id = optional(device.read_line(DevInfoType::UniqueId))?;
    Ok(info)
}

fn memory(
    device: &Device,
    total: DevInfoType,
    used: DevInfoType,
) -> Result<Option<MemoryInfo>, DevInfoError> {
    let total = optional(device.read_u64(total))?;
    let used = optional(device.read_u64(used))?;
    Ok(total.zip(used).map(|(t, u)| MemoryInfo::new(t, u)))
}

/// Read identification plus current performance and usage
pub fn device_status(device: &Device) -> Result<DeviceStatus, DevInfoError> {
    Ok(DeviceStatus {
        info: device_info(device)?,
        perf_level: optional(device.perf_level())?,
        overdrive_percent: optional(device.read_u64(DevInfoType::OverDriveLevel))?,
        gpu_busy: optional(device.read_u64(DevInfoType::Usage))?.map(BusyPercent::new),
        memory_busy: optional(device.read_u64(DevInfoType::MemBusyPercent))?
            .map(BusyPercent::new),
        vram: memory(device, DevInfoType::MemTotVram, DevInfoType::MemUsedVram)?,
        gtt: memory(device, DevInfoType::MemTotGtt, DevInfoType::MemUsedGtt)?,
        pcie_replay_count: optional(device.read_u64(DevInfoType::PcieReplayCount))?,
        numa_node: optional(device.read_i64(DevInfoType::NumaNode))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_optional_swallows_not_exposed() {
        let err = DevInfoError::NotARegularFile {
            path: PathBuf::from("x"),
        };
        assert_eq!(optional::<u64>(Err(err)).unwrap(), None);
    }

    #[test]
    fn test_optional_keeps_parse_errors() {
        let err = DevInfoError::Parse {
            attr: DevInfoType::Usage,
            content: "x".to_string(),
        };
        assert!(optional::<u64>(Err(err)).is_err());
    }

    #[test]
    fn test_status_of_empty_device() {
        let device = Device::new("/nonexistent/card7", Default::default());
        let status = device_status(&device).unwrap();
        assert_eq!(status.info.device_id, None);
        assert_eq!(status.perf_level, None);
        assert_eq!(status.vram, None);
        assert_eq!(status.numa_node, None);
    }

    #[test]
    fn test_status_reads_unset_numa_node() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("device")).unwrap();
        std::fs::write(dir.path().join("device/numa_node"), "-1\n").unwrap();

        let device = Device::new(dir.path(), Default::default());
        let status = device_status(&device).unwrap();
        assert_eq!(status.numa_node, Some(-1));
    }
}
