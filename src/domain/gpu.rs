//! GPU information domain type
//!
//! Provides the DeviceInfo struct for GPU identification and metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GPU identification read from the device directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// DRM card index (`cardN`)
    pub index: u32,
    /// PCI device id
    pub device_id: Option<u64>,
    /// PCI vendor id
    pub vendor_id: Option<u64>,
    pub subsystem_device_id: Option<u64>,
    pub subsystem_vendor_id: Option<u64>,
    /// Marketing name (e.g., "AMD Radeon RX 7900 XTX"); not every ASIC exposes it
    pub product_name: Option<String>,
    pub vbios_version: Option<String>,
    pub unique_id: Option<String>,
}

impl DeviceInfo {
    /// AMD's PCI vendor id
    pub const AMD_VENDOR_ID: u64 = 0x1002;

    /// Create new device info
    pub fn new(index: u32) -> Self {
        Self {
            index,
            device_id: None,
            vendor_id: None,
            subsystem_device_id: None,
            subsystem_vendor_id: None,
            product_name: None,
            vbios_version: None,
            unique_id: None,
        }
    }

    /// Set the PCI device and vendor ids
    pub fn with_pci_ids(mut self, device_id: u64, vendor_id: u64) -> Self {
        self.device_id = Some(device_id);
        self.vendor_id = Some(vendor_id);
        self
    }

    /// Set the product name
    pub fn with_product_name(mut self, name: String) -> Self {
        self.product_name = Some(name);
        self
    }

    /// Whether the vendor id is AMD's
    pub fn is_amd(&self) -> bool {
        self.vendor_id == Some(Self::AMD_VENDOR_ID)
    }

    /// Name for display, falling back to the PCI id
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.product_name {
            return name.clone();
        }
        match self.device_id {
            Some(id) => format!("AMD GPU [{:04x}]", id),
            None => "Unknown GPU".to_string(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.index, self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_display() {
        let info = DeviceInfo::new(0).with_product_name("AMD Radeon RX 7900 XTX".to_string());
        assert_eq!(info.to_string(), "[0] AMD Radeon RX 7900 XTX");
    }

    #[test]
    fn test_display_name_falls_back_to_pci_id() {
        let info = DeviceInfo::new(1).with_pci_ids(0x744c, 0x1002);
        assert_eq!(info.display_name(), "AMD GPU [744c]");
        assert!(info.is_amd());
    }

    #[test]
    fn test_device_info_builder() {
        let info = DeviceInfo::new(0);
        assert_eq!(info.vbios_version, None);
        assert!(!info.is_amd());
        assert_eq!(info.display_name(), "Unknown GPU");
    }
}
