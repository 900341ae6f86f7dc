//! Performance and utilization domain types
//!
//! Types for performance levels, over-drive, busy percentages and VRAM usage.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// GPU performance level as exposed by `power_dpm_force_performance_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PerformanceLevel {
    /// Driver-managed clocks
    Auto,
    /// Clocks pinned to their lowest level
    Low,
    /// Clocks pinned to their highest level
    High,
    /// User-selected clock levels
    Manual,
    /// Stable clocks for profiling
    StableStd,
    /// Stable peak clocks
    StablePeak,
    /// Stable clocks with minimum memory clock
    StableMinMclk,
    /// Stable clocks with minimum shader clock
    StableMinSclk,
    /// Anything the driver reports that is not a known token
    #[default]
    Unknown,
}

impl PerformanceLevel {
    /// First level of the lookup range
    pub const FIRST: Self = Self::Auto;
    /// Last level of the lookup range
    pub const LAST: Self = Self::StableMinSclk;

    const RANGE: [Self; 8] = [
        Self::Auto,
        Self::Low,
        Self::High,
        Self::Manual,
        Self::StableStd,
        Self::StablePeak,
        Self::StableMinMclk,
        Self::StableMinSclk,
    ];

    /// All known levels, FIRST to LAST
    pub fn all() -> &'static [Self] {
        &Self::RANGE
    }

    /// Create from a raw level value
    pub fn from_raw(value: u64) -> Self {
        match value {
            0 => Self::Auto,
            1 => Self::Low,
            2 => Self::High,
            3 => Self::Manual,
            4 => Self::StableStd,
            5 => Self::StablePeak,
            6 => Self::StableMinMclk,
            7 => Self::StableMinSclk,
            _ => Self::Unknown,
        }
    }

    /// Get the raw value
    pub fn as_raw(&self) -> u64 {
        match self {
            Self::Auto => 0,
            Self::Low => 1,
            Self::High => 2,
            Self::Manual => 3,
            Self::StableStd => 4,
            Self::StablePeak => 5,
            Self::StableMinMclk => 6,
            Self::StableMinSclk => 7,
            Self::Unknown => 0x100,
        }
    }

    /// Canonical sysfs token, `None` for [`PerformanceLevel::Unknown`]
    pub fn as_sysfs_str(&self) -> Option<&'static str> {
        match self {
            Self::Auto => Some("auto"),
            Self::Low => Some("low"),
            Self::High => Some("high"),
            Self::Manual => Some("manual"),
            Self::StableStd => Some("profile_standard"),
            Self::StablePeak => Some("profile_peak"),
            Self::StableMinMclk => Some("profile_min_mclk"),
            Self::StableMinSclk => Some("profile_min_sclk"),
            Self::Unknown => None,
        }
    }

    /// Parse a sysfs token, never failing
    ///
    /// Exact, case-sensitive match over FIRST..=LAST. Anything else, including
    /// garbled or empty driver output, maps to [`PerformanceLevel::Unknown`].
    pub fn from_sysfs(s: &str) -> Self {
        Self::RANGE
            .iter()
            .copied()
            .find(|level| level.as_sysfs_str() == Some(s))
            .unwrap_or(Self::Unknown)
    }

    /// Strict parse for user input
    pub fn parse_strict(s: &str) -> Result<Self, DomainError> {
        match Self::from_sysfs(s) {
            Self::Unknown => Err(DomainError::UnknownPerformanceLevel(s.to_string())),
            level => Ok(level),
        }
    }

    /// Whether clock tables and power profiles may be written in this level
    pub fn allows_manual_selection(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

impl std::fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sysfs_str().unwrap_or("unknown"))
    }
}

/// Over-drive percentage applied to default clock limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverDriveLevel(u32);

impl OverDriveLevel {
    /// Highest over-drive percentage the driver accepts
    pub const MAX: u32 = 20;

    /// Create a validated over-drive level
    pub fn new(percent: u32) -> Result<Self, DomainError> {
        if percent > Self::MAX {
            return Err(DomainError::InvalidOverDriveLevel(percent));
        }
        Ok(Self(percent))
    }

    /// Get the percentage
    pub fn as_percent(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for OverDriveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Busy percentage of an engine (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusyPercent(u8);

impl BusyPercent {
    /// Create a busy percentage, clamping to 100
    pub fn new(percent: u64) -> Self {
        Self(percent.min(100) as u8)
    }

    pub fn as_percent(&self) -> u8 {
        self.0
    }
}

/// VRAM/Memory information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total memory in bytes
    pub total: u64,
    /// Used memory in bytes
    pub used: u64,
}

impl MemoryInfo {
    /// Create a new memory info value
    pub fn new(total: u64, used: u64) -> Self {
        Self { total, used }
    }

    /// Get free memory in bytes
    pub fn free(&self) -> u64 {
        self.total.saturating_sub(self.used)
    }

    /// Get total memory in MB
    pub fn total_mb(&self) -> u64 {
        self.total / (1024 * 1024)
    }

    /// Get used memory in MB
    pub fn used_mb(&self) -> u64 {
        self.used / (1024 * 1024)
    }

    /// Get usage ratio (0.0 - 1.0)
    pub fn usage_ratio(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f32 / self.total as f32
        }
    }

    /// Get usage percentage (0 - 100)
    pub fn usage_percent(&self) -> u8 {
        (self.usage_ratio() * 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tokens_round_trip() {
        for level in PerformanceLevel::all() {
            let token = level.as_sysfs_str().unwrap();
            assert_eq!(PerformanceLevel::from_sysfs(token), *level);
        }
    }

    #[test]
    fn test_unknown_token_is_lenient() {
        assert_eq!(
            PerformanceLevel::from_sysfs("turbo"),
            PerformanceLevel::Unknown
        );
        assert_eq!(PerformanceLevel::from_sysfs(""), PerformanceLevel::Unknown);
        // Case-sensitive
        assert_eq!(
            PerformanceLevel::from_sysfs("AUTO"),
            PerformanceLevel::Unknown
        );
    }

    #[test]
    fn test_unknown_has_no_token() {
        assert_eq!(PerformanceLevel::Unknown.as_sysfs_str(), None);
        assert_eq!(PerformanceLevel::Unknown.to_string(), "unknown");
        assert_eq!(PerformanceLevel::Unknown.as_raw(), 0x100);
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(PerformanceLevel::from_raw(0), PerformanceLevel::Auto);
        assert_eq!(
            PerformanceLevel::from_raw(7),
            PerformanceLevel::StableMinSclk
        );
        assert_eq!(PerformanceLevel::from_raw(8), PerformanceLevel::Unknown);
        assert_eq!(PerformanceLevel::FIRST.as_raw(), 0);
        assert_eq!(PerformanceLevel::LAST.as_raw(), 7);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(
            PerformanceLevel::parse_strict("profile_peak"),
            Ok(PerformanceLevel::StablePeak)
        );
        assert!(PerformanceLevel::parse_strict("unknown").is_err());
    }

    #[test]
    fn test_overdrive_range() {
        assert_eq!(OverDriveLevel::new(20).unwrap().as_percent(), 20);
        assert_eq!(
            OverDriveLevel::new(21),
            Err(DomainError::InvalidOverDriveLevel(21))
        );
    }

    #[test]
    fn test_busy_percent_clamp() {
        assert_eq!(BusyPercent::new(250).as_percent(), 100);
        assert_eq!(BusyPercent::new(42).as_percent(), 42);
    }

    #[test]
    fn test_memory_info() {
        // 8 GB total, 2 GB used
        let mem = MemoryInfo::new(8 * 1024 * 1024 * 1024, 2 * 1024 * 1024 * 1024);
        assert_eq!(mem.total_mb(), 8192);
        assert_eq!(mem.used_mb(), 2048);
        assert_eq!(mem.free(), 6 * 1024 * 1024 * 1024);
        assert_eq!(mem.usage_percent(), 25);
    }
}
