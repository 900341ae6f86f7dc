//! Performance control service
//!
//! Applies performance levels, over-drive, clock level selections and power
//! profiles. Clock and profile selections only take effect in the `manual`
//! performance level, so the service switches to it first.

use crate::domain::{
    ClockKind, ClockSelection, FrequencyTable, OverDriveLevel, PerformanceLevel, PowerProfile,
    PowerProfileTable,
};
use crate::error::ServiceError;
use crate::sysfs::{DevInfoType, Device};

/// Which over-drive knob to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverDriveTarget {
    /// Shader clock (`pp_sclk_od`)
    Sclk,
    /// Memory clock (`pp_mclk_od`)
    Mclk,
}

impl OverDriveTarget {
    pub fn attribute(&self) -> DevInfoType {
        match self {
            Self::Sclk => DevInfoType::OverDriveLevel,
            Self::Mclk => DevInfoType::MemOverDriveLevel,
        }
    }
}

/// Service for changing performance settings
pub struct PerfService {
    dry_run: bool,
}

impl PerfService {
    /// Create a new performance service
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Check if in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Set the performance level
    pub fn apply_perf_level(
        &self,
        device: &Device,
        level: PerformanceLevel,
    ) -> Result<PerformanceLevel, ServiceError> {
        if self.dry_run {
            log::info!("DRY RUN: Would set performance level to {}", level);
            return Ok(level);
        }

        device.set_perf_level(level)?;
        log::debug!("Applied performance level {}", level);
        Ok(level)
    }

    /// Set an over-drive percentage
    pub fn apply_overdrive(
        &self,
        device: &Device,
        target: OverDriveTarget,
        level: OverDriveLevel,
    ) -> Result<OverDriveLevel, ServiceError> {
        if self.dry_run {
            log::info!("DRY RUN: Would set {:?} over-drive to {}", target, level);
            return Ok(level);
        }

        device.write_u64(target.attribute(), u64::from(level.as_percent()))?;
        log::debug!("Applied {:?} over-drive {}", target, level);
        Ok(level)
    }

    /// Read and parse a clock's frequency table
    pub fn frequency_table(
        &self,
        device: &Device,
        kind: ClockKind,
    ) -> Result<FrequencyTable, ServiceError> {
        let lines = device.read_lines(kind.attribute())?;
        Ok(FrequencyTable::parse(&lines)?)
    }

    /// Restrict a clock to the selected levels
    pub fn select_clocks(
        &self,
        device: &Device,
        kind: ClockKind,
        selection: &ClockSelection,
    ) -> Result<(), ServiceError> {
        let _guard = device.lock();

        let table = self.frequency_table(device, kind)?;
        selection.validate(&table)?;

        let value = selection.to_sysfs_string();
        if self.dry_run {
            log::info!("DRY RUN: Would set {} levels to '{}'", kind, value);
            return Ok(());
        }

        self.ensure_manual(device)?;
        device.write_str(kind.attribute(), &value)?;
        log::debug!("Selected {} levels '{}'", kind, value);
        Ok(())
    }

    /// Read and parse the power profile table
    pub fn power_profiles(&self, device: &Device) -> Result<PowerProfileTable, ServiceError> {
        let lines = device.read_lines(DevInfoType::PowerProfileMode)?;
        Ok(PowerProfileTable::parse(&lines))
    }

    /// Activate a power profile by index
    pub fn select_power_profile(
        &self,
        device: &Device,
        index: u32,
    ) -> Result<PowerProfile, ServiceError> {
        let _guard = device.lock();

        let table = self.power_profiles(device)?;
        let profile = table.get(index)?.clone();

        if self.dry_run {
            log::info!("DRY RUN: Would activate power profile {}", profile);
            return Ok(profile);
        }

        self.ensure_manual(device)?;
        device.write_u64(DevInfoType::PowerProfileMode, u64::from(index))?;
        log::debug!("Activated power profile {}", profile);
        Ok(profile)
    }

    fn ensure_manual(&self, device: &Device) -> Result<(), ServiceError> {
        let current = device.perf_level()?;
        if !current.allows_manual_selection() {
            log::info!(
                "Switching performance level from {} to manual",
                current
            );
            device.set_perf_level(PerformanceLevel::Manual)?;
        }
        Ok(())
    }
}
