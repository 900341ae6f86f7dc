//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod clocks;
pub mod info;
pub mod overdrive;
pub mod perf;
pub mod profile;
pub mod read;

pub use clocks::run_clocks;
pub use info::run_info;
pub use overdrive::run_overdrive;
pub use perf::run_perf;
pub use profile::run_profile;
pub use read::{run_attributes, run_read};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::sysfs::Device;

use std::path::Path;

/// Construct the device selected by the configuration
pub fn open_device(config: &Config) -> Result<Device> {
    let path = config.device.device_path();
    if !path.is_dir() {
        return Err(AppError::DeviceNotFound(path));
    }

    let card = if config.device.path.is_some() {
        card_index_from_path(&path).unwrap_or(0)
    } else {
        config.device.card
    };

    let mut device = Device::new(path.clone(), config.debug.device_env());
    device.set_card_index(card);
    log::debug!("Using card {} at {}", card, path.display());
    Ok(device)
}

/// Card index from a `.../cardN` directory name
fn card_index_from_path(path: &Path) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .strip_prefix("card")?
        .parse()
        .ok()
}
