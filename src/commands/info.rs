//! Info command implementation
//!
//! Shows GPU identification and current status.

use crate::cli::args::OutputFormat;
use crate::cli::output::print_output;
use crate::error::Result;
use crate::services::device_status;
use crate::sysfs::Device;

/// Execute the info command
pub fn run_info(device: &Device, format: OutputFormat) -> Result<()> {
    let status = device_status(device)?;
    print_output(&status, format)?;
    Ok(())
}
