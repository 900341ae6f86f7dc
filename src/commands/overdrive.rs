//! Over-drive command implementation
//!
//! Handles over-drive status and set commands.

use crate::cli::args::{OutputFormat, OverdriveArgs, OverdriveCommands};
use crate::cli::output::{print_output, Message, OverdriveStatus};
use crate::domain::OverDriveLevel;
use crate::error::Result;
use crate::services::{optional, OverDriveTarget, PerfService};
use crate::sysfs::{DevInfoType, Device};

/// Execute over-drive commands
pub fn run_overdrive(
    args: &OverdriveArgs,
    device: &Device,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    match &args.command {
        OverdriveCommands::Status => {
            let status = OverdriveStatus {
                card: device.index(),
                sclk_percent: optional(device.read_u64(DevInfoType::OverDriveLevel))?,
                mclk_percent: optional(device.read_u64(DevInfoType::MemOverDriveLevel))?,
            };
            print_output(&status, format)?;
        }
        OverdriveCommands::Set { percent, memory } => {
            let level = OverDriveLevel::new(*percent)?;
            let target = if *memory {
                OverDriveTarget::Mclk
            } else {
                OverDriveTarget::Sclk
            };

            PerfService::new(dry_run).apply_overdrive(device, target, level)?;

            let prefix = if dry_run { "[DRY RUN] Would set" } else { "Set" };
            let message = format!(
                "{} {:?} over-drive to {} on card {}",
                prefix,
                target,
                level,
                device.index()
            );
            print_output(
                &Message {
                    message,
                    success: true,
                },
                format,
            )?;
        }
    }

    Ok(())
}
