//! Performance level command implementation
//!
//! Handles performance level status and set commands.

use crate::cli::args::{OutputFormat, PerfArgs, PerfCommands};
use crate::cli::output::{print_output, Message};
use crate::domain::PerformanceLevel;
use crate::error::Result;
use crate::services::PerfService;
use crate::sysfs::Device;

/// Execute performance level commands
pub fn run_perf(
    args: &PerfArgs,
    device: &Device,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    match &args.command {
        PerfCommands::Status => {
            let level = device.perf_level()?;
            let message = Message {
                message: format!("Card {} performance level: {}", device.index(), level),
                success: level != PerformanceLevel::Unknown,
            };
            print_output(&message, format)?;
        }
        PerfCommands::Set { level } => {
            let level = PerformanceLevel::from(*level);
            let service = PerfService::new(dry_run);
            service.apply_perf_level(device, level)?;

            let message = if dry_run {
                format!(
                    "[DRY RUN] Would set performance level to {} on card {}",
                    level,
                    device.index()
                )
            } else {
                format!(
                    "Set performance level to {} on card {}",
                    level,
                    device.index()
                )
            };
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
