//! Power profile command implementation
//!
//! Lists and selects power profiles.

use crate::cli::args::{OutputFormat, ProfileArgs, ProfileCommands};
use crate::cli::output::{print_output, Message, ProfileTableOutput};
use crate::error::Result;
use crate::services::PerfService;
use crate::sysfs::Device;

/// Execute power profile commands
pub fn run_profile(
    args: &ProfileArgs,
    device: &Device,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    let service = PerfService::new(dry_run);

    match &args.command {
        ProfileCommands::Show => {
            let output = ProfileTableOutput {
                card: device.index(),
                table: service.power_profiles(device)?,
            };
            print_output(&output, format)?;
        }
        ProfileCommands::Set { index } => {
            let profile = service.select_power_profile(device, *index)?;

            let prefix = if dry_run { "[DRY RUN] Would activate" } else { "Activated" };
            let message = format!(
                "{} power profile {} on card {}",
                prefix,
                profile,
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
