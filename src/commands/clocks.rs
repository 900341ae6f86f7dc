//! Clocks command implementation
//!
//! Shows frequency tables and restricts enabled clock levels.

use crate::cli::args::{ClocksArgs, ClocksCommands, OutputFormat};
use crate::cli::output::{print_output, ClockTableOutput, Message};
use crate::domain::{ClockKind, ClockSelection};
use crate::error::Result;
use crate::services::PerfService;
use crate::sysfs::Device;

/// Execute clock commands
pub fn run_clocks(
    args: &ClocksArgs,
    device: &Device,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    let service = PerfService::new(dry_run);

    match &args.command {
        ClocksCommands::Show { kind } => {
            let kind = ClockKind::from(*kind);
            let table = service.frequency_table(device, kind)?;
            let output = ClockTableOutput {
                card: device.index(),
                kind,
                table,
            };
            print_output(&output, format)?;
        }
        ClocksCommands::Set { kind, levels, mask } => {
            let kind = ClockKind::from(*kind);
            let selection = match mask {
                Some(mask) => ClockSelection::from_bitmask(*mask)?,
                None => ClockSelection::from_indices(levels.iter().copied())?,
            };
            service.select_clocks(device, kind, &selection)?;

            let prefix = if dry_run { "[DRY RUN] Would enable" } else { "Enabled" };
            let message = format!(
                "{} {} levels [{}] on card {}",
                prefix,
                kind,
                selection.to_sysfs_string(),
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
