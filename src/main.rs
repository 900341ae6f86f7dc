//! amdctl - sysfs-based AMD GPU control tool
//!
//! A command-line tool for reading and changing AMD GPU performance levels,
//! clock levels, over-drive and power profiles.

use amdctl::cli::args::{generate_completions, Cli, Commands};
use amdctl::commands::{
    open_device, run_attributes, run_clocks, run_info, run_overdrive, run_perf, run_profile,
    run_read,
};
use amdctl::config::ConfigBuilder;
use amdctl::error::{AppError, DevInfoError};
use clap::Parser;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())
        .with_verbose(cli.verbose.then_some(true))
        .with_dry_run(cli.dry_run.then_some(true))
        .with_card(cli.card)
        .with_device_path(cli.device_path.clone())
        .with_debug_file_errors(cli.debug_files.then_some(true))
        .build();

    // Set log level based on verbose flag
    if config.general.verbose || config.debug.file_errors {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let device = open_device(&config)?;
    let dry_run = config.general.dry_run;

    match &cli.command {
        Commands::Info => run_info(&device, cli.format),

        Commands::Perf(args) => run_perf(args, &device, cli.format, dry_run),

        Commands::Overdrive(args) => run_overdrive(args, &device, cli.format, dry_run),

        Commands::Clocks(args) => run_clocks(args, &device, cli.format, dry_run),

        Commands::Profile(args) => run_profile(args, &device, cli.format, dry_run),

        Commands::Read { attribute, bytes } => run_read(&device, attribute, *bytes, cli.format),

        Commands::Attributes => run_attributes(&device, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::DeviceNotFound(_) => {
            eprintln!();
            eprintln!("Hint: Make sure the amdgpu driver is loaded.");
            eprintln!("      List available cards with 'ls /sys/class/drm'.");
        }
        AppError::DevInfo(DevInfoError::Open { source, .. })
            if source.kind() == std::io::ErrorKind::PermissionDenied =>
        {
            eprintln!();
            eprintln!("Hint: Try running with sudo or as root.");
        }
        AppError::DevInfo(e) if e.is_not_exposed() => {
            eprintln!();
            eprintln!("Hint: This GPU or driver version does not expose the attribute.");
            eprintln!("      Run 'amdctl attributes' to see what is available.");
        }
        _ => {}
    }
}
