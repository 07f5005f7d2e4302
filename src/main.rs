// Occupancy Generator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/occupancy-generator --building building.json
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/occupancy-generator --building building.json --occupants 40 --days 5 --seed 7 --output-format compact --output schedules.idf
// ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use occupancy_generator::facility::BuildingLayout;
use occupancy_generator::output::{CompactScheduleSink, JsonLinesSink, ScheduleSink};
use occupancy_generator::simulation::{LoggingConfig, LoggingGuard, PopulationOrchestrator};
use occupancy_generator::types::config::CliArgs;
use occupancy_generator::types::{OutputFormat, SimulationConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _logging = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("Occupancy generation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Occupancy Generator completed successfully");
}

/// Pick the logging preset from the CLI flags
fn init_logging(args: &CliArgs) -> Result<LoggingGuard> {
    let guard = match (&args.log_dir, args.debug, args.verbose) {
        (Some(directory), debug, verbose) => {
            let level = if debug {
                tracing::Level::DEBUG
            } else if verbose {
                tracing::Level::INFO
            } else {
                tracing::Level::WARN
            };
            LoggingConfig::new().with_level(level).with_file_logging(directory.as_str()).init()
        }
        (None, true, _) => LoggingConfig::init_debug(),
        (None, false, true) => LoggingConfig::init_verbose(),
        (None, false, false) => LoggingConfig::init_quiet(),
    };
    guard.map_err(|e| anyhow::anyhow!(e))
}

fn run(args: CliArgs) -> Result<()> {
    let building_path = args.building.clone();
    let dry_run = args.dry_run;

    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let format = config.get_output_format().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded and validated successfully");

    let Some(building_path) = building_path else {
        bail!("a building layout is required (--building <FILE>)");
    };
    let layout = BuildingLayout::from_file(&building_path)
        .with_context(|| format!("Failed to load building layout '{}'", building_path))?;

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config, &layout);
        return Ok(());
    }

    print_startup_banner(&config, &layout);

    let mut orchestrator =
        PopulationOrchestrator::new(config.clone(), &layout).context("Failed to set up simulation")?;

    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output file '{}'", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink: Box<dyn ScheduleSink> = match format {
        OutputFormat::Json => Box::new(JsonLinesSink::new(writer)),
        OutputFormat::Compact => Box::new(CompactScheduleSink::new(writer)),
    };

    eprintln!("Generating schedules for {} day(s)...", config.days);
    let statistics = orchestrator.run(sink.as_mut()).context("Simulation failed")?;

    if let Some(path) = &config.output {
        eprintln!("Schedules written to: {}", path);
    }
    eprintln!();
    eprintln!("{}", statistics.summary());
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig, layout: &BuildingLayout) {
    eprintln!("Occupancy Generator");
    eprintln!("===================");
    eprintln!("Per-zone occupancy schedules from simulated office days");
    eprintln!();

    print_configuration_summary(config, layout);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig, layout: &BuildingLayout) {
    eprintln!("Configuration:");
    eprintln!("  Building Zones: {}", layout.zones.len());
    eprintln!("  Occupants: {}", config.occupant_count);
    eprintln!("  Days: {} starting {}", config.days, config.start_date);
    eprintln!("  Work Hours: {} - {}", config.start_work, config.end_work);
    eprintln!("  Absence Probability: {:.1}%", config.absence_probability * 100.0);
    eprintln!(
        "  Guests: {:.1}/day (~{:.0} over the run)",
        config.guest_lambda,
        config.expected_guest_count()
    );
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
