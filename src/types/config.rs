//! Configuration structures for the occupancy generator
//!
//! This module contains the simulation configuration structure, the CLI
//! arguments, partial configuration files and validation logic. Values are
//! layered as defaults, then the configuration file, then command line flags.

use super::{OutputFormat, TimeOfDay};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default timing constants of a standard office day
pub mod defaults {
    /// Work start (seconds from midnight)
    pub const START_WORK: u32 = 9 * 60 * 60;
    /// Work end
    pub const END_WORK: u32 = 17 * 60 * 60;
    /// Daily progress meeting
    pub const DAILY_MEETING: u32 = 16 * 60 * 60;
    /// Lunch service start
    pub const LUNCH_START: u32 = 12 * 60 * 60;
    /// Nobody arrives after this time
    pub const ARRIVAL_CUTOFF: u32 = 14 * 60 * 60;
    /// Name of the exterior node in the zone adjacency
    pub const OUTDOOR_ZONE: &str = "Outdoor";
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "occupancy-generator",
    version = "0.1.0",
    about = "Occupancy Generator - Synthesizes per-zone occupancy schedules for building-energy simulation",
    long_about = "Simulates a population of office occupants and their guests second by second over whole days, then compresses per-zone head counts into minute-resolution piecewise schedules.

EXAMPLES:
    # Run one day for the zones in building.json
    occupancy-generator --building building.json

    # Reproducible week with 40 occupants, written as Schedule:Compact records
    occupancy-generator --building building.json --occupants 40 --days 7 --seed 42 --output-format compact

    # Generate configuration template
    occupancy-generator --print-config > my-config.json

    # Validate configuration without running
    occupancy-generator --config my-config.json --building building.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Building layout file path (JSON format)
    #[arg(
        short,
        long,
        help = "Building layout file (JSON: zones and adjacency)",
        long_help = "Path to a JSON building layout with a `zones` list and an `adjacency` map. The exterior is the `Outdoor` node."
    )]
    pub building: Option<String>,

    /// Number of persistent occupants
    #[arg(long, help = "Number of persistent occupants")]
    pub occupants: Option<usize>,

    /// Number of days to simulate
    #[arg(long, help = "Number of days to simulate")]
    pub days: Option<usize>,

    /// First simulated date
    #[arg(long, help = "First simulated date (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Mean number of guests per day
    #[arg(long, help = "Mean number of guests per day (Poisson)")]
    pub guest_lambda: Option<f64>,

    /// Probability that an occupant calls in absent
    #[arg(long, help = "Absence probability (0.0-1.0)")]
    pub absence_probability: Option<f64>,

    /// Output format for generated schedules
    #[arg(
        long,
        help = "Output format (json or compact)",
        long_help = "Output format for generated schedules. Supported formats: json (one object per zone per day), compact (Schedule:Compact records). Default: json"
    )]
    pub output_format: Option<String>,

    /// Output file path (stdout when absent)
    #[arg(short, long, help = "Output file path (defaults to stdout)")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Also write JSON logs to daily files in this directory
    #[arg(long, help = "Write JSON log files to this directory")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of persistent occupants
    pub occupant_count: Option<usize>,
    /// Number of days to simulate
    pub days: Option<usize>,
    /// First simulated date
    pub start_date: Option<NaiveDate>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Work start
    pub start_work: Option<TimeOfDay>,
    /// Work end
    pub end_work: Option<TimeOfDay>,
    /// Arrival/departure flex coefficient in seconds
    pub arrival_flex_secs: Option<u32>,
    /// Latest arrival before the occupant counts as absent
    pub arrival_cutoff: Option<TimeOfDay>,
    /// Probability of calling in absent
    pub absence_probability: Option<f64>,
    /// Lunch service start
    pub lunch_start: Option<TimeOfDay>,
    /// Mean lunch delay in seconds
    pub lunch_delay_mean_secs: Option<u32>,
    /// Minimum lunch delay in seconds
    pub lunch_min_delay_secs: Option<u32>,
    /// Beta alpha of the eating duration
    pub eat_time_alpha: Option<f64>,
    /// Beta beta of the eating duration
    pub eat_time_beta: Option<f64>,
    /// Offset added to the Beta sample
    pub eat_time_offset: Option<f64>,
    /// Scale applied to the offset Beta sample, in seconds
    pub eat_time_scale_secs: Option<f64>,
    /// Daily meeting time
    pub daily_meeting: Option<TimeOfDay>,
    /// Mean meeting duration in seconds
    pub meeting_mean_secs: Option<f64>,
    /// Meeting duration standard deviation in seconds
    pub meeting_std_secs: Option<f64>,
    /// Mean meeting lead in seconds
    pub meeting_lead_mean_secs: Option<u32>,
    /// Minimum meeting lead in seconds
    pub meeting_min_lead_secs: Option<u32>,
    /// Mean guests per day
    pub guest_lambda: Option<f64>,
    /// Largest appointment group
    pub max_group_size: Option<usize>,
    /// Mean early arrival of guests in seconds
    pub guest_early_mean_secs: Option<u32>,
    /// Mean guest visit in seconds
    pub guest_visit_mean_secs: Option<f64>,
    /// Guest visit standard deviation in seconds
    pub guest_visit_std_secs: Option<f64>,
    /// Mean colleague visits per occupant per day
    pub colleague_visit_lambda: Option<f64>,
    /// Mean colleague visit in seconds
    pub colleague_visit_mean_secs: Option<f64>,
    /// Colleague visit standard deviation in seconds
    pub colleague_visit_std_secs: Option<f64>,
    /// Fixed part of the time to cross one zone, in seconds
    pub hop_base_secs: Option<u32>,
    /// Half-width of the uniform hop jitter, in seconds
    pub hop_jitter_secs: Option<u32>,
    /// Inward settling margin of hosted windows, in seconds
    pub settle_margin_secs: Option<u32>,
    /// Fixed entry zone name
    pub entry_zone: Option<String>,
    /// Fixed meeting room name
    pub meeting_room: Option<String>,
    /// Fixed lunch room name
    pub lunch_room: Option<String>,
    /// Output format for generated schedules
    pub output_format: Option<String>,
    /// Output file path
    pub output: Option<String>,
}

/// Configuration for the occupancy simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of persistent occupants
    pub occupant_count: usize,
    /// Number of days to simulate
    pub days: usize,
    /// First simulated date
    pub start_date: NaiveDate,
    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Work start
    pub start_work: TimeOfDay,
    /// Work end
    pub end_work: TimeOfDay,
    /// Arrival/departure flex coefficient in seconds; arrivals start this early
    pub arrival_flex_secs: u32,
    /// Latest arrival before the occupant counts as absent
    pub arrival_cutoff: TimeOfDay,
    /// Probability of calling in absent
    pub absence_probability: f64,

    /// Lunch service start
    pub lunch_start: TimeOfDay,
    /// Mean lunch delay in seconds
    pub lunch_delay_mean_secs: u32,
    /// Minimum lunch delay in seconds
    pub lunch_min_delay_secs: u32,
    /// Beta alpha of the eating duration
    pub eat_time_alpha: f64,
    /// Beta beta of the eating duration
    pub eat_time_beta: f64,
    /// Offset added to the Beta sample
    pub eat_time_offset: f64,
    /// Scale applied to the offset Beta sample, in seconds
    pub eat_time_scale_secs: f64,

    /// Daily meeting time
    pub daily_meeting: TimeOfDay,
    /// Mean meeting duration in seconds
    pub meeting_mean_secs: f64,
    /// Meeting duration standard deviation in seconds
    pub meeting_std_secs: f64,
    /// Mean meeting lead in seconds
    pub meeting_lead_mean_secs: u32,
    /// Minimum meeting lead in seconds
    pub meeting_min_lead_secs: u32,

    /// Mean guests per day
    pub guest_lambda: f64,
    /// Largest appointment group
    pub max_group_size: usize,
    /// Mean early arrival of guests in seconds
    pub guest_early_mean_secs: u32,
    /// Mean guest visit in seconds
    pub guest_visit_mean_secs: f64,
    /// Guest visit standard deviation in seconds
    pub guest_visit_std_secs: f64,

    /// Mean colleague visits per occupant per day
    pub colleague_visit_lambda: f64,
    /// Mean colleague visit in seconds
    pub colleague_visit_mean_secs: f64,
    /// Colleague visit standard deviation in seconds
    pub colleague_visit_std_secs: f64,

    /// Fixed part of the time to cross one zone, in seconds
    pub hop_base_secs: u32,
    /// Half-width of the uniform hop jitter, in seconds
    pub hop_jitter_secs: u32,
    /// Inward settling margin of hosted windows, in seconds
    pub settle_margin_secs: u32,

    /// Fixed entry zone name (random among zones next to `Outdoor` otherwise)
    pub entry_zone: Option<String>,
    /// Fixed meeting room name
    pub meeting_room: Option<String>,
    /// Fixed lunch room name
    pub lunch_room: Option<String>,

    /// Output format for generated schedules
    pub output_format: String,
    /// Output file path (stdout when absent)
    pub output: Option<String>,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Occupant count is invalid
    #[error("Occupant count must be greater than 0, got {0}")]
    InvalidOccupantCount(usize),

    /// Days count is invalid
    #[error("Days count must be greater than 0, got {0}")]
    InvalidDaysCount(usize),

    /// Probability value is out of range
    #[error("Invalid probability for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability {
        /// Name of the field
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Rate or duration is negative or not finite
    #[error("Invalid value for {field}: {value} (must be finite and >= 0)")]
    InvalidNonNegative {
        /// Name of the field
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Beta shape parameter is not positive
    #[error("Invalid Beta shape for {field}: {value} (must be finite and > 0)")]
    InvalidShape {
        /// Name of the field
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Work hours are inverted
    #[error("Work start ({start}) must be before work end ({end})")]
    InvalidWorkHours {
        /// Configured work start
        start: TimeOfDay,
        /// Configured work end
        end: TimeOfDay,
    },

    /// Arrival cutoff before work starts
    #[error("Arrival cutoff ({cutoff}) must not be before work start ({start})")]
    InvalidCutoff {
        /// Configured cutoff
        cutoff: TimeOfDay,
        /// Configured work start
        start: TimeOfDay,
    },

    /// A clock time lies at or after the end of the day
    #[error("{field} must be before 24:00, got {value}")]
    TimeOutOfDay {
        /// Name of the field
        field: String,
        /// The configured time
        value: TimeOfDay,
    },

    /// Group size is invalid
    #[error("Maximum appointment group size must be greater than 0")]
    InvalidGroupSize,

    /// Unknown output format
    #[error("{0}")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            occupant_count: 10,
            days: 1,
            start_date: NaiveDate::from_ymd_opt(2020, 3, 25).unwrap_or_default(),
            seed: None,
            start_work: TimeOfDay::from_seconds(defaults::START_WORK).unwrap_or_default(),
            end_work: TimeOfDay::from_seconds(defaults::END_WORK).unwrap_or_default(),
            arrival_flex_secs: 30 * 60,
            arrival_cutoff: TimeOfDay::from_seconds(defaults::ARRIVAL_CUTOFF).unwrap_or_default(),
            absence_probability: 0.01,
            lunch_start: TimeOfDay::from_seconds(defaults::LUNCH_START).unwrap_or_default(),
            lunch_delay_mean_secs: 5 * 60,
            lunch_min_delay_secs: 20 * 60,
            eat_time_alpha: 10.0,
            eat_time_beta: 50.0,
            eat_time_offset: 0.1,
            eat_time_scale_secs: 6000.0,
            daily_meeting: TimeOfDay::from_seconds(defaults::DAILY_MEETING).unwrap_or_default(),
            meeting_mean_secs: 15.0 * 60.0,
            meeting_std_secs: 60.0,
            meeting_lead_mean_secs: 3 * 60,
            meeting_min_lead_secs: 5 * 60,
            guest_lambda: 3.0,
            max_group_size: 3,
            guest_early_mean_secs: 5 * 60,
            guest_visit_mean_secs: 30.0 * 60.0,
            guest_visit_std_secs: 5.0 * 60.0,
            colleague_visit_lambda: 3.0,
            colleague_visit_mean_secs: 30.0 * 60.0,
            colleague_visit_std_secs: 4.0 * 60.0,
            hop_base_secs: 3,
            hop_jitter_secs: 1,
            settle_margin_secs: 10,
            entry_zone: None,
            meeting_room: None,
            lunch_room: None,
            output_format: "json".to_string(),
            output: None,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file, merging with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let d = Self::default();

        Self {
            occupant_count: file.occupant_count.unwrap_or(d.occupant_count),
            days: file.days.unwrap_or(d.days),
            start_date: file.start_date.unwrap_or(d.start_date),
            seed: file.seed.or(d.seed),
            start_work: file.start_work.unwrap_or(d.start_work),
            end_work: file.end_work.unwrap_or(d.end_work),
            arrival_flex_secs: file.arrival_flex_secs.unwrap_or(d.arrival_flex_secs),
            arrival_cutoff: file.arrival_cutoff.unwrap_or(d.arrival_cutoff),
            absence_probability: file.absence_probability.unwrap_or(d.absence_probability),
            lunch_start: file.lunch_start.unwrap_or(d.lunch_start),
            lunch_delay_mean_secs: file.lunch_delay_mean_secs.unwrap_or(d.lunch_delay_mean_secs),
            lunch_min_delay_secs: file.lunch_min_delay_secs.unwrap_or(d.lunch_min_delay_secs),
            eat_time_alpha: file.eat_time_alpha.unwrap_or(d.eat_time_alpha),
            eat_time_beta: file.eat_time_beta.unwrap_or(d.eat_time_beta),
            eat_time_offset: file.eat_time_offset.unwrap_or(d.eat_time_offset),
            eat_time_scale_secs: file.eat_time_scale_secs.unwrap_or(d.eat_time_scale_secs),
            daily_meeting: file.daily_meeting.unwrap_or(d.daily_meeting),
            meeting_mean_secs: file.meeting_mean_secs.unwrap_or(d.meeting_mean_secs),
            meeting_std_secs: file.meeting_std_secs.unwrap_or(d.meeting_std_secs),
            meeting_lead_mean_secs: file.meeting_lead_mean_secs.unwrap_or(d.meeting_lead_mean_secs),
            meeting_min_lead_secs: file.meeting_min_lead_secs.unwrap_or(d.meeting_min_lead_secs),
            guest_lambda: file.guest_lambda.unwrap_or(d.guest_lambda),
            max_group_size: file.max_group_size.unwrap_or(d.max_group_size),
            guest_early_mean_secs: file.guest_early_mean_secs.unwrap_or(d.guest_early_mean_secs),
            guest_visit_mean_secs: file.guest_visit_mean_secs.unwrap_or(d.guest_visit_mean_secs),
            guest_visit_std_secs: file.guest_visit_std_secs.unwrap_or(d.guest_visit_std_secs),
            colleague_visit_lambda: file.colleague_visit_lambda.unwrap_or(d.colleague_visit_lambda),
            colleague_visit_mean_secs: file
                .colleague_visit_mean_secs
                .unwrap_or(d.colleague_visit_mean_secs),
            colleague_visit_std_secs: file
                .colleague_visit_std_secs
                .unwrap_or(d.colleague_visit_std_secs),
            hop_base_secs: file.hop_base_secs.unwrap_or(d.hop_base_secs),
            hop_jitter_secs: file.hop_jitter_secs.unwrap_or(d.hop_jitter_secs),
            settle_margin_secs: file.settle_margin_secs.unwrap_or(d.settle_margin_secs),
            entry_zone: file.entry_zone.or(d.entry_zone),
            meeting_room: file.meeting_room.or(d.meeting_room),
            lunch_room: file.lunch_room.or(d.lunch_room),
            output_format: file.output_format.unwrap_or(d.output_format),
            output: file.output.or(d.output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.occupants {
            config.occupant_count = value;
        }
        if let Some(value) = args.days {
            config.days = value;
        }
        if let Some(value) = args.start_date {
            config.start_date = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.guest_lambda {
            config.guest_lambda = value;
        }
        if let Some(value) = args.absence_probability {
            config.absence_probability = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.occupant_count == 0 {
            return Err(ConfigValidationError::InvalidOccupantCount(self.occupant_count));
        }

        if self.days == 0 {
            return Err(ConfigValidationError::InvalidDaysCount(self.days));
        }

        if self.start_work >= self.end_work {
            return Err(ConfigValidationError::InvalidWorkHours {
                start: self.start_work,
                end: self.end_work,
            });
        }

        if self.arrival_cutoff < self.start_work {
            return Err(ConfigValidationError::InvalidCutoff {
                cutoff: self.arrival_cutoff,
                start: self.start_work,
            });
        }

        for (field, value) in [
            ("end_work", self.end_work),
            ("arrival_cutoff", self.arrival_cutoff),
            ("lunch_start", self.lunch_start),
            ("daily_meeting", self.daily_meeting),
        ] {
            if value >= TimeOfDay::END_OF_DAY {
                return Err(ConfigValidationError::TimeOutOfDay { field: field.to_string(), value });
            }
        }

        self.validate_probability("absence_probability", self.absence_probability)?;

        self.validate_non_negative("guest_lambda", self.guest_lambda)?;
        self.validate_non_negative("colleague_visit_lambda", self.colleague_visit_lambda)?;
        self.validate_non_negative("eat_time_offset", self.eat_time_offset)?;
        self.validate_non_negative("eat_time_scale_secs", self.eat_time_scale_secs)?;
        self.validate_non_negative("meeting_mean_secs", self.meeting_mean_secs)?;
        self.validate_non_negative("meeting_std_secs", self.meeting_std_secs)?;
        self.validate_non_negative("guest_visit_mean_secs", self.guest_visit_mean_secs)?;
        self.validate_non_negative("guest_visit_std_secs", self.guest_visit_std_secs)?;
        self.validate_non_negative("colleague_visit_mean_secs", self.colleague_visit_mean_secs)?;
        self.validate_non_negative("colleague_visit_std_secs", self.colleague_visit_std_secs)?;

        self.validate_shape("eat_time_alpha", self.eat_time_alpha)?;
        self.validate_shape("eat_time_beta", self.eat_time_beta)?;

        if self.max_group_size == 0 {
            return Err(ConfigValidationError::InvalidGroupSize);
        }

        self.get_output_format().map_err(ConfigValidationError::InvalidOutputFormat)?;

        Ok(())
    }

    fn validate_probability(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidProbability {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn validate_non_negative(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigValidationError::InvalidNonNegative {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn validate_shape(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigValidationError::InvalidShape { field: field.to_string(), value });
        }
        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }

    /// Expected number of guests over the whole run
    pub fn expected_guest_count(&self) -> f64 {
        self.guest_lambda * self.days as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_work.to_string(), "09:00");
        assert_eq!(config.end_work.to_string(), "17:00");
        assert_eq!(config.daily_meeting.to_string(), "16:00");
        assert_eq!(config.arrival_cutoff.to_string(), "14:00");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2020, 3, 25).unwrap());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = SimulationConfig { occupant_count: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOccupantCount(0))));

        let config = SimulationConfig { absence_probability: 1.5, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidProbability { .. })));

        let config = SimulationConfig { guest_lambda: -1.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidNonNegative { .. })));

        let config = SimulationConfig { eat_time_alpha: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidShape { .. })));

        let config = SimulationConfig {
            start_work: TimeOfDay::from_hm(18, 0).unwrap(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidWorkHours { .. })));

        let config = SimulationConfig { max_group_size: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidGroupSize)));

        let config = SimulationConfig { output_format: "xml".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOutputFormat(_))));
    }

    #[test]
    fn test_partial_config_file_merges_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"occupant_count": 25, "guest_lambda": 0.0, "daily_meeting": "15:30"}}"#)
            .unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.occupant_count, 25);
        assert_eq!(config.guest_lambda, 0.0);
        assert_eq!(config.daily_meeting.to_string(), "15:30");
        assert_eq!(config.days, 1);
        assert_eq!(config.absence_probability, 0.01);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let result = SimulationConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let result = SimulationConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"occupant_count": 25, "days": 3}}"#).unwrap();

        let args = CliArgs::parse_from([
            "occupancy-generator",
            "--config",
            file.path().to_str().unwrap(),
            "--occupants",
            "7",
            "--seed",
            "99",
        ]);
        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.occupant_count, 7);
        assert_eq!(config.days, 3);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_save_and_reload() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let config = SimulationConfig { seed: Some(5), occupant_count: 3, ..Default::default() };
        config.save_to_file(file.path()).unwrap();

        let loaded = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.seed, Some(5));
        assert_eq!(loaded.occupant_count, 3);
        assert_eq!(loaded.lunch_start, config.lunch_start);
    }
}
