//! # VPMEM Sizer Binary
//!
//! Recommends HPT/PPT ratios and a maximum memory size for a partition
//! with VPMEM LUNs, and estimates its ELMM tree layout.
//!
//! # Usage
//!
//! ```bash
//! vpmem_sizer --memory 1000 --lun 6000 --linux
//! vpmem_sizer -m 1000 -l 6000 -n
//! vpmem_sizer --memory 3000 --lun 6000 --lun 5000 --lun 6000 --aix
//! vpmem_sizer --memory 3000 --lun 16x1024 --linux
//!
//! # Partition description from a profile, JSON report
//! vpmem_sizer --config lpar01.toml --output json
//! ```

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use vpmem::config::{ConfigLoader, LogLevel, SizingProfile};
use vpmem::consts::GB;
use vpmem::partition::PartitionKind;
use vpmem_sizer::report::{render_json, render_text};
use vpmem_sizer::{LunSpec, SizingError, SizingRequest, expand_luns, plan};

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// VPMEM Sizer - HPT/PPT ratio and maximum memory recommendations
#[derive(Parser, Debug)]
#[command(name = "vpmem_sizer")]
#[command(version)]
#[command(about = "HPT/PPT ratio and maximum memory sizing for VPMEM partitions")]
#[command(long_about = None)]
#[command(group(ArgGroup::new("partition").args(["ibmi", "linux", "aix"])))]
struct Args {
    /// Desired DRAM memory for the partition, in GB (repeated values are summed)
    #[arg(short, long, value_name = "GB", action = clap::ArgAction::Append)]
    memory: Vec<u64>,

    /// VPMEM LUN size in GB, optionally with a replication factor N as in '3x1000'
    #[arg(short, long = "lun", value_name = "[Nx]GB", action = clap::ArgAction::Append)]
    luns: Vec<LunSpec>,

    /// Partition type is IBMi
    #[arg(short, long)]
    ibmi: bool,

    /// Partition type is Linux
    #[arg(short = 'n', long)]
    linux: bool,

    /// Partition type is AIX
    #[arg(short, long)]
    aix: bool,

    /// Sizing profile (TOML) pre-seeding partition type, memory and LUNs
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

impl Args {
    fn partition_kind(&self) -> Option<PartitionKind> {
        if self.ibmi {
            Some(PartitionKind::Ibmi)
        } else if self.linux {
            Some(PartitionKind::Linux)
        } else if self.aix {
            Some(PartitionKind::Aix)
        } else {
            None
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version render on stdout and are not failures.
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // Tracing is configured from the profile, so profile errors go straight to stderr.
    let profile = match load_profile(&args) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    setup_tracing(&args, profile.shared.log_level);

    if let Err(e) = run(&args, &profile) {
        error!("Sizing failed: {}", e);
        std::process::exit(1);
    }
}

/// Load and validate the `--config` profile, or an empty one.
fn load_profile(args: &Args) -> Result<SizingProfile, SizingError> {
    match args.config {
        Some(ref path) => {
            let profile = SizingProfile::load(path)?;
            profile.validate()?;
            Ok(profile)
        }
        None => Ok(SizingProfile::default()),
    }
}

fn run(args: &Args, profile: &SizingProfile) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(ref path) = args.config {
        info!("Loaded sizing profile from {}", path.display());
    }

    let request = build_request(args, profile)?;
    debug!(?request, "sizing request");

    let plan = plan(&request)?;
    let rendered = match args.output {
        OutputFormat::Text => render_text(&plan),
        OutputFormat::Json => render_json(&plan)?,
    };
    print!("{rendered}");
    Ok(())
}

/// Merge CLI flags over the profile into a validated request.
fn build_request(
    args: &Args,
    profile: &SizingProfile,
) -> Result<SizingRequest, Box<dyn std::error::Error>> {
    let memory_gb = if args.memory.is_empty() {
        profile.partition.memory_gb.unwrap_or(0)
    } else {
        args.memory
            .iter()
            .try_fold(0u64, |acc, &gb| acc.checked_add(gb))
            .ok_or("--memory total does not fit in 64 bits")?
    };
    if memory_gb == 0 {
        return Err("Must specify the --memory option".into());
    }
    let desired_memory_size = memory_gb
        .checked_mul(GB)
        .ok_or("--memory total does not fit in 64 bits")?;

    let partition_kind = args
        .partition_kind()
        .or(profile.partition.kind)
        .ok_or("Must specify exactly one partition type: IBMi, Linux, or AIX")?;

    let mut specs = profile
        .partition
        .luns
        .iter()
        .map(|s| s.parse::<LunSpec>())
        .collect::<Result<Vec<_>, _>>()?;
    specs.extend(args.luns.iter().copied());
    let lun_sizes = expand_luns(&specs)?;

    Ok(SizingRequest {
        desired_memory_size,
        lun_sizes,
        partition_kind,
    })
}

/// Setup tracing subscriber based on CLI arguments and the profile level.
///
/// Logs go to stderr so the report on stdout can be piped.
fn setup_tracing(args: &Args, profile_level: LogLevel) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        profile_level
    };

    // RUST_LOG, when set, replaces the CLI/profile level entirely.
    let filter = EnvFilter::builder()
        .with_default_directive(level.as_level_filter().into())
        .from_env_lossy();

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
