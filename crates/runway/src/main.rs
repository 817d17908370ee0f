use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use runway::report::{self, RunReport};
use runway::{EngineInput, Session, init_logging};
use runway_core::model::{ScenarioKey, ScenarioProjection, ScenarioSet};
use runway_core::{ForecastConfig, HireRounding};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "runway")]
#[command(about = "Cash-flow forecasting and runway sensitivity for early-stage companies")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input file (.yaml, .yml or .json); demo data is used when omitted
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Reference date as YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Projection length in months (1-120)
    #[arg(long, global = true, default_value_t = 12)]
    horizon: u32,

    /// Resolve fractional hires randomly with this seed instead of accumulating
    #[arg(long, global = true, value_name = "SEED")]
    stochastic_hires: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Position, runway, scenario summary and burn breakdown (default)
    Report,
    /// Month-by-month projections for the presets and any custom scenarios
    Scenarios {
        /// Only show this preset
        #[arg(long)]
        only: Option<ScenarioKey>,
    },
    /// Burn attribution and optimisation opportunities
    Burn,
    /// Runway baseline and lever sensitivity table
    Runway,
    /// Full engine result as structured data (JSON unless --format yaml)
    Run,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn forecast_config(args: &Args) -> color_eyre::Result<ForecastConfig> {
    let as_of = match &args.as_of {
        Some(raw) => raw
            .parse::<jiff::civil::Date>()
            .wrap_err_with(|| format!("invalid --as-of date `{raw}`"))?,
        None => jiff::Zoned::now().date(),
    };
    let hire_rounding = args
        .stochastic_hires
        .map_or(HireRounding::Accumulate, |seed| HireRounding::Stochastic { seed });

    let config = ForecastConfig::new(as_of)
        .with_horizon(args.horizon)
        .with_hire_rounding(hire_rounding);
    config.validate()?;
    Ok(config)
}

fn structured<T: Serialize>(value: &T, format: OutputFormat) -> color_eyre::Result<String> {
    let mut out = match format {
        OutputFormat::Yaml => {
            serde_saphyr::to_string(value).map_err(|e| eyre!("failed to serialize YAML: {e}"))?
        }
        OutputFormat::Json | OutputFormat::Text => serde_json::to_string_pretty(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn render(command: Command, session: &mut Session, format: OutputFormat) -> color_eyre::Result<String> {
    let position = *session.position();
    let source = session.position_source();
    let as_of = session.config().as_of;
    let custom = session.custom_projections()?;
    let result = session.result()?;

    if command == Command::Run || format != OutputFormat::Text {
        return match command {
            Command::Report | Command::Run => structured(
                &RunReport {
                    as_of,
                    position: &position,
                    result,
                    custom_scenarios: &custom,
                },
                format,
            ),
            Command::Scenarios { only: Some(key) } => {
                structured(result.scenarios.get(key), format)
            }
            Command::Scenarios { only: None } => {
                #[derive(Serialize)]
                struct Projections<'a> {
                    presets: &'a ScenarioSet,
                    custom: &'a [ScenarioProjection],
                }
                structured(
                    &Projections {
                        presets: &result.scenarios,
                        custom: &custom,
                    },
                    format,
                )
            }
            Command::Burn => structured(&result.burn_breakdown, format),
            Command::Runway => structured(&result.runway_analysis, format),
        };
    }

    let mut out = String::new();
    match command {
        Command::Report | Command::Run => {
            report::write_full_report(&mut out, &position, source, result, &custom)?
        }
        Command::Scenarios { only } => {
            for (key, projection) in result.scenarios.iter() {
                if only.is_none_or(|k| k == key) {
                    report::write_projection(&mut out, projection)?;
                }
            }
            if only.is_none() {
                for projection in &custom {
                    report::write_projection(&mut out, projection)?;
                }
            }
        }
        Command::Burn => report::write_burn(
            &mut out,
            &result.burn_breakdown,
            &result.optimisations,
            result.optimised_runway_months,
        )?,
        Command::Runway => report::write_runway(&mut out, &result.runway_analysis)?,
    }
    Ok(out)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let input = match &args.input {
        Some(path) => EngineInput::load(path)
            .wrap_err_with(|| format!("failed to load input {}", path.display()))?,
        None => EngineInput::default(),
    };
    let config = forecast_config(&args)?;
    tracing::debug!(as_of = %config.as_of, horizon = config.horizon_months, "forecast configured");

    let mut session = Session::new(input, config);
    let command = args.command.clone().unwrap_or(Command::Report);
    let output = render(command, &mut session, args.format)?;
    print!("{output}");

    Ok(())
}
