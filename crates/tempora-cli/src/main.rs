use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tempora::{FormatStyle, Interval, Locale, Moment, Period, Step};

/// Calendar interval differencing and recurring period expansion
#[derive(Debug, Parser)]
#[command(name = "tempora", version, about)]
struct Cli {
    /// IANA timezone used to read dates without an offset
    #[arg(long, global = true, value_name = "ZONE")]
    tz: Option<String>,

    /// Locale for relative output (ja, en, fr, de, zh, ko, es, pt)
    #[arg(long, global = true, value_name = "TAG")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the calendar interval between two dates
    Diff {
        start: String,
        end: String,
        /// Report magnitudes only, dropping the direction
        #[arg(long)]
        absolute: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Traditional)]
        format: OutputFormat,
    },
    /// Expand a recurring period into dates
    Period {
        start: String,
        /// Inclusive end date
        #[arg(long)]
        end: Option<String>,
        /// Step such as "1 day", "2 weeks" or "3 months"
        #[arg(long, default_value = "1 day")]
        step: String,
        /// Number of positions to examine
        #[arg(long)]
        recurrences: Option<u32>,
        /// Named query each date must satisfy, e.g. isWeekday (repeatable)
        #[arg(long = "filter", value_name = "NAME")]
        filters: Vec<String>,
        /// Safety ceiling on positions examined
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Latest date first
        #[arg(long)]
        reverse: bool,
        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Traditional,
    Relative,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(tz) = &cli.tz {
        tempora::set_default_timezone(tz).with_context(|| format!("--tz {tz}"))?;
    }
    let locale = match &cli.locale {
        Some(tag) => tag
            .parse::<Locale>()
            .with_context(|| format!("--locale {tag}"))?,
        None => tempora::default_locale(),
    };
    tempora::set_default_locale(locale);

    match cli.command {
        Command::Diff {
            start,
            end,
            absolute,
            format,
        } => {
            let start = parse_moment(&start)?;
            let end = parse_moment(&end)?;
            let interval = Interval::from_difference(&start, &end, absolute);
            log::debug!("diff {start} -> {end}: {interval}");
            match format {
                OutputFormat::Traditional => {
                    println!("{}", interval.format_in(FormatStyle::Traditional, locale))
                }
                OutputFormat::Relative => {
                    println!("{}", interval.format_in(FormatStyle::Relative, locale))
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&interval.breakdown())?)
                }
            }
        }
        Command::Period {
            start,
            end,
            step,
            recurrences,
            filters,
            max_iterations,
            reverse,
            json,
        } => {
            let step: Step = step
                .parse()
                .with_context(|| format!("--step {step:?}"))?;
            let mut period = Period::since(&parse_moment(&start)?)
                .every(step.magnitude(), step.unit())?;
            if let Some(end) = end {
                period = period.until(&parse_moment(&end)?);
            }
            if let Some(n) = recurrences {
                period = period.with_recurrences(n);
            }
            if let Some(n) = max_iterations {
                period = period.with_max_iterations(n);
            }
            for name in &filters {
                period = period
                    .filter_by(name)
                    .with_context(|| format!("--filter {name}"))?;
            }

            let moments = if reverse {
                period.to_vec_reverse()
            } else {
                period.to_vec()
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&moments)?);
            } else {
                for moment in &moments {
                    println!("{moment}");
                }
            }
        }
    }
    Ok(())
}

fn parse_moment(s: &str) -> Result<Moment> {
    Moment::parse(s).with_context(|| format!("could not read {s:?} as a date"))
}
