//! Command-line front end: analyze a channel or generate random inputs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use qif::data::{self, HyperPart};
use qif::output::{format_report, to_json_pretty};
use qif::{
    seeded_rng, Channel, Config, Delimiter, Distribution, GainFunction, HyperDistribution,
    MeasureReport,
};

#[derive(Parser)]
#[command(name = "qif")]
#[command(version)]
#[command(about = "Quantitative information flow: vulnerability, entropy and leakage of channels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; flags below override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Decimal digits written for every number
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Separator written between numbers
    #[arg(long, global = true, value_enum)]
    delimiter: Option<DelimiterArg>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every measure of a prior and channel
    Analyze {
        /// Prior distribution file
        #[arg(short, long)]
        prior: PathBuf,

        /// Channel file
        #[arg(short = 'C', long)]
        channel: PathBuf,

        /// Gain function file, enables g-vulnerability
        #[arg(short, long)]
        gain: Option<PathBuf>,

        /// Number of guesses for k-tries vulnerability
        #[arg(short, long, default_value = "1")]
        k: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also print this part of the hyper-distribution
        #[arg(long, value_enum)]
        show: Vec<PartArg>,
    },

    /// Write a random distribution, channel or gain function
    Generate {
        #[command(subcommand)]
        object: Generate,

        /// Output file
        #[arg(short, long, global = true)]
        output: Option<PathBuf>,

        /// Generator seed
        #[arg(long, global = true)]
        seed: Option<u64>,

        /// Upper bound on generated probabilities
        #[arg(long, global = true)]
        max_prob: Option<f64>,
    },
}

#[derive(Subcommand)]
enum Generate {
    /// A distribution on `size` secrets
    Distribution {
        /// Number of secrets
        #[arg(short = 'n', long)]
        size: usize,
    },
    /// A channel on the given prior
    Channel {
        /// Prior distribution file
        #[arg(short, long)]
        prior: PathBuf,
        /// Number of outputs
        #[arg(short = 'y', long)]
        outputs: usize,
    },
    /// A gain function with integer gains on the given prior
    Gain {
        /// Prior distribution file
        #[arg(short, long)]
        prior: PathBuf,
        /// Number of actions
        #[arg(short = 'w', long)]
        actions: usize,
        /// Smallest gain (default from config)
        #[arg(long, allow_hyphen_values = true)]
        min: Option<i32>,
        /// Largest gain (default from config)
        #[arg(long, allow_hyphen_values = true)]
        max: Option<i32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DelimiterArg {
    Space,
    Comma,
}

#[derive(Clone, Copy, ValueEnum)]
enum PartArg {
    Joint,
    Outer,
    Inners,
}

impl From<PartArg> for HyperPart {
    fn from(part: PartArg) -> Self {
        match part {
            PartArg::Joint => HyperPart::Joint,
            PartArg::Outer => HyperPart::Outer,
            PartArg::Inners => HyperPart::Inners,
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {:?}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {:?}", path))?
        }
        None => Config::default(),
    };
    if let Some(digits) = cli.precision {
        anyhow::ensure!(digits <= qif::MAX_PRECISION, "precision must be <= {}", qif::MAX_PRECISION);
        config = config.precision(digits);
    }
    if let Some(delimiter) = cli.delimiter {
        config = config.delimiter(match delimiter {
            DelimiterArg::Space => Delimiter::Space,
            DelimiterArg::Comma => Delimiter::Comma,
        });
    }
    Ok(config)
}

fn load_prior(path: &Path) -> Result<Arc<Distribution>> {
    let prior = data::load_distribution(path)
        .with_context(|| format!("Failed to load prior from {:?}", path))?;
    Ok(Arc::new(prior))
}

fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn analyze(
    config: &Config,
    prior: &Path,
    channel: &Path,
    gain: Option<&Path>,
    k: usize,
    json: bool,
    show: &[PartArg],
) -> Result<()> {
    let prior = load_prior(prior)?;
    let channel = data::load_channel(channel, &prior)
        .with_context(|| format!("Failed to load channel from {:?}", channel))?;
    let gain = gain
        .map(|path| {
            data::load_gain(path, &prior)
                .with_context(|| format!("Failed to load gain function from {:?}", path))
        })
        .transpose()?;

    let hyper = HyperDistribution::new(&prior, &channel)?;
    for &part in show {
        let part = HyperPart::from(part);
        println!("# {}", part.name());
        print!("{}", data::hyper_to_string(&hyper, part, config));
    }

    let report = MeasureReport::compute(&hyper, gain.as_ref(), k)?;
    if json {
        println!("{}", to_json_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

fn generate(
    mut config: Config,
    object: &Generate,
    seed: Option<u64>,
    max_prob: Option<f64>,
    output: Option<&Path>,
) -> Result<()> {
    if let Some(seed) = seed {
        config = config.seed(seed);
    }
    if let Some(p) = max_prob {
        anyhow::ensure!(p > 0.0 && p <= 1.0, "max_prob must be in (0, 1]");
        config = config.max_prob(p);
    }
    let mut rng = seeded_rng(config.seed);

    let text = match object {
        Generate::Distribution { size } => {
            let d = Distribution::random(*size, config.max_prob, &mut rng)?;
            data::distribution_to_string(&d, &config)
        }
        Generate::Channel { prior, outputs } => {
            let prior = load_prior(prior)?;
            let c = Channel::random(prior, *outputs, config.max_prob, &mut rng)?;
            data::channel_to_string(&c, &config)
        }
        Generate::Gain {
            prior,
            actions,
            min,
            max,
        } => {
            let prior = load_prior(prior)?;
            let (lo, hi) = config.gain_range;
            let g = GainFunction::random(
                prior,
                *actions,
                min.unwrap_or(lo),
                max.unwrap_or(hi),
                &mut rng,
            )?;
            data::gain_to_string(&g, &config)
        }
    };
    write_output(&text, output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Analyze {
            prior,
            channel,
            gain,
            k,
            json,
            show,
        } => analyze(&config, prior, channel, gain.as_deref(), *k, *json, show),
        Commands::Generate {
            object,
            output,
            seed,
            max_prob,
        } => generate(config, object, *seed, *max_prob, output.as_deref()),
    }
}
