//! Lineage batch driver
//!
//! Seeds a founding generation, runs it for a number of years and prints the
//! yearly summaries, optionally followed by a few biographies and a save.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use lineage::config::{SaveConfig, SimulationConfig};
use lineage::names::ListNames;
use lineage::persistence::SaveFormat;
use lineage::random::{RandomSource, SimRng};
use lineage::Population;

#[derive(Debug, Parser)]
#[command(name = "lineage", about = "Stochastic demographic simulation")]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of founders
    #[arg(short = 'n', long)]
    population: Option<usize>,

    /// Years to simulate
    #[arg(short, long)]
    years: Option<u32>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Print this many random biographies at the end
    #[arg(long)]
    inspect: Option<usize>,

    /// Save the final state under this name
    #[arg(long)]
    save: Option<String>,

    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Bincode,
}

impl From<FormatArg> for SaveFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => SaveFormat::Json,
            FormatArg::Bincode => SaveFormat::Bincode,
        }
    }
}

fn load_config(cli: Cli) -> anyhow::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(n) = cli.population {
        config.initial_population = n;
    }
    if let Some(years) = cli.years {
        config.years = years;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(inspect) = cli.inspect {
        config.inspect = inspect;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.save.is_some() || cli.format.is_some() {
        let save = config.save.get_or_insert_with(SaveConfig::default);
        if let Some(name) = cli.save {
            save.name = name;
        }
        if let Some(format) = cli.format {
            save.format = format.into();
        }
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let config = load_config(Cli::parse())?;

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Lineage starting: {} founders, {} years, seed {}",
        config.initial_population, config.years, config.seed
    );

    let mut rng = SimRng::seed_from_u64(config.seed);
    let mut names = ListNames;

    let mut population = Population::new(config.initial_population, &mut rng, &mut names)?;

    let start = std::time::Instant::now();
    let reports = population.run_years(config.years, &mut rng, &mut names)?;
    let elapsed = start.elapsed();

    if cfg!(debug_assertions) {
        population
            .check_invariants()
            .context("population invariants broken after the run")?;
    }

    let births: u32 = reports.iter().map(|r| r.births).sum();
    let deaths: u32 = reports.iter().map(|r| r.deaths).sum();
    info!(
        "Run complete in {:?}: {} born, {} died. {}",
        elapsed, births, deaths, population
    );
    info!("{:?}", population.demographics()?);

    if config.inspect > 0 {
        let everyone = population.registry().len();
        let picks = rng.sample_indices(everyone, config.inspect);
        for index in picks {
            let id = population.registry().as_slice()[index].id();
            println!("[{}]\n{}\n", id.tag(), population.summary(id)?);
        }
    }

    if let Some(save) = &config.save {
        population
            .save(&save.dir, &save.name, save.format)
            .with_context(|| format!("saving {}", save.name))?;
    }

    Ok(())
}
