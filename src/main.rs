//! Piste preview tool
//!
//! Samples contract levels for tuning: scans seed ranges per rank, renders
//! ASCII previews and reports how many retries each seed needed.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand, ValueEnum};

    use piste_forge::course::Course;
    use piste_forge::level::ContractLevelGenerator;
    use piste_forge::{GeneratorSettings, Rank, ShareLink, daily_seed, decode, encode, preview, random_seed};

    #[derive(Parser)]
    #[command(name = "piste-preview")]
    #[command(about = "Sample and preview generated ski pistes")]
    struct Cli {
        /// JSON settings file (tileSize, maxAttempts, finishBuffer)
        #[arg(long, global = true)]
        settings: Option<PathBuf>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Clone, Copy, ValueEnum)]
    enum Output {
        Summary,
        Ascii,
        Json,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Generate a seed range for one or all ranks
        Scan {
            /// Rank to scan; every rank when omitted
            #[arg(long)]
            rank: Option<Rank>,
            #[arg(long, default_value_t = 1)]
            from: u32,
            #[arg(long, default_value_t = 20)]
            count: u32,
            #[arg(long, value_enum, default_value_t = Output::Summary)]
            output: Output,
        },
        /// Show one course from a seed code, or a random seed when omitted
        Show {
            code: Option<String>,
            /// Unknown ranks fall back to green
            #[arg(long, default_value = "green")]
            rank: String,
            #[arg(long, value_enum, default_value_t = Output::Ascii)]
            output: Output,
        },
        /// Print the daily seed code for a date
        Daily { year: u32, month: u32, day: u32 },
    }

    fn load_settings(path: Option<&PathBuf>) -> Result<GeneratorSettings, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let settings = GeneratorSettings::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => Ok(GeneratorSettings::default()),
        }
    }

    fn print_course(course: &Course, output: Output) -> Result<(), Box<dyn std::error::Error>> {
        match output {
            Output::Summary => println!("{}", preview::summary(course)),
            Output::Ascii => println!("{}", preview::render_ascii(course)),
            Output::Json => println!("{}", course.to_json()?),
        }
        Ok(())
    }

    fn scan(
        settings: &GeneratorSettings,
        ranks: &[Rank],
        from: u32,
        count: u32,
        output: Output,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let generator = ContractLevelGenerator::new(settings.clone());
        for &rank in ranks {
            let mut retried = 0;
            for seed in from..from.saturating_add(count) {
                let (level, used) = generator.generate(seed, rank)?;
                if used != seed {
                    retried += 1;
                }
                let course = Course::build(level, settings);
                print!("{:>8} ", encode(seed));
                print_course(&course, output)?;
            }
            log::info!("{}: {} of {} seeds needed a retry", rank, retried, count);
        }
        Ok(())
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();
        let settings = load_settings(cli.settings.as_ref())?;

        match cli.command {
            Command::Scan {
                rank,
                from,
                count,
                output,
            } => {
                let ranks = rank.map_or_else(|| Rank::ALL.to_vec(), |r| vec![r]);
                scan(&settings, &ranks, from, count, output)
            }
            Command::Show { code, rank, output } => {
                let seed = match code {
                    Some(code) => decode(&code),
                    None => {
                        let seed = random_seed();
                        log::info!("No seed code given, using {}", encode(seed));
                        seed
                    }
                };
                let link = ShareLink::new(seed, Rank::parse_or_default(&rank));
                let course = Course::from_seed(link.seed, link.rank, &settings)?;
                println!("share: {}", link.to_query());
                print_course(&course, output)
            }
            Command::Daily { year, month, day } => {
                println!("{}", encode(daily_seed(year, month, day)));
                Ok(())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = cli::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `piste_forge::wasm::start`
}
