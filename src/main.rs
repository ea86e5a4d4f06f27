use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

use projector_scout::catalog::{Catalog, SortOrder};
use projector_scout::config::Config;
use projector_scout::fetch::{load_catalog, DataSource};
use projector_scout::filter::{FilterCriteria, RangeOp};
use projector_scout::output;
use projector_scout::scoring::{validate_profile, Preset, WeightProfile};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// One card per product (colored on a terminal)
    #[default]
    Table,
    /// Tab-separated: score, id, name, price
    Tsv,
    /// JSON records with their score
    Json,
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Text searched in name and description
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    /// Resolution label to look for, e.g. 1920x1080
    #[arg(long)]
    resolution: Option<String>,

    /// Brightness band in ANSI lumens: "<1000", "1000-2000" or ">2000"
    #[arg(long)]
    brightness: Option<RangeOp>,

    /// Display technology (DLP, LCD, LED)
    #[arg(long)]
    technology: Option<String>,

    /// catalog, score, price-asc, price-desc or name
    #[arg(long)]
    sort: Option<SortOrder>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            resolution: self.resolution.clone(),
            brightness: self.brightness,
            technology: self.technology.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projectors, best score first (default if no subcommand)
    List(ListArgs),
    /// Show every characteristic of one projector and how its score is built
    Show {
        /// Product id
        id: String,
    },
    /// Compare up to three projectors side by side
    Compare {
        /// Product ids, in the order they are added
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List the built-in scoring profiles
    Profiles {
        /// Print the effective profile as YAML
        #[arg(long)]
        yaml: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "projector-scout")]
#[command(about = "Score, filter and compare video projectors", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/projector-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog URL or file path
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Scoring profile: extended or balanced
    #[arg(short, long, global = true)]
    profile: Option<Preset>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Load the catalog. On failure the error is reported once, the empty
/// result is shown, and the process exits.
async fn load_or_exit(config: &Config, profile: &WeightProfile) -> Catalog {
    let source = DataSource::parse(config.source());
    match load_catalog(&source, profile).await {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Erreur lors du chargement des vidéoprojecteurs : {:#}", e);
            println!("{}", output::NO_RESULTS);
            std::process::exit(EXIT_DATA);
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logger(cli.verbose);
    let command = cli
        .command
        .unwrap_or_else(|| Commands::List(ListArgs::default()));
    let start_time = Instant::now();

    // Load config, then let command-line flags win
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match projector_scout::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(source) = cli.source {
        config.source = Some(source);
    }
    if let Some(preset) = cli.profile {
        config.profile = Some(preset);
        config.scoring = None;
    }

    // Validate scoring config at startup
    let profile = config.effective_profile();
    if let Err(errors) = validate_profile(&profile) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    if profile.weight_sum() > 1.0 {
        log::warn!(
            "Weights sum to {:.2}: scores can reach {}",
            profile.weight_sum(),
            profile.max_score()
        );
    }

    let use_colors = output::should_use_colors();

    match command {
        Commands::Profiles { yaml } => {
            if yaml {
                match serde_saphyr::to_string(&profile) {
                    Ok(dump) => print!("{}", dump),
                    Err(e) => {
                        eprintln!("Failed to serialize profile: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                let active = config
                    .scoring
                    .is_none()
                    .then(|| config.profile.unwrap_or_default());
                println!(
                    "{}",
                    output::format_profiles(active, config.scoring.as_ref())
                );
            }
        }
        Commands::List(args) => {
            let catalog = load_or_exit(&config, &profile).await;
            let criteria = config.filters().merged_with(&args.criteria());
            let order = args.sort.unwrap_or_else(|| config.sort());
            log::debug!("Filters: {:?}, sort: {}", criteria, order);

            let visible = catalog.visible(&criteria, order);
            match args.format {
                OutputFormat::Table => {
                    println!("{}", output::format_cards(&visible, use_colors))
                }
                OutputFormat::Tsv => {
                    if !visible.is_empty() {
                        println!("{}", output::format_tsv(&visible));
                    }
                }
                OutputFormat::Json => match output::format_json(&visible) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_DATA);
                    }
                },
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Showing {} of {} projectors in {:?}",
                    visible.len(),
                    catalog.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Show { id } => {
            let catalog = load_or_exit(&config, &profile).await;
            match catalog.get(&id) {
                Some(scored) => {
                    println!("{}", output::format_product_detail(scored, use_colors))
                }
                None => {
                    eprintln!("No projector with id '{}' in the catalog", id);
                    std::process::exit(EXIT_NOT_FOUND);
                }
            }
        }
        Commands::Compare { ids } => {
            let mut catalog = load_or_exit(&config, &profile).await;
            // Each rejected id is reported, the rest are still compared
            for id in &ids {
                if let Err(e) = catalog.select(id) {
                    eprintln!("{}", e);
                }
            }
            let compared = catalog.compared();
            println!("{}", output::format_comparison_table(&compared, use_colors));
            if compared.is_empty() {
                std::process::exit(EXIT_NOT_FOUND);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
