use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use time::{Date, OffsetDateTime};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use yomi_archive::{Dictionary, DictionaryReader, Entry, Metadata};
use yomi_corpus::LoadMode;
use yomi_types::{Definition, Rank};

use yomigen::frequency::{self, DEFAULT_MAX_RANK};
use yomigen::{Corpus, shinmeikai};

const DEFAULT_CHUNK_SIZE: usize = 10_000;

#[derive(Parser)]
#[command(name = "yomigen")]
#[command(about = "Build frequency and term dictionaries from Japanese corpora")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Balanced Corpus of Contemporary Written Japanese
    Bccwj(FrequencyArgs),
    /// Corpus of Spontaneous Japanese
    Csj(FrequencyArgs),
    /// NINJAL Web Japanese Corpus
    Nwjc(FrequencyArgs),
    /// Corpus of Historical Japanese
    Chj {
        #[command(flatten)]
        args: FrequencyArgs,
        #[command(flatten)]
        part: ChjPart,
    },
    /// Showa-Heisei Corpus of Written Japanese
    Shc(FrequencyArgs),
    /// Upgrade 新明解国語辞典 with BCCWJ popularity and importance tags
    Shinmeikai {
        /// Input dictionary
        path_in: PathBuf,
        /// Output dictionary
        path_out: PathBuf,
        /// Directory with the BCCWJ frequency lists
        path_bccwj: PathBuf,
    },
    /// Print metadata and entry counts of a dictionary
    Stats {
        path: PathBuf,
        /// Read a rank dictionary instead of a term dictionary
        #[arg(long, default_value_t = false)]
        rank: bool,
    },
}

#[derive(Args)]
struct FrequencyArgs {
    /// Directory with the corpus files
    path_in: PathBuf,
    /// Output dictionary
    path_out: PathBuf,
    /// Ranks at or above this are left out
    #[arg(long, default_value_t = DEFAULT_MAX_RANK)]
    max: usize,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ChjPart {
    /// Meiji and Taisho
    #[arg(long)]
    modern: bool,
    /// Nara to Edo
    #[arg(long)]
    premodern: bool,
}

#[derive(Debug, Clone)]
struct Config {
    chunk_size: usize,
    load_mode: LoadMode,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config();
    info!(
        "chunk size {} (load mode: {:?})",
        config.chunk_size, config.load_mode
    );

    match cli.command {
        Commands::Bccwj(args) => build_frequency(Corpus::Bccwj, &args, &config),
        Commands::Csj(args) => build_frequency(Corpus::Csj, &args, &config),
        Commands::Nwjc(args) => build_frequency(Corpus::Nwjc, &args, &config),
        Commands::Chj { args, part } => {
            let corpus = if part.modern {
                Corpus::ChjModern
            } else {
                Corpus::ChjPremodern
            };
            build_frequency(corpus, &args, &config)
        }
        Commands::Shc(args) => build_frequency(Corpus::Shc, &args, &config),
        Commands::Shinmeikai {
            path_in,
            path_out,
            path_bccwj,
        } => upgrade_shinmeikai(&path_in, &path_out, &path_bccwj, &config),
        Commands::Stats { path, rank } => {
            if rank {
                let dict: Dictionary<Rank> = read_dictionary(&path)?;
                print_stats(&path, &dict, None);
            } else {
                let dict: Dictionary<Definition> = read_dictionary(&path)?;
                let abnormal = dict.iter().filter(|d| !d.is_normal()).count();
                print_stats(&path, &dict, Some(abnormal));
            }
            Ok(())
        }
    }
}

fn build_frequency(corpus: Corpus, args: &FrequencyArgs, config: &Config) -> Result<()> {
    let start = Instant::now();
    let read = corpus
        .read(&args.path_in, config.load_mode)
        .with_context(|| format!("reading {corpus:?} from {}", args.path_in.display()))?;
    info!(
        "read {} terms ({}) in {} ms",
        read.bag.len(),
        read.units,
        start.elapsed().as_millis()
    );

    let dict = frequency::rank_dictionary(corpus, &read, args.max, today());
    write_dictionary(&dict, &args.path_out, config)
}

fn upgrade_shinmeikai(
    path_in: &Path,
    path_out: &Path,
    path_bccwj: &Path,
    config: &Config,
) -> Result<()> {
    let start = Instant::now();
    let dict: Dictionary<Definition> = read_dictionary(path_in)?;
    let read = Corpus::Bccwj
        .read(path_bccwj, config.load_mode)
        .with_context(|| format!("reading BCCWJ from {}", path_bccwj.display()))?;
    info!(
        "read {} definitions and {} terms ({}) in {} ms",
        dict.len(),
        read.bag.len(),
        read.units,
        start.elapsed().as_millis()
    );

    let dict = shinmeikai::upgrade(dict, &read.bag.to_counts(), today());
    write_dictionary(&dict, path_out, config)
}

fn read_dictionary<E: Entry>(path: &Path) -> Result<Dictionary<E>> {
    DictionaryReader::new()
        .with_path(path)
        .read()
        .with_context(|| format!("reading dictionary {}", path.display()))
}

fn write_dictionary<E: Entry>(dict: &Dictionary<E>, path: &Path, config: &Config) -> Result<()> {
    let start = Instant::now();
    dict.writer()
        .with_path(path)
        .in_chunks(config.chunk_size)
        .write()
        .with_context(|| format!("writing dictionary {}", path.display()))?;
    info!(
        "wrote {} entries in {} ms",
        dict.len(),
        start.elapsed().as_millis()
    );
    Ok(())
}

fn print_stats<E>(path: &Path, dict: &Dictionary<E>, abnormal: Option<usize>) {
    let Metadata {
        title,
        revision,
        author,
        ..
    } = &dict.metadata;
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("Dictionary: {}", path.display());
    println!("Title    : {}", field(title));
    println!("Revision : {}", field(revision));
    println!("Author   : {}", field(author));
    println!("Banks    : {}_<n>.json", dict.term_bank_name);
    println!("Entries  : {}", dict.len());
    if let Some(abnormal) = abnormal {
        println!("Abnormal : {}", abnormal);
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn load_config() -> Config {
    let chunk_size = env::var("YOMI_CHUNK_SIZE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    let load_mode = match env::var("YOMI_LOAD_MODE") {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            warn!("{err}; using mmap");
            LoadMode::Mmap
        }),
        Err(_) => LoadMode::default(),
    };
    Config {
        chunk_size,
        load_mode,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
