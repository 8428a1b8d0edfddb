//! NoteGraph CLI

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use notegraph::{
    ConfigProfile, GraphConfig, NetworkExporter, NoteCollection, NoteGraphEngine, QueryResponse,
    load_collection, write_export,
};
use std::path::PathBuf;
use std::time::Instant;

/// NoteGraph - knowledge graph analytics for linked notes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Note store JSON export (`{"notes": {id: note}}` or a bare id map)
    #[arg(short, long, env = "NOTEGRAPH_NOTES")]
    notes: PathBuf,

    /// YAML configuration file; overrides the profile
    #[arg(short, long, env = "NOTEGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration profile (standard, detailed, minimal)
    #[arg(short, long, default_value = "standard")]
    profile: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "human")]
    log_format: LogFormat,

    /// Log level; defaults to the configuration's level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Structured JSON lines on stderr
    Json,
    /// Timestamped text lines on stderr
    Human,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the ego network of a note as edges, nodes and stats CSV files
    Analyze {
        /// Focal note id or title
        #[arg(short, long)]
        focal: String,

        /// Write only the basic columns
        #[arg(long, action = clap::ArgAction::SetTrue)]
        minimal: bool,

        /// Output path prefix; defaults to `<focal id>-network`
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write the statistics as JSON to this path
        #[arg(long)]
        stats_json: Option<PathBuf>,
    },
    /// Print the notes that reference a title, with context
    Backlinks {
        #[arg(short, long)]
        title: String,
    },
    /// Print the ego network of a note as JSON
    Ego {
        /// Focal note id or title
        #[arg(short, long)]
        focal: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    let level = args.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_logging(args.log_format, &level)?;

    log::info!("NoteGraph v{}", env!("CARGO_PKG_VERSION"));

    let notes = load_collection(&args.notes)
        .with_context(|| format!("Failed to load notes from {}", args.notes.display()))?;
    log::info!("Loaded {} notes from {}", notes.len(), args.notes.display());

    let engine = NoteGraphEngine::new(config);

    match args.command {
        Command::Analyze {
            focal,
            minimal,
            out,
            stats_json,
        } => analyze(&engine, &notes, &focal, minimal, out, stats_json),
        Command::Backlinks { title } => {
            let started = Instant::now();
            let backlinks = engine.get_backlinks(&title, &notes);
            let count = backlinks.len();
            let response = QueryResponse::new("backlinks", &title, backlinks)
                .with_count(count)
                .with_duration(started.elapsed().as_millis() as u64);
            println!("{}", response.to_json()?);
            Ok(())
        }
        Command::Ego { focal } => {
            let started = Instant::now();
            let focal_id = engine
                .resolve_focal(&notes, &focal)
                .map(|n| n.id.clone())
                .unwrap_or_else(|| focal.clone());
            let graph = engine.build_ego_graph(&focal_id, &notes);

            let count = graph.nodes.len();
            let mut response = QueryResponse::new("ego", &focal, &graph)
                .with_count(count)
                .with_duration(started.elapsed().as_millis() as u64);
            if !graph.focal_found() {
                response = response
                    .with_warning(format!("No note matches '{}'", focal))
                    .failed();
            }
            println!("{}", response.to_json()?);
            Ok(())
        }
    }
}

fn analyze(
    engine: &NoteGraphEngine,
    notes: &NoteCollection,
    focal: &str,
    minimal: bool,
    out: Option<PathBuf>,
    stats_json: Option<PathBuf>,
) -> anyhow::Result<()> {
    let Some(note) = engine.resolve_focal(notes, focal) else {
        bail!("No note matches '{}'", focal);
    };

    let include_metadata = engine.config().include_metadata && !minimal;
    let Some(export) = engine.analyze_network(&note.id, notes, include_metadata) else {
        bail!("Note '{}' disappeared from the collection", note.id);
    };

    let prefix = out.unwrap_or_else(|| PathBuf::from(format!("{}-network", note.id)));
    for path in write_export(&export, &prefix)? {
        log::info!("Wrote {}", path.display());
    }

    if let Some(path) = stats_json {
        let Some(stats) = engine.network_stats(&note.id, notes) else {
            bail!("Note '{}' disappeared from the collection", note.id);
        };
        std::fs::write(&path, NetworkExporter::stats_to_json(&stats)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<GraphConfig> {
    let config = match &args.config {
        Some(path) => GraphConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => args.profile.parse::<ConfigProfile>()?.create_config(),
    };
    config.validate()?;
    Ok(config)
}

fn init_logging(format: LogFormat, level: &str) -> anyhow::Result<()> {
    match format {
        LogFormat::Json => {
            use tracing_subscriber::EnvFilter;

            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
        }
        LogFormat::Human => {
            use simple_logger::SimpleLogger;

            let filter = level
                .parse::<log::LevelFilter>()
                .with_context(|| format!("Invalid log level '{}'", level))?;
            SimpleLogger::new()
                .with_level(filter)
                .with_utc_timestamps()
                .init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
        }
    }
    Ok(())
}
