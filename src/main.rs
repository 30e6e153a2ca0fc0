//! Command line front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conway_universe::{
    config::{CliOverrides, Settings},
    controller::{AdvanceTrigger, LineTrigger, ScriptedTrigger, TracingSink, UniverseController, ViewHandle},
    game_of_life::{create_example_patterns, resolve_pattern, Universe, UniverseId, UniverseMetadata},
    persistence::{JsonFileStore, UniverseStore},
    utils::ConsoleView,
};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conway")]
#[command(about = "Conway's Game of Life on an unbounded plane")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Directory holding persisted universes (overrides config)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Log filter, e.g. `debug` (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration and example pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Create a universe from a pattern and persist it
    New {
        /// Name of the universe
        #[arg(short, long)]
        name: String,

        /// Built-in pattern name or path to a pattern file
        #[arg(short, long)]
        pattern: String,
    },

    /// Watch a universe evolve in the terminal
    Run {
        /// Id of a persisted universe
        #[arg(short, long, conflicts_with = "pattern", required_unless_present = "pattern")]
        universe: Option<UniverseId>,

        /// Built-in pattern name or path to a pattern file
        #[arg(short, long)]
        pattern: Option<String>,

        /// Advance this many generations without waiting for input
        #[arg(short, long)]
        steps: Option<u64>,

        /// Persist the final state
        #[arg(long)]
        save: bool,

        /// Maximum cells a transition may touch (overrides config)
        #[arg(long)]
        biomass_limit: Option<usize>,
    },

    /// List persisted universes
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_file_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let biomass_limit = match &cli.command {
        Commands::Run { biomass_limit, .. } => *biomass_limit,
        _ => None,
    };
    settings.merge_with_cli(&CliOverrides {
        biomass_limit,
        storage_dir: cli.storage.clone(),
        log_level: cli.log_level.clone(),
    });
    settings.validate().context("Configuration validation failed")?;

    init_logging(&settings.logging.level);

    match cli.command {
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::New { name, pattern } => new_command(&settings, name, &pattern),
        Commands::Run {
            universe,
            pattern,
            steps,
            save,
            ..
        } => run_command(&settings, universe, pattern, steps, save),
        Commands::List => list_command(&settings),
    }
}

/// Logs go to stderr so the board on stdout stays readable
fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let patterns_dir = directory.join("patterns");
    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    std::fs::create_dir_all(directory.join("universes"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. conway new --name demo --pattern patterns/glider.cells");
    println!("2. conway run --universe <ID>");

    Ok(())
}

fn new_command(settings: &Settings, name: String, pattern: &str) -> Result<()> {
    let cells = resolve_pattern(pattern).with_context(|| format!("Unknown pattern: {}", pattern))?;
    let universe = Universe::with_id(
        UniverseId::new(),
        UniverseMetadata::new(name),
        cells.into_iter().collect(),
        settings.simulation.initial_generation,
    );

    let mut store = JsonFileStore::new(&settings.storage.directory);
    store
        .persist(universe.id(), &universe.export())
        .context("Failed to persist new universe")?;
    store
        .persist_metadata(universe.id(), universe.metadata())
        .context("Failed to persist universe name")?;
    tracing::info!(universe = %universe.id(), name = %universe.metadata().name, "universe created");

    println!("{}", universe.id());
    Ok(())
}

fn run_command(
    settings: &Settings,
    universe_id: Option<UniverseId>,
    pattern: Option<String>,
    steps: Option<u64>,
    save: bool,
) -> Result<()> {
    let mut store = JsonFileStore::new(&settings.storage.directory);

    let (universe, loaded) = match (universe_id, pattern) {
        (Some(id), _) => {
            let record = store
                .load(id)
                .with_context(|| format!("Failed to load universe {}", id))?;
            let metadata = store
                .load_metadata(id)
                .with_context(|| format!("Failed to load name of universe {}", id))?
                .unwrap_or_else(|| UniverseMetadata::new(format!("universe {}", id)));
            (Universe::from_record(id, metadata, record), true)
        }
        (None, Some(pattern)) => {
            let cells = resolve_pattern(&pattern).with_context(|| format!("Unknown pattern: {}", pattern))?;
            let universe = Universe::with_id(
                UniverseId::new(),
                UniverseMetadata::new(pattern),
                cells.into_iter().collect(),
                settings.simulation.initial_generation,
            );
            (universe, false)
        }
        (None, None) => anyhow::bail!("Either --universe or --pattern is required"),
    };
    let universe = universe.with_biomass_limit(settings.simulation.biomass_limit);

    let view: ViewHandle = Rc::new(RefCell::new(ConsoleView::new(
        io::stdout(),
        settings.viewport.clone(),
        settings.glyphs.clone(),
    )));
    let mut controller = UniverseController::new(universe, vec![view], TracingSink);

    let stdin = io::stdin();
    let mut trigger: Box<dyn AdvanceTrigger> = match steps {
        Some(steps) => Box::new(ScriptedTrigger::new(steps)),
        None => {
            println!("Press Enter for the next generation, q to quit");
            Box::new(LineTrigger::new(stdin.lock()))
        }
    };

    let outcome = controller.run(trigger.as_mut());
    drop(trigger);
    let universe = controller.into_universe();

    // A failed advance leaves the last good generation, which is still worth keeping
    if save || loaded {
        store
            .persist(universe.id(), &universe.export())
            .with_context(|| format!("Failed to persist universe {}", universe.id()))?;
        if !loaded {
            store
                .persist_metadata(universe.id(), universe.metadata())
                .context("Failed to persist universe name")?;
        }
        println!("{}", ColorOutput::success(&format!("Saved universe {}", universe.id())));
    }

    match outcome {
        Ok(advanced) => {
            println!(
                "{}",
                ColorOutput::info(&format!(
                    "Advanced {} generation(s), now at generation {} with {} live cells",
                    advanced,
                    universe.generation(),
                    universe.population()
                ))
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", ColorOutput::error(&format!("Simulation stopped: {}", e)));
            Err(e.into())
        }
    }
}

fn list_command(settings: &Settings) -> Result<()> {
    let store = JsonFileStore::new(&settings.storage.directory);
    let ids = store.ids().context("Failed to list universes")?;

    if ids.is_empty() {
        println!(
            "{}",
            ColorOutput::warning(&format!("No universes in {}", settings.storage.directory.display()))
        );
        return Ok(());
    }

    for id in ids {
        println!("{}", describe_universe(&store, id));
    }
    Ok(())
}

/// One `list` line: id, name, generation and population
fn describe_universe(store: &dyn UniverseStore, id: UniverseId) -> String {
    let name = match store.load_metadata(id) {
        Ok(Some(metadata)) => metadata.name,
        Ok(None) => "-".to_string(),
        Err(e) => return format!("{}  {}", id, ColorOutput::error(&e.to_string())),
    };
    match store.load(id) {
        Ok(record) => format!(
            "{}  {:<20}  generation {:>8}  {} live cells",
            id,
            name,
            record.gen_num,
            record.live_cells.len()
        ),
        Err(e) => format!("{}  {:<20}  {}", id, name, ColorOutput::error(&e.to_string())),
    }
}

/// Color output utilities
struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["conway", "run", "--pattern", "glider", "--steps", "5"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["conway", "run"]);
        assert!(cli.is_err());

        let id = UniverseId::new().to_string();
        let cli = Cli::try_parse_from(["conway", "run", "--universe", id.as_str(), "--pattern", "glider"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.cells").exists());
        assert!(temp_dir.path().join("universes").is_dir());
    }

    #[test]
    fn test_new_then_scripted_run() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.storage.directory = temp_dir.path().join("universes");

        new_command(&settings, "demo".to_string(), "blinker").unwrap();
        let store = JsonFileStore::new(&settings.storage.directory);
        let ids = store.ids().unwrap();
        assert_eq!(ids.len(), 1);

        run_command(&settings, Some(ids[0]), None, Some(3), false).unwrap();
        let record = store.load(ids[0]).unwrap();
        assert_eq!(record.gen_num, 3);
        assert_eq!(record.live_cells, vec![(1, -1), (1, 0), (1, 1)]);
        // Running and saving must not lose the name given at creation
        assert_eq!(store.load_metadata(ids[0]).unwrap(), Some(UniverseMetadata::new("demo")));
    }

    #[test]
    fn test_list_shows_name() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.storage.directory = temp_dir.path().join("universes");

        new_command(&settings, "my universe".to_string(), "glider").unwrap();
        let store = JsonFileStore::new(&settings.storage.directory);
        let id = store.ids().unwrap()[0];

        let line = describe_universe(&store, id);
        assert!(line.starts_with(&id.to_string()));
        assert!(line.contains("my universe"));
        assert!(line.contains("5 live cells"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
