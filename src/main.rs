//! Trailmap - learning roadmaps as phases and gated steps.
//!
//! Reads roadmap generator output from a file or stdin, extracts complete
//! phases from it and tracks progress through the flattened steps.

#![allow(clippy::single_match_else)]

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trailmap::core::Config;
use trailmap::extract::{extract_phases_with, item_names, Phase, RawInput, Strategy};
use trailmap::progress::{flatten, FileStore, ProgressTracker, Step};

/// Turn AI-generated learning roadmaps into phases and gated steps
#[derive(Parser)]
#[command(name = "trailmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract phases from a roadmap
    Phases {
        /// Roadmap file ("-" or absent reads stdin)
        file: Option<PathBuf>,

        /// Skill the roadmap is for
        #[arg(short, long, default_value = "")]
        skill: String,

        /// Segmentation strategy (overrides config)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the flattened learning steps
    Steps {
        /// Roadmap file ("-" or absent reads stdin)
        file: Option<PathBuf>,

        /// Skill the roadmap is for
        #[arg(short, long, default_value = "")]
        skill: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show or change progress
    Progress {
        #[command(subcommand)]
        operation: ProgressOperation,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ProgressOperation {
    /// Show completion state for every step
    Show {
        /// Roadmap file ("-" or absent reads stdin)
        file: Option<PathBuf>,

        /// Skill to show progress for
        #[arg(short, long)]
        skill: String,
    },

    /// Complete or uncomplete a step
    Toggle {
        /// Step index
        index: usize,

        /// Roadmap file ("-" or absent reads stdin)
        file: Option<PathBuf>,

        /// Skill to update progress for
        #[arg(short, long)]
        skill: String,
    },

    /// Clear all progress for a skill
    Reset {
        /// Skill to reset
        #[arg(short, long)]
        skill: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Follow "Phase N:" headers
    Header,
    /// Spread bullets evenly over fixed phases
    Uniform,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Header => Self::HeaderAnchored,
            StrategyArg::Uniform => Self::UniformBucket,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    // Handle commands
    match cli.command {
        Commands::Phases { file, skill, strategy, format } => {
            cmd_phases(file.as_deref(), &skill, strategy, &format)?;
        }
        Commands::Steps { file, skill, format } => {
            cmd_steps(file.as_deref(), &skill, &format)?;
        }
        Commands::Progress { operation } => {
            cmd_progress(operation)?;
        }
        Commands::Config { path } => {
            cmd_config(path)?;
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
        }
    }

    Ok(())
}

/// Read roadmap input from a file, or stdin for `-` or no file.
fn read_input(file: Option<&Path>) -> Result<RawInput> {
    let content = match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read roadmap file {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read roadmap from stdin")?;
            buf
        }
    };
    Ok(RawInput::parse(&content))
}

/// Extract phases from the input with the configured options.
fn load_phases(
    config: &Config,
    file: Option<&Path>,
    skill: &str,
    strategy: Option<StrategyArg>,
) -> Result<Vec<Phase>> {
    let mut options = config.to_extract_options();
    if let Some(strategy) = strategy {
        options.segment.strategy = strategy.into();
    }

    let raw = read_input(file)?;
    Ok(extract_phases_with(&raw, skill, &options))
}

fn load_config() -> Result<Config> {
    Config::load().context("Failed to load configuration")
}

/// Open the progress tracker for a skill.
fn open_tracker(config: &Config, skill: &str) -> Result<ProgressTracker<FileStore>> {
    let path = config.store_path()?;
    let store = FileStore::open(path);
    Ok(ProgressTracker::load(store, &config.progress.namespace, skill)
        .with_cascade(config.progress.cascade_on_uncomplete))
}

/// Show extracted phases.
fn cmd_phases(
    file: Option<&Path>,
    skill: &str,
    strategy: Option<StrategyArg>,
    format: &str,
) -> Result<()> {
    let phases = load_phases(&load_config()?, file, skill, strategy)?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&phases)?;
            println!("{json}");
        }
        _ => {
            for (i, phase) in phases.iter().enumerate() {
                print_phase(i, phase);
            }
            println!("Total: {} phases", phases.len());
        }
    }

    Ok(())
}

fn print_phase(index: usize, phase: &Phase) {
    println!("Phase {}: {} ({}) [{}]", index + 1, phase.title, phase.duration, phase.difficulty);
    print_list("Goals", phase.goals.iter().map(String::as_str));
    print_list("Topics", phase.topic_names().into_iter().chain(item_names(&phase.extra_topics)));
    print_list("Projects", phase.project_names().into_iter());
    if !phase.tools.is_empty() {
        println!("  Tools: {}", phase.tools.join(", "));
    }
    if !phase.resources.is_empty() {
        println!("  Resources: {}", phase.resources.join(", "));
    }
    println!();
}

fn print_list<'a>(label: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<_> = items.collect();
    if items.is_empty() {
        return;
    }
    println!("  {label}:");
    for item in items {
        println!("    - {item}");
    }
}

/// List flattened steps with their progress marks.
fn cmd_steps(file: Option<&Path>, skill: &str, format: &str) -> Result<()> {
    let config = load_config()?;
    let steps = flatten(&load_phases(&config, file, skill, None)?);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&steps)?;
            println!("{json}");
        }
        _ => {
            let tracker = open_tracker(&config, skill)?;
            print_steps(&steps, &tracker);
            println!("\nTotal: {} steps", steps.len());
        }
    }

    Ok(())
}

fn print_steps(steps: &[Step], tracker: &ProgressTracker<FileStore>) {
    for step in steps {
        let mark = if tracker.is_completed(step.index) {
            "[x]"
        } else if tracker.is_unlocked(step.index) {
            "[ ]"
        } else {
            "[-]"
        };
        println!("{mark} {:>3}. {} ({}, {})", step.index, step.title, step.duration, step.kind);
        println!("         {}", step.description);
    }
}

/// Handle progress commands.
fn cmd_progress(operation: ProgressOperation) -> Result<()> {
    let config = load_config()?;

    match operation {
        ProgressOperation::Show { file, skill } => {
            let steps = flatten(&load_phases(&config, file.as_deref(), &skill, None)?);
            let tracker = open_tracker(&config, &skill)?;

            print_steps(&steps, &tracker);
            print_summary(&tracker, steps.len());
        }
        ProgressOperation::Toggle { index, file, skill } => {
            let steps = flatten(&load_phases(&config, file.as_deref(), &skill, None)?);
            let Some(step) = steps.get(index) else {
                anyhow::bail!("Step {index} does not exist ({} steps)", steps.len());
            };

            let mut tracker = open_tracker(&config, &skill)?;
            let was_completed = tracker.is_completed(index);
            if tracker.toggle(index) {
                let verb = if was_completed { "Uncompleted" } else { "Completed" };
                println!("{verb} step {index}: {}", step.title);
            } else {
                println!("Step {index} is locked. Complete step {} first.", index.saturating_sub(1));
            }
            print_summary(&tracker, steps.len());
        }
        ProgressOperation::Reset { skill } => {
            let mut tracker = open_tracker(&config, &skill)?;
            tracker.reset();
            println!("Progress for {skill} cleared");
        }
    }

    Ok(())
}

fn print_summary(tracker: &ProgressTracker<FileStore>, total: usize) {
    println!(
        "\nProgress: {}/{} steps ({}%)",
        tracker.state().completed_count(),
        total,
        tracker.percent(total)
    );
    println!("{}", tracker.message(total));
    if let Some(next) = tracker.next_step(total) {
        println!("Next step: {next}");
    }
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "trailmap", &mut io::stdout());
}

/// Show configuration.
fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::find_config_file().or_else(Config::global_config_path) {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = load_config()?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}
