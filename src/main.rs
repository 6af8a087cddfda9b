use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use dupfind::cli::{Cli, Commands, ConfigAction, OutputFormat, StrategyArg};
use dupfind::config::Config;
use dupfind::dedup::{DedupPipeline, Execution, PipelineOutcome, PipelineStage};
use dupfind::error::{DupfindError, Result};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            profile,
            strategies,
            parallel,
            format,
        } => {
            cmd_analyze(cli.config, profile, strategies, parallel, format)
                .context("Duplicate analysis failed")?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action).context("Config command failed")?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "dupfind=debug" } else { "dupfind=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_analyze(
    config_path: Option<PathBuf>,
    profile: Option<String>,
    strategies: Vec<StrategyArg>,
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path, profile)?;

    let mut pipeline = if strategies.is_empty() {
        config.build_pipeline()
    } else {
        let stages = strategies
            .into_iter()
            .map(|s| PipelineStage::new(s.to_strategy()))
            .collect();
        DedupPipeline::with_stages(stages, Execution::from_parallel(config.pipeline.parallel))
    };
    if parallel {
        pipeline.set_execution(Execution::Parallel);
    }

    let sentences = read_sentences(std::io::stdin().lock())?;
    tracing::info!(
        "Analyzing {} sentences with {} strategies",
        sentences.len(),
        pipeline.enabled_count()
    );

    let outcome = pipeline.run(&sentences);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => print_report(&mut out, &outcome),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome).map_err(|e| DupfindError::Json {
                source: e,
                context: "Failed to serialize analysis outcome".to_string(),
            })?;
            writeln!(out, "{}", json)
        }
        OutputFormat::Filtered => outcome
            .filtered()
            .iter()
            .try_for_each(|sentence| writeln!(out, "{}", sentence)),
    }
    .map_err(|e| DupfindError::Io {
        source: e,
        context: "Failed to write output".to_string(),
    })
}

/// Trimmed, non-blank lines
fn read_sentences(reader: impl BufRead) -> Result<Vec<String>> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| DupfindError::Io {
            source: e,
            context: "Failed to read sentences from stdin".to_string(),
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }
    Ok(sentences)
}

fn print_report(out: &mut impl Write, outcome: &PipelineOutcome) -> std::io::Result<()> {
    writeln!(out, "{}", outcome.status)?;

    for stage in &outcome.stats.stages {
        writeln!(
            out,
            "  {}: {} -> {} sentences, {} groups ({}ms)",
            stage.strategy, stage.input, stage.remaining, stage.groups, stage.elapsed_ms
        )?;
    }

    for (i, group) in outcome.groups.iter().enumerate() {
        writeln!(out, "\nGroup {} ({} sentences):", i + 1, group.len())?;
        writeln!(out, "  * {}", group.original)?;
        for duplicate in &group.duplicates {
            writeln!(out, "    {}", duplicate)?;
        }
    }

    writeln!(
        out,
        "\n{} of {} sentences remain",
        outcome.stats.remaining_sentences, outcome.stats.input_sentences
    )
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path, None)?;
            let text = toml::to_string_pretty(&config)?;
            println!("{}", text);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
            println!("  Strategies: {}", config.strategies.len());
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                create_dir(parent)?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>, profile: Option<String>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'dupfind config init' to create one."
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        if let Some(profile) = profile {
            config.apply_profile(&profile)?;
        }
        return Ok(config);
    }

    if let Some(profile) = profile {
        Config::load_with_profile(&path, &profile)
    } else {
        Config::load(&path)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| DupfindError::Io {
        source: e,
        context: format!("Failed to create config directory: {:?}", dir),
    })
}
