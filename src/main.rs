//! Resume matcher: skill-based resume and job description matching tool

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{AnalysisConfig, Config, OutputFormat};
use resume_matcher::input::InputManager;
use resume_matcher::output::{save_report_to_file, suggest_filename, MatchReport, ReportContext, ReportGenerator};
use resume_matcher::{SkillMatcher, Vocabulary, WeightTable};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

const INPUT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Cannot use config file {}", path.display())),
        None => Ok(Config::load()?),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
            highlight,
            token_only,
            vocabulary,
            weights,
        } => {
            if let Some(format) = output {
                config.output.format = cli::parse_output_format(&format).map_err(anyhow::Error::msg)?;
            }
            config.output.detailed |= detailed;
            config.output.highlight |= highlight;
            apply_engine_overrides(&mut config, token_only, vocabulary, weights);

            cli::validate_file_extension(&resume, INPUT_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, INPUT_EXTENSIONS)
                    .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
            }

            info!("Starting resume match");
            let spinner = Spinner::start("📂 Reading documents...")?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Cannot read resume {}", resume.display()))?;

            let (job_text, job_label) = match (job, job_text) {
                (Some(path), _) => {
                    let text = input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("Cannot read job description {}", path.display()))?;
                    (text, path.display().to_string())
                }
                (None, Some(text)) => (text, "inline".to_string()),
                (None, None) => anyhow::bail!("Provide a job description with --job or --job-text"),
            };

            spinner.set_message("🔍 Matching skills...");
            let matcher = build_matcher(&config)?;
            let weights = WeightTable::load(&config.vocabulary.weights_path)?;
            let result = matcher.match_texts(&resume_text, &job_text, &weights);
            drop(spinner);

            let report = MatchReport::build(
                result,
                &weights,
                &job_text,
                ReportContext {
                    resume_file: resume.display().to_string(),
                    job_file: job_label,
                    vocabulary_size: matcher.vocabulary().len(),
                    strategy: matcher.strategy(),
                },
            );

            let format = config.output.format;
            let use_colors = config.output.color_output && save.is_none();
            let generator =
                ReportGenerator::with_options(use_colors, config.output.detailed, config.output.highlight, true);
            let content = generator.generate_report(&report, &format)?;

            match save {
                Some(target) => {
                    let target = resolve_save_path(target, &format, &resume);
                    save_report_to_file(&content, &target)
                        .with_context(|| format!("Cannot write report to {}", target.display()))?;
                    println!("💾 Report saved to {}", target.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Skills {
            input,
            token_only,
            vocabulary,
        } => {
            cli::validate_file_extension(&input, INPUT_EXTENSIONS).map_err(anyhow::Error::msg)?;
            apply_engine_overrides(&mut config, token_only, vocabulary, None);

            let spinner = Spinner::start("📂 Reading document...")?;
            let text = InputManager::new()
                .with_cache(false)
                .extract_text(&input)
                .await
                .with_context(|| format!("Cannot read {}", input.display()))?;

            spinner.set_message("🔍 Extracting skills...");
            let matcher = build_matcher(&config)?;
            let skills = matcher.extract_skills(&text);
            drop(spinner);

            println!("🧠 Skills in {} ({}, {} found)\n", input.display(), matcher.strategy(), skills.len());
            if skills.is_empty() {
                println!("  None");
            }
            for skill in &skills {
                println!("  • {}", skill);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).context("Cannot render configuration")?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn apply_engine_overrides(
    config: &mut Config,
    token_only: bool,
    vocabulary: Option<PathBuf>,
    weights: Option<PathBuf>,
) {
    if token_only {
        config.analysis = AnalysisConfig::token_only();
    }
    if let Some(path) = vocabulary {
        config.vocabulary.vocabulary_path = path;
    }
    if let Some(path) = weights {
        config.vocabulary.weights_path = path;
    }
}

fn build_matcher(config: &Config) -> Result<SkillMatcher> {
    let vocabulary = Vocabulary::load(&config.vocabulary.vocabulary_path).with_context(|| {
        format!(
            "Cannot load skill vocabulary from {}",
            config.vocabulary.vocabulary_path.display()
        )
    })?;
    Ok(SkillMatcher::from_config(&config.analysis, Arc::new(vocabulary))?)
}

/// A directory target gets a generated file name
fn resolve_save_path(target: PathBuf, format: &OutputFormat, resume: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, &resume.to_string_lossy(), true))
    } else {
        target
    }
}

/// Progress spinner that is cleared when dropped
struct Spinner(ProgressBar);

impl Spinner {
    fn start(message: &'static str) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner:.blue} {msg}")?);
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self(bar))
    }

    fn set_message(&self, message: &'static str) {
        self.0.set_message(message);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}
