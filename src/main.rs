//! ai-commit - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

use ai_commit::config::Config;
use ai_commit::evaluate::{best_report, evaluate_grid, load_dataset};
use ai_commit::generate::{GenerationRequest, GenerationSettings, Generator};
use ai_commit::git::{amend_head, create_commit, last_commit_diff, open_repository, staged_diff};
use ai_commit::llm::{OpenAiProvider, RetryPolicy};
use ai_commit::prompt::PromptVersion;

/// Generate commit messages from git diffs using an LLM.
#[derive(Parser, Debug)]
#[command(name = "ai-commit")]
#[command(about = "Generate Conventional Commit messages from git diffs using an LLM")]
#[command(version)]
struct Cli {
    /// Model name (overrides MODEL_NAME)
    #[arg(short = 'm', long)]
    model: Option<String>,

    /// Prompt version: prompt_A, prompt_B or prompt_C (overrides PROMPT_VERSION)
    #[arg(short = 'p', long)]
    prompt: Option<String>,

    /// Output language (overrides AI_COMMIT_LANGUAGE and the locale)
    #[arg(short = 'l', long, global = true)]
    language: Option<String>,

    /// Use this diff text instead of the staged changes
    #[arg(long, conflicts_with_all = ["diff_file", "last"])]
    diff: Option<String>,

    /// Read the diff from a file instead of the staged changes
    #[arg(long, conflicts_with = "last")]
    diff_file: Option<PathBuf>,

    /// Describe the last commit instead of the staged changes
    #[arg(long)]
    last: bool,

    /// Create the commit (or amend it with --last)
    #[arg(long)]
    commit: bool,

    /// Skip the confirmation prompt when committing
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Show debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score model and prompt combinations against a labelled JSON Lines dataset
    Eval {
        /// Path to the dataset file
        #[arg(long)]
        dataset: PathBuf,

        /// Models to evaluate (defaults to MODEL_NAME)
        #[arg(short = 'm', long = "model")]
        models: Vec<String>,

        /// Prompt versions to evaluate (defaults to all)
        #[arg(short = 'p', long = "prompt")]
        prompts: Vec<String>,

        /// Also print the best model / prompt combination
        #[arg(long)]
        compare: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Command::Eval {
            dataset,
            models,
            prompts,
            compare,
        }) => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let generator = build_generator(&config)?;
            let models = if models.is_empty() {
                vec![config.model.clone()]
            } else {
                models.clone()
            };
            let language = cli.language.clone().unwrap_or_else(|| config.language.clone());
            run_eval(&generator, dataset, &models, prompts, *compare, &language).await
        }
        None => run_generate(&cli).await,
    }
}

fn build_generator(config: &Config) -> Result<Generator<OpenAiProvider>> {
    let settings = GenerationSettings {
        retry: RetryPolicy {
            max_attempts: config.max_attempts,
            ..RetryPolicy::default()
        },
        ..GenerationSettings::default()
    };
    let provider = OpenAiProvider::from_config(config).context("Failed to create provider")?;
    Ok(Generator::new(provider, settings))
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_generate(cli: &Cli) -> Result<()> {
    let diff = read_diff(cli)?;

    // Checked before loading config so an empty diff never needs credentials
    if diff.trim().is_empty() {
        println!("No staged changes.");
        return Ok(());
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    let generator = build_generator(&config)?;

    let request = GenerationRequest {
        diff,
        model: cli.model.clone().unwrap_or(config.model),
        prompt_version: cli.prompt.clone().unwrap_or(config.prompt_version),
        language: cli.language.clone().unwrap_or(config.language),
    };

    let msg = generator.generate(&request).await?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&msg).context("Failed to serialize commit message")?
        );
    } else {
        println!("{}", msg.to_message());
    }

    if !cli.commit {
        return Ok(());
    }

    if !cli.yes {
        println!();
        let prompt = if cli.last {
            "Amend last commit with this message?"
        } else {
            "Commit with this message?"
        };
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let repo = open_repository(".").context("Not a git repository")?;
    let oid = if cli.last {
        amend_head(&repo, &msg.to_message()).context("Failed to amend commit")?
    } else {
        create_commit(&repo, &msg.to_message()).context("Failed to create commit")?
    };

    eprintln!("✓ Created commit {}", oid);
    Ok(())
}

/// Resolve the diff text from the flag that was given, defaulting to staged changes.
fn read_diff(cli: &Cli) -> Result<String> {
    if let Some(diff) = &cli.diff {
        return Ok(diff.clone());
    }

    if let Some(path) = &cli.diff_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read diff file {}", path.display()));
    }

    let repo = open_repository(".")
        .context("Not a git repository. Run ai-commit from within a git repository.")?;

    if cli.last {
        last_commit_diff(&repo).context("Failed to read last commit")
    } else {
        staged_diff(&repo).context("Failed to read staged changes")
    }
}

async fn run_eval(
    generator: &Generator<OpenAiProvider>,
    dataset: &Path,
    models: &[String],
    prompts: &[String],
    compare: bool,
    language: &str,
) -> Result<()> {
    let rows = load_dataset(dataset)
        .with_context(|| format!("Failed to load dataset {}", dataset.display()))?;

    let versions: Vec<String> = if prompts.is_empty() {
        PromptVersion::ALL.iter().map(|v| v.as_str().to_string()).collect()
    } else {
        prompts.to_vec()
    };

    println!(
        "Evaluating {} rows across {} model(s) and {} prompt version(s)...",
        rows.len(),
        models.len(),
        versions.len()
    );

    let reports = evaluate_grid(generator, &rows, models, &versions, language).await;
    if reports.is_empty() {
        bail!("No model / prompt combination produced a result");
    }

    for report in &reports {
        println!("{}", report);
    }

    if compare && let Some(best) = best_report(&reports) {
        println!();
        println!(
            "Best: {} / {} (combined {:.2})",
            best.model,
            best.prompt_version,
            best.combined()
        );
    }

    Ok(())
}
