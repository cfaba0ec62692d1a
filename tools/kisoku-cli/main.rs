use clap::{Parser, Subcommand, ValueEnum};
use kisoku::prelude::*;
use kisoku::validate::validate_condition;
use std::fs;
use tracing_subscriber::EnvFilter;

/// What kind of structure a JSON file holds.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputKind {
    Condition,
    Actions,
}

/// Builds, checks and previews workflow rule conditions and actions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a TOML editor config
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log edits and rejected input (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a condition or action list file and list every problem
    Check {
        path: String,
        #[arg(short, long, value_enum, default_value = "condition")]
        kind: InputKind,
    },
    /// Print a condition or action list file as normalized, pretty JSON
    Fmt {
        path: String,
        #[arg(short, long, value_enum, default_value = "condition")]
        kind: InputKind,
    },
    /// Print a condition file as a readable expression
    Describe { path: String },
    /// Validate a rule file and print the payload that would be submitted
    Payload { path: String },
    /// Suggest field paths for an entity type
    Suggest {
        entity: String,
        #[arg(default_value = "")]
        input: String,
        /// Active custom-field key (repeatable)
        #[arg(long = "custom-field")]
        custom_fields: Vec<String>,
    },
    /// Render a dry-run response file
    Preview { path: String },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Check { path, kind } => run_check(&path, kind, &config),
        Command::Fmt { path, kind } => run_fmt(&path, kind, &config),
        Command::Describe { path } => {
            let condition = load_condition(&path, &config);
            println!("{}", condition);
        }
        Command::Payload { path } => run_payload(&path, &config),
        Command::Suggest {
            entity,
            input,
            custom_fields,
        } => {
            let entity: EntityType = entity.parse().unwrap_or_else(|e: String| exit_with_error(&e));
            let suggester =
                PathSuggester::new(&config).with_custom_fields(entity, custom_fields);
            for path in suggester.suggest(entity, &input) {
                println!("{}", path);
            }
        }
        Command::Preview { path } => {
            let text = read_file(&path);
            let response: DryRunResponse = serde_json::from_str(&text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse dry-run response: {}", e))
            });
            println!("{}", PreviewFormatter::format_dry_run(&response));
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_check(path: &str, kind: InputKind, config: &EditorConfig) {
    let report = match kind {
        InputKind::Condition => {
            let condition = load_condition(path, config);
            let mut report = ValidationReport::new();
            report.extend(validate_condition(&condition));
            if condition.depth() > config.max_depth {
                println!(
                    "Note: condition nests {} levels; the builder edits up to {}.",
                    condition.depth(),
                    config.max_depth
                );
            }
            report
        }
        InputKind::Actions => load_actions(path, config).validate(),
    };

    if report.is_valid() {
        println!("OK: {} is valid", path);
        return;
    }
    for issue in &report.issues {
        println!("  - {}", issue);
    }
    exit_with_error(&report.to_string());
}

fn run_fmt(path: &str, kind: InputKind, config: &EditorConfig) {
    let pretty = match kind {
        InputKind::Condition => to_pretty_json(&load_condition(path, config)),
        InputKind::Actions => to_pretty_json(&load_actions(path, config)),
    };
    let pretty = pretty.unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("{}", pretty);
}

fn run_payload(path: &str, config: &EditorConfig) {
    let text = read_file(path);
    let payload = RulePayload::from_json_text_with(&text, config)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse rule: {}", e)));
    let draft = RuleDraft::from(payload);

    println!("{}\n", PreviewFormatter::format_draft(&draft));
    match draft.to_payload() {
        Ok(payload) => {
            let pretty = to_pretty_json(&payload).unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("{}", pretty);
        }
        Err(report) => {
            for issue in &report.issues {
                println!("  - {}", issue);
            }
            exit_with_error(&report.to_string());
        }
    }
}

fn load_condition(path: &str, config: &EditorConfig) -> Condition {
    let text = read_file(path);
    Condition::from_json_text_with(&text, config)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load condition: {}", e)))
}

fn load_actions(path: &str, config: &EditorConfig) -> ActionList {
    let text = read_file(path);
    ActionList::from_json_text_with(&text, config)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load actions: {}", e)))
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
