// snipgallery: example snippet gallery with a deterministic demo harness

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::style::Stylize;
use env_logger::{Builder, Env};
use log::error;

use cli::{Cli, Cmd};
use snipgallery::catalog::{Catalog, Language, SnippetSummary};
use snipgallery::config::GalleryConfig;
use snipgallery::demo::{self, DemoProgram};

/// Exit status for failures of the tool itself, distinct from snippet statuses
const EXIT_INTERNAL: u8 = 2;

fn init_logger() {
    // RUST_LOG overrides; default keeps the snippet output clean
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() -> ExitCode {
    init_logger();

    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_INTERNAL)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = GalleryConfig::from_env()?;
    let catalog = Catalog::builtin();

    match cli.cmd {
        Cmd::List { language, json } => cmd_list(&catalog, language.as_deref(), json, &config),
        Cmd::Show { id } => cmd_show(&catalog, &id, &config),
        Cmd::Run {
            id,
            fail_alloc,
            heap_limit,
            json,
        } => {
            let mut config = config;
            if let Some(n) = fail_alloc {
                config.fail_allocation = Some(n);
            }
            if let Some(bytes) = heap_limit {
                config.heap_limit = bytes;
            }
            cmd_run(&catalog, &id, json, &config)
        }
        Cmd::Check { runs } => cmd_check(runs, &config),
        Cmd::Languages => cmd_languages(&config),
    }
}

fn heading(text: &str, config: &GalleryConfig) -> String {
    if config.color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn cmd_list(
    catalog: &Catalog,
    language: Option<&str>,
    json: bool,
    config: &GalleryConfig,
) -> Result<ExitCode> {
    let filter = language
        .map(|tag| tag.parse::<Language>().map_err(|e| anyhow!(e)))
        .transpose()?;

    let summaries: Vec<SnippetSummary> = catalog
        .iter()
        .filter(|s| filter.map_or(true, |lang| s.language() == lang))
        .map(|s| s.summary())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(ExitCode::SUCCESS);
    }

    for s in &summaries {
        let marker = if s.runnable { "run" } else { "   " };
        println!(
            "{} {:<10} {} {:>4} lines  {}",
            heading(&format!("{:<12}", s.id), config),
            s.language.display_name(),
            marker,
            s.lines,
            s.title
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_show(catalog: &Catalog, id: &str, config: &GalleryConfig) -> Result<ExitCode> {
    let snippet = catalog
        .get(id)
        .with_context(|| format!("no snippet named '{}'", id))?;

    println!(
        "{}",
        heading(
            &format!("── {} ({}) ──", snippet.id(), snippet.language()),
            config
        )
    );
    println!("{}", snippet.body());
    Ok(ExitCode::SUCCESS)
}

fn cmd_run(catalog: &Catalog, id: &str, json: bool, config: &GalleryConfig) -> Result<ExitCode> {
    let snippet = catalog
        .get(id)
        .with_context(|| format!("no snippet named '{}'", id))?;

    let outcome = demo::run_snippet(snippet, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", outcome.stdout);
    }

    Ok(ExitCode::from(snippet_status(outcome.exit_code)))
}

/// Process status for a snippet's exit code; out-of-range codes become internal failures
fn snippet_status(exit_code: i32) -> u8 {
    u8::try_from(exit_code).unwrap_or(EXIT_INTERNAL)
}

/// `check` fails as soon as one demo's runs disagree
fn check_status(results: &[bool]) -> u8 {
    if results.iter().all(|&stable| stable) {
        0
    } else {
        1
    }
}

fn cmd_check(runs: usize, config: &GalleryConfig) -> Result<ExitCode> {
    let mut results = Vec::with_capacity(DemoProgram::ALL.len());

    for program in DemoProgram::ALL {
        let stable = demo::check_determinism(program, config, runs.max(1))
            .with_context(|| format!("demo for '{}' failed", program.snippet_id()))?;
        let status = match (stable, config.color) {
            (true, true) => "ok".green().to_string(),
            (false, true) => "DIFFERS".red().bold().to_string(),
            (true, false) => "ok".to_string(),
            (false, false) => "DIFFERS".to_string(),
        };
        println!("{:<12} {}", program.snippet_id(), status);
        results.push(stable);
    }

    Ok(ExitCode::from(check_status(&results)))
}

fn cmd_languages(config: &GalleryConfig) -> Result<ExitCode> {
    for lang in Language::ALL {
        println!(
            "{} {:<12} .{}",
            heading(&format!("{:<12}", lang.tag()), config),
            lang.display_name(),
            lang.extensions().join(" .")
        );
    }
    Ok(ExitCode::SUCCESS)
}
