//! Demonstration harness
//!
//! Each runnable snippet has a Rust routine here that makes the same calls,
//! in the same order, as the snippet's `main`. Running one produces an
//! [`Outcome`]: the captured output, the exit code, and heap statistics.
//!
//! The routines never read the snippet text; they are written against it.

pub mod hello_c;
pub mod hello_cpp;
pub mod hello_ts;
pub mod simple_c;

use crate::catalog::Snippet;
use crate::config::GalleryConfig;
use crate::runtime::errors::RuntimeError;
use crate::runtime::Machine;
use log::info;
use serde::Serialize;
use thiserror::Error;

/// Runnable demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DemoProgram {
    HelloC,
    SimpleC,
    HelloCpp,
    HelloTs,
}

impl DemoProgram {
    pub const ALL: [DemoProgram; 4] = [
        DemoProgram::HelloC,
        DemoProgram::SimpleC,
        DemoProgram::HelloCpp,
        DemoProgram::HelloTs,
    ];

    /// Catalog id of the snippet this demo reproduces
    pub fn snippet_id(self) -> &'static str {
        match self {
            DemoProgram::HelloC => "hello.c",
            DemoProgram::SimpleC => "simple.c",
            DemoProgram::HelloCpp => "hello.cpp",
            DemoProgram::HelloTs => "hello.ts",
        }
    }

    fn entry(self) -> fn(&mut Machine) -> Result<i32, RuntimeError> {
        match self {
            DemoProgram::HelloC => hello_c::main,
            DemoProgram::SimpleC => simple_c::main,
            DemoProgram::HelloCpp => hello_cpp::main,
            DemoProgram::HelloTs => hello_ts::main,
        }
    }
}

/// Result of one demo run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub snippet: &'static str,
    pub stdout: String,
    pub exit_code: i32,
    /// Allocation requests made, including any that returned NULL
    pub allocations: usize,
    /// Blocks never freed
    pub live_blocks: usize,
}

impl Outcome {
    pub fn success(&self) -> bool {
        self.exit_code == crate::runtime::constants::EXIT_SUCCESS
    }

    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("snippet '{0}' has no demo and can only be displayed")]
    NotRunnable(&'static str),

    #[error("demo for '{snippet}' failed: {source}")]
    Runtime {
        snippet: &'static str,
        #[source]
        source: RuntimeError,
    },
}

/// Run `program` on a fresh machine
pub fn run(program: DemoProgram, config: &GalleryConfig) -> Result<Outcome, RuntimeError> {
    info!("running demo for {}", program.snippet_id());

    let mut machine = Machine::new(config);
    let exit_code = (program.entry())(&mut machine)?;

    let outcome = Outcome {
        snippet: program.snippet_id(),
        allocations: machine.heap().allocation_count(),
        live_blocks: machine.heap().live_blocks(),
        stdout: machine.terminal().contents().to_string(),
        exit_code,
    };

    info!(
        "{} exited with {} after {} allocation(s)",
        outcome.snippet, outcome.exit_code, outcome.allocations
    );
    Ok(outcome)
}

/// Run the demo attached to `snippet`
pub fn run_snippet(snippet: &Snippet, config: &GalleryConfig) -> Result<Outcome, RunError> {
    let program = snippet.demo().ok_or(RunError::NotRunnable(snippet.id()))?;
    run(program, config).map_err(|source| RunError::Runtime {
        snippet: snippet.id(),
        source,
    })
}

/// Run `program` `runs` times and report whether every outcome matched
pub fn check_determinism(
    program: DemoProgram,
    config: &GalleryConfig,
    runs: usize,
) -> Result<bool, RuntimeError> {
    let first = run(program, config)?;
    for _ in 1..runs {
        if run(program, config)? != first {
            return Ok(false);
        }
    }
    Ok(true)
}
