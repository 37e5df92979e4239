use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};

/// Browse and run the example snippet gallery
#[derive(Parser, Debug)]
#[command(name = "snipgallery", version, about = "Example snippet gallery")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List snippets
    List {
        /// Only snippets in this language (c, cpp, java, python, typescript)
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print a snippet's source
    Show {
        /// Snippet id, e.g. hello.c
        id: String,
    },
    /// Reproduce a snippet's output and exit with its status
    Run {
        id: String,
        /// Make the N-th allocation (1-based) return NULL
        #[arg(long, value_name = "N", value_parser = positive())]
        fail_alloc: Option<usize>,
        /// Heap limit in bytes
        #[arg(long, value_name = "BYTES", value_parser = positive())]
        heap_limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Run every runnable snippet repeatedly and compare outputs
    Check {
        #[arg(long, default_value_t = 2)]
        runs: usize,
    },
    /// List known languages
    Languages,
}

/// Counts and byte sizes where zero has no meaning
fn positive() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}
