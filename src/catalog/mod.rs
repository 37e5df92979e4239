//! Snippet catalog
//!
//! - [`language`]: Language tags, display names and file extensions
//! - [`snippet`]: The immutable [`Snippet`] entry
//!
//! Bodies are embedded from `snippets/` at compile time. The catalog is built
//! once and only hands out shared references.

pub mod language;
pub mod snippet;

pub use language::Language;
pub use snippet::{Snippet, SnippetSummary};

use crate::demo::DemoProgram;
use rustc_hash::FxHashMap;

const BUILTIN: [Snippet; 6] = [
    Snippet::new(
        "hello.c",
        Language::C,
        "Structs, loops and malloc in C",
        include_str!("../../snippets/hello.c"),
        Some(DemoProgram::HelloC),
    ),
    Snippet::new(
        "hello.cpp",
        Language::Cpp,
        "Classes and sorting a vector in C++",
        include_str!("../../snippets/hello.cpp"),
        Some(DemoProgram::HelloCpp),
    ),
    Snippet::new(
        "simple.c",
        Language::C,
        "Arrays, struct pointers and a guarded malloc in C",
        include_str!("../../snippets/simple.c"),
        Some(DemoProgram::SimpleC),
    ),
    Snippet::new(
        "hello.ts",
        Language::TypeScript,
        "Interfaces, generics and classes in TypeScript",
        include_str!("../../snippets/hello.ts"),
        Some(DemoProgram::HelloTs),
    ),
    Snippet::new(
        "hello.java",
        Language::Java,
        "Inner classes, lambdas and streams in Java",
        include_str!("../../snippets/hello.java"),
        None,
    ),
    Snippet::new(
        "hello.py",
        Language::Python,
        "Functions, comprehensions and classes in Python",
        include_str!("../../snippets/hello.py"),
        None,
    ),
];

/// Read-only collection of snippets, indexed by id
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Snippet>,
    index: FxHashMap<&'static str, usize>,
}

impl Catalog {
    /// The snippets shipped with the gallery, in display order
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.to_vec())
    }

    fn from_entries(entries: Vec<Snippet>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id(), i))
            .collect();
        Catalog { entries, index }
    }

    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.entries.iter()
    }

    pub fn by_language(&self, language: Language) -> impl Iterator<Item = &Snippet> {
        self.entries
            .iter()
            .filter(move |s| s.language() == language)
    }

    pub fn runnable(&self) -> impl Iterator<Item = &Snippet> {
        self.entries.iter().filter(|s| s.is_runnable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
