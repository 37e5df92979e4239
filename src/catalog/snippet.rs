//! A single catalog entry

use super::language::Language;
use crate::demo::DemoProgram;
use serde::Serialize;

/// A named, immutable block of example source text
///
/// Fields are private and the body is `'static`, so nothing can change a
/// snippet after it is compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    id: &'static str,
    language: Language,
    title: &'static str,
    body: &'static str,
    demo: Option<DemoProgram>,
}

/// Serializable listing entry (no body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetSummary {
    pub id: &'static str,
    pub language: Language,
    pub title: &'static str,
    pub lines: usize,
    pub runnable: bool,
}

impl Snippet {
    pub(crate) const fn new(
        id: &'static str,
        language: Language,
        title: &'static str,
        body: &'static str,
        demo: Option<DemoProgram>,
    ) -> Self {
        Snippet {
            id,
            language,
            title,
            body,
            demo,
        }
    }

    /// Identifier, which is also the file name
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn body(&self) -> &'static str {
        self.body
    }

    /// Demo reproducing this snippet's output, if it has one
    pub fn demo(&self) -> Option<DemoProgram> {
        self.demo
    }

    pub fn is_runnable(&self) -> bool {
        self.demo.is_some()
    }

    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }

    pub fn summary(&self) -> SnippetSummary {
        SnippetSummary {
            id: self.id,
            language: self.language,
            title: self.title,
            lines: self.line_count(),
            runnable: self.is_runnable(),
        }
    }
}
