// Output capture for demo runs

use serde::Serialize;

/// Mock terminal for capturing printf output
///
/// Text is stored exactly as printed, so a trailing space before a newline
/// (as in `printf("%d ", n)`) is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Terminal {
    buffer: String,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal {
            buffer: String::new(),
        }
    }

    /// Print without adding a newline
    pub fn print(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Print followed by a newline (`std::endl`, `console.log`)
    pub fn println(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Everything printed so far
    pub fn contents(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_accumulate_verbatim() {
        let mut term = Terminal::new();
        term.print("Numbers: ");
        term.print("5 ");
        term.print("2 \n");
        term.println("done");
        assert_eq!(term.contents(), "Numbers: 5 2 \ndone\n");
    }

    #[test]
    fn test_new_terminal_is_empty() {
        assert_eq!(Terminal::new().contents(), "");
    }
}
