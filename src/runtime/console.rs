//! Console abstraction for `show` and `ask`
//!
//! A running program talks to one [`Console`]. The standard variant forwards
//! to process stdin/stdout; the captured variant serves scripted input lines
//! and accumulates output, so tests can assert a run's exact output without
//! touching real streams.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

#[derive(Debug)]
pub enum Console {
    /// Process stdin/stdout.
    Standard,
    /// Scripted input and buffered output.
    Captured {
        input: VecDeque<String>,
        output: String,
    },
}

impl Console {
    pub fn standard() -> Self {
        Console::Standard
    }

    /// A console that serves the given lines to `ask` and keeps all output.
    pub fn captured<I, S>(input_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Console::Captured {
            input: input_lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Write text without a trailing newline. Used for prompts, so the
    /// standard variant flushes immediately.
    pub fn write(&mut self, text: &str) {
        match self {
            Console::Standard => {
                print!("{}", text);
                let _ = io::stdout().flush();
            }
            Console::Captured { output, .. } => output.push_str(text),
        }
    }

    /// Write one output line.
    pub fn write_line(&mut self, text: &str) {
        match self {
            Console::Standard => println!("{}", text),
            Console::Captured { output, .. } => {
                output.push_str(text);
                output.push('\n');
            }
        }
    }

    /// Read one input line without its line ending. End of input yields an
    /// empty line.
    pub fn read_line(&mut self) -> String {
        match self {
            Console::Standard => {
                let mut line = String::new();
                match io::stdin().lock().read_line(&mut line) {
                    Ok(_) => {
                        while line.ends_with('\n') || line.ends_with('\r') {
                            line.pop();
                        }
                        line
                    }
                    Err(_) => String::new(),
                }
            }
            Console::Captured { input, .. } => input.pop_front().unwrap_or_default(),
        }
    }

    /// Everything written so far. Always empty for the standard console,
    /// which writes straight through.
    pub fn output(&self) -> &str {
        match self {
            Console::Standard => "",
            Console::Captured { output, .. } => output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_output_accumulates() {
        let mut console = Console::captured(Vec::<String>::new());
        console.write("prompt: ");
        console.write_line("value");
        assert_eq!(console.output(), "prompt: value\n");
    }

    #[test]
    fn test_captured_input_serves_lines_in_order() {
        let mut console = Console::captured(["first", "second"]);
        assert_eq!(console.read_line(), "first");
        assert_eq!(console.read_line(), "second");
    }

    #[test]
    fn test_exhausted_input_reads_empty_lines() {
        let mut console = Console::captured(["only"]);
        console.read_line();
        assert_eq!(console.read_line(), "");
    }
}
