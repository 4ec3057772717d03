//! Source formatting seam.

use thiserror::Error;

/// Errors reported by a formatter. The pipeline treats them as non-fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unbalanced `{delimiter}` at line {line}")]
    Unbalanced { delimiter: char, line: usize },

    #[error("formatter failed: {0}")]
    Other(String),
}

/// Turns raw generated text into formatted text.
pub trait SourceFormatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Returns the source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl SourceFormatter for PassThrough {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Whitespace normalizer.
///
/// Normalizes line endings, strips trailing whitespace, collapses runs of
/// blank lines and ends the file with exactly one newline. Bracket balance is
/// checked outside string literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TidyFormatter;

impl SourceFormatter for TidyFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        check_balance(source)?;

        let mut out = String::with_capacity(source.len());
        let mut blank_run = 0;
        for line in source.replace("\r\n", "\n").lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 || out.is_empty() {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            out.push_str(line);
            out.push('\n');
        }

        while out.ends_with("\n\n") {
            out.pop();
        }
        Ok(out)
    }
}

fn check_balance(source: &str) -> Result<(), FormatError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        for c in line.chars() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' => stack.push((c, line_no)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        _ => {
                            return Err(FormatError::Unbalanced {
                                delimiter: c,
                                line: line_no,
                            });
                        }
                    }
                }
                _ => {}
            }
        }
    }

    match stack.pop() {
        Some((delimiter, line)) => Err(FormatError::Unbalanced { delimiter, line }),
        None => Ok(()),
    }
}
