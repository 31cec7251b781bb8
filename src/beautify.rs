//! Built-in pretty-printer for GML source.
//!
//! `GmlBeautifier` normalizes indentation, trailing whitespace, blank-line
//! runs, and opening-brace placement over the JavaScript-compatible lexical
//! grammar GML shares: double-quoted strings, `@"` verbatim strings that may
//! span lines, `//` and `/* */` comments, and nesting by `{`, `[`, `(`.
//!
//! The transform is deliberately line-oriented and leaves token spacing
//! inside a line alone. Applying it twice yields the first pass's output
//! byte for byte, which the canonicalizer's equality check relies on.
//!
//! `Beautifier` is the seam for swapping in any other compliant
//! pretty-printer without touching the canonicalizer's touch-up rules.

use crate::config::{BeautifyOptions, BraceStyle};

#[derive(Debug, thiserror::Error)]
pub enum BeautifyError {
    #[error("unbalanced '{close}' at line {line}")]
    Unbalanced { close: char, line: usize },
    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment { line: usize },
    #[error("unterminated @\" string starting at line {line}")]
    UnterminatedString { line: usize },
}

/// The opaque pretty-printer contract: deterministic text-to-text transform
/// driven by a configuration object.
pub trait Beautifier {
    fn beautify(&self, source: &str, options: &BeautifyOptions) -> Result<String, BeautifyError>;
}

#[derive(Debug, Default)]
pub struct GmlBeautifier;

impl Beautifier for GmlBeautifier {
    fn beautify(&self, source: &str, options: &BeautifyOptions) -> Result<String, BeautifyError> {
        let scanned = scan(source)?;
        let lines = reindent(&scanned, options)?;
        let lines = if options.brace_style == BraceStyle::Collapse {
            collapse_braces(lines)
        } else {
            lines
        };
        Ok(join(lines, source, options))
    }
}

/// Lexical state carried across line boundaries.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Carry {
    Code,
    Block,
    Verbatim,
}

/// Within-line lexical state.
#[derive(Clone, Copy)]
enum State {
    Code,
    Str { escape: bool },
    Verbatim,
    Block,
}

struct ScanLine {
    text: String,
    starts_in: Carry,
    ends_in: Carry,
    /// Bracket events in source order: `true` opens, `false` closes.
    events: Vec<(bool, char)>,
    /// Closers at the textual start of the line, before any other code.
    leading_closers: usize,
    has_line_comment: bool,
}

fn scan(source: &str) -> Result<Vec<ScanLine>, BeautifyError> {
    let mut carry = Carry::Code;
    let mut carry_start_line = 0usize;
    let mut out = Vec::new();
    for (idx, raw) in source.split('\n').enumerate() {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let starts_in = carry;
        let mut events: Vec<(bool, char)> = Vec::new();
        let mut leading_closers = 0usize;
        let mut leading = starts_in == Carry::Code;
        let mut has_line_comment = false;
        let mut state = match carry {
            Carry::Code => State::Code,
            Carry::Block => State::Block,
            Carry::Verbatim => State::Verbatim,
        };
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match state {
                State::Code => match c {
                    '"' => {
                        leading = false;
                        state = State::Str { escape: false };
                    }
                    '@' if chars.peek() == Some(&'"') => {
                        chars.next();
                        leading = false;
                        carry_start_line = idx + 1;
                        state = State::Verbatim;
                    }
                    '/' if chars.peek() == Some(&'/') => {
                        has_line_comment = true;
                        // the rest of the line cannot affect nesting
                        break;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        leading = false;
                        carry_start_line = idx + 1;
                        state = State::Block;
                    }
                    '{' | '[' | '(' => {
                        leading = false;
                        events.push((true, c));
                    }
                    '}' | ']' | ')' => {
                        if leading {
                            leading_closers += 1;
                        }
                        events.push((false, c));
                    }
                    c if c.is_whitespace() => {}
                    _ => leading = false,
                },
                State::Str { escape } => {
                    if escape {
                        state = State::Str { escape: false };
                    } else if c == '\\' {
                        state = State::Str { escape: true };
                    } else if c == '"' {
                        state = State::Code;
                    }
                }
                State::Verbatim => {
                    if c == '"' {
                        state = State::Code;
                    }
                }
                State::Block => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        state = State::Code;
                    }
                }
            }
        }
        // Plain strings do not span lines; an unterminated one ends at EOL.
        let ends_in = match state {
            State::Block => Carry::Block,
            State::Verbatim => Carry::Verbatim,
            _ => Carry::Code,
        };
        out.push(ScanLine {
            text: text.to_string(),
            starts_in,
            ends_in,
            events,
            leading_closers,
            has_line_comment,
        });
        carry = ends_in;
    }
    match carry {
        Carry::Block => Err(BeautifyError::UnterminatedComment {
            line: carry_start_line,
        }),
        Carry::Verbatim => Err(BeautifyError::UnterminatedString {
            line: carry_start_line,
        }),
        Carry::Code => Ok(out),
    }
}

struct OutLine {
    text: String,
    blank: bool,
    code: bool,
    has_line_comment: bool,
    lone_open: bool,
}

fn blank_line() -> OutLine {
    OutLine {
        text: String::new(),
        blank: true,
        code: false,
        has_line_comment: false,
        lone_open: false,
    }
}

fn flush_blanks(out: &mut Vec<OutLine>, pending: &mut usize, options: &BeautifyOptions) {
    if *pending > 0 && !out.is_empty() && options.preserve_newlines {
        for _ in 0..(*pending).min(options.max_preserve_newlines) {
            out.push(blank_line());
        }
    }
    *pending = 0;
}

fn reindent(scanned: &[ScanLine], options: &BeautifyOptions) -> Result<Vec<OutLine>, BeautifyError> {
    let unit = options.indent_char.repeat(options.indent_size);
    let mut depth = 0usize;
    let mut pending_blanks = 0usize;
    let mut out: Vec<OutLine> = Vec::new();
    for (idx, line) in scanned.iter().enumerate() {
        let is_blank = line.starts_in == Carry::Code
            && line.ends_in == Carry::Code
            && line.text.trim().is_empty();
        if is_blank {
            pending_blanks += 1;
        } else {
            flush_blanks(&mut out, &mut pending_blanks, options);
            if line.starts_in == Carry::Code {
                // Keep the tail when the line opens a verbatim string; its
                // trailing whitespace is string content.
                let trimmed = if line.ends_in == Carry::Verbatim {
                    line.text.trim_start()
                } else {
                    line.text.trim()
                };
                let indent = depth.saturating_sub(line.leading_closers);
                out.push(OutLine {
                    text: format!("{}{}", unit.repeat(indent), trimmed),
                    blank: false,
                    code: true,
                    has_line_comment: line.has_line_comment,
                    lone_open: trimmed == "{",
                });
            } else {
                // Continuation of a block comment or verbatim string: the
                // content must survive byte for byte, so no reindent.
                let text = if line.starts_in == Carry::Verbatim || line.ends_in == Carry::Verbatim {
                    line.text.clone()
                } else {
                    line.text.trim_end().to_string()
                };
                out.push(OutLine {
                    text,
                    blank: false,
                    code: false,
                    has_line_comment: line.has_line_comment,
                    lone_open: false,
                });
            }
        }
        for &(open, ch) in &line.events {
            if open {
                depth += 1;
            } else if depth == 0 {
                return Err(BeautifyError::Unbalanced {
                    close: ch,
                    line: idx + 1,
                });
            } else {
                depth -= 1;
            }
        }
    }
    Ok(out)
}

/// Join a line holding only `{` onto the preceding statement line. Skipped
/// when the previous line is blank, non-code, or carries a line comment that
/// would swallow the brace.
fn collapse_braces(lines: Vec<OutLine>) -> Vec<OutLine> {
    let mut out: Vec<OutLine> = Vec::new();
    for line in lines {
        if line.lone_open {
            if let Some(prev) = out.last_mut() {
                if prev.code && !prev.blank && !prev.has_line_comment {
                    prev.text.push_str(" {");
                    continue;
                }
            }
        }
        out.push(line);
    }
    out
}

fn join(lines: Vec<OutLine>, source: &str, options: &BeautifyOptions) -> String {
    let mut text = lines
        .into_iter()
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        return text;
    }
    if options.end_with_newline || source.ends_with('\n') {
        text.push('\n');
    }
    text
}
