//! CSS import: pasted stylesheet text to per-mode token patches
//!
//! Accepts the CSS a user copies out of another theme tool or their own
//! `globals.css`:
//!
//! ```css
//! :root {
//!   --background: #ffffff;
//!   --primary: oklch(0.2 0.1 250);
//! }
//! .dark {
//!   --background: #0a0a0a;
//! }
//! ```
//!
//! Declarations under a selector that targets `.dark` (or
//! `[data-theme="dark"]`) land in the dark set, everything else in the light
//! set. `@layer` and `@media` blocks are descended into, `@theme` blocks are
//! skipped. Parsing never fails: problems are reported as [`ImportDiagnostic`]s
//! and whatever was recognised is returned.

use std::fmt::{Display, Formatter};

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, rest},
    sequence::preceded,
    IResult,
};
use tracing::debug;

use crate::tokens::{StyleSet, ThemeMode, TokenKey};

/// Nesting beyond this depth is skipped.
const MAX_DEPTH: usize = 16;

/// Severity level for import diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input was dropped (malformed declaration, unbalanced braces)
    Warning,
    /// Input was understood but ignored (unknown property, `@theme` block)
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A problem found while importing, with its position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDiagnostic {
    pub severity: Severity,
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// The property name if applicable
    pub property: Option<String>,
    /// The attempted value if applicable
    pub value: Option<String>,
}

impl Display for ImportDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CSS {}: line {}, column {}: {}",
            self.severity, self.line, self.column, self.message
        )?;
        match (&self.property, &self.value) {
            (Some(prop), Some(val)) => write!(f, " ({prop}: {val})"),
            (Some(prop), None) => write!(f, " ({prop})"),
            (None, Some(val)) => write!(f, " (`{val}`)"),
            (None, None) => Ok(()),
        }
    }
}

/// Tokens recognised in the input, split by mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedStyles {
    pub light_colors: StyleSet,
    pub dark_colors: StyleSet,
    pub diagnostics: Vec<ImportDiagnostic>,
}

impl ImportedStyles {
    /// Whether no token was recognised in either mode.
    pub fn is_empty(&self) -> bool {
        self.light_colors.is_empty() && self.dark_colors.is_empty()
    }

    pub fn for_mode(&self, mode: ThemeMode) -> &StyleSet {
        match mode {
            ThemeMode::Light => &self.light_colors,
            ThemeMode::Dark => &self.dark_colors,
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ImportDiagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Parse pasted CSS into light and dark token patches.
pub fn parse_css_input(css: &str) -> ImportedStyles {
    let (source, unterminated_comment) = blank_comments(css);
    let mut parser = ImportParser::new(&source);

    if let Some(offset) = unterminated_comment {
        parser.report(
            Severity::Warning,
            &source[offset..],
            "unterminated comment",
            None,
            None,
        );
    }

    parser.parse_block(&source, ThemeMode::Light, 0);
    parser.finish()
}

struct ImportParser<'a> {
    source: &'a str,
    imported: ImportedStyles,
}

impl<'a> ImportParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            imported: ImportedStyles::default(),
        }
    }

    fn finish(self) -> ImportedStyles {
        debug!(
            light = self.imported.light_colors.len(),
            dark = self.imported.dark_colors.len(),
            diagnostics = self.imported.diagnostics.len(),
            "imported CSS"
        );
        self.imported
    }

    /// Parse rules and declarations until the block closes.
    ///
    /// Returns the input after the closing `}` (or the empty tail).
    fn parse_block(&mut self, mut input: &'a str, scope: ThemeMode, depth: usize) -> &'a str {
        loop {
            input = input.trim_start();

            if input.is_empty() {
                if depth > 0 {
                    self.report(
                        Severity::Warning,
                        input,
                        "unclosed block at end of input",
                        None,
                        None,
                    );
                }
                return input;
            }

            if let Some(after) = input.strip_prefix('}') {
                if depth == 0 {
                    self.report(Severity::Warning, input, "unexpected `}`", None, None);
                    input = after;
                    continue;
                }
                return after;
            }

            if let Some(after) = input.strip_prefix(';') {
                input = after;
                continue;
            }

            if input.starts_with('@') {
                input = self.at_rule(input, scope, depth);
                continue;
            }

            let end = boundary(input);
            let head = &input[..end];
            match input[end..].chars().next() {
                Some('{') => {
                    let scope = selector_scope(head.trim(), scope);
                    input = self.nested(&input[end + 1..], scope, depth);
                }
                Some(';') => {
                    self.declaration(head, scope);
                    input = &input[end + 1..];
                }
                _ => {
                    // `}` closes the block on the next turn
                    self.declaration(head, scope);
                    input = &input[end..];
                }
            }
        }
    }

    fn nested(&mut self, body: &'a str, scope: ThemeMode, depth: usize) -> &'a str {
        if depth + 1 > MAX_DEPTH {
            self.report(Severity::Warning, body, "nesting too deep", None, None);
            return self.skip_block(body);
        }
        self.parse_block(body, scope, depth + 1)
    }

    fn at_rule(&mut self, input: &'a str, scope: ThemeMode, depth: usize) -> &'a str {
        let name = at_rule_name(input).map(|(_, name)| name).unwrap_or("");
        let end = boundary(input);

        match input[end..].chars().next() {
            Some('{') => {
                let body = &input[end + 1..];
                if name.eq_ignore_ascii_case("theme") {
                    self.report(Severity::Info, input, "skipped @theme block", None, None);
                    self.skip_block(body)
                } else {
                    self.nested(body, scope, depth)
                }
            }
            // Statement at-rules such as `@import`
            Some(';') => &input[end + 1..],
            _ => &input[end..],
        }
    }

    /// Skip a block body, including nested blocks, up to its closing `}`.
    fn skip_block(&mut self, body: &'a str) -> &'a str {
        let mut depth = 1usize;
        for (index, c) in body.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return &body[index + 1..];
                    }
                }
                _ => {}
            }
        }
        self.report(
            Severity::Warning,
            body,
            "unclosed block at end of input",
            None,
            None,
        );
        &body[body.len()..]
    }

    fn declaration(&mut self, head: &'a str, scope: ThemeMode) {
        let text = head.trim();
        if text.is_empty() {
            return;
        }

        let (name, value) = match all_consuming(declaration)(text) {
            Ok((_, parsed)) => parsed,
            Err(_) => {
                self.report(
                    Severity::Warning,
                    head,
                    "could not parse declaration",
                    None,
                    Some(text),
                );
                return;
            }
        };

        let Some(custom) = name.strip_prefix("--") else {
            self.report(
                Severity::Info,
                head,
                "ignored non-custom property",
                Some(name),
                None,
            );
            return;
        };

        let key = match custom.parse::<TokenKey>() {
            Ok(key) => key,
            Err(_) => {
                self.report(
                    Severity::Info,
                    head,
                    "ignored unknown custom property",
                    Some(name),
                    None,
                );
                return;
            }
        };

        let value = strip_important(value);
        if value.is_empty() {
            self.report(Severity::Warning, head, "empty value", Some(name), None);
            return;
        }

        let target = match scope {
            ThemeMode::Light => &mut self.imported.light_colors,
            ThemeMode::Dark => &mut self.imported.dark_colors,
        };
        target.set(key, value);
    }

    fn report(
        &mut self,
        severity: Severity,
        fragment: &str,
        message: &str,
        property: Option<&str>,
        value: Option<&str>,
    ) {
        let (line, column) = calculate_position(self.source, fragment);
        let diagnostic = ImportDiagnostic {
            severity,
            message: message.to_string(),
            line,
            column,
            property: property.map(str::to_string),
            value: value.map(str::to_string),
        };
        debug!("{}", diagnostic);
        self.imported.diagnostics.push(diagnostic);
    }
}

/// Index of the first `{`, `;` or `}`, or the input length.
fn boundary(input: &str) -> usize {
    input
        .find(|c: char| matches!(c, '{' | ';' | '}'))
        .unwrap_or(input.len())
}

/// Line and column (1-indexed) of `fragment` within `original`.
fn calculate_position(original: &str, fragment: &str) -> (usize, usize) {
    let offset = (fragment.as_ptr() as usize)
        .saturating_sub(original.as_ptr() as usize)
        .min(original.len());
    let consumed = &original[..offset];

    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map(|pos| offset - pos)
        .unwrap_or(offset + 1);

    (line, column)
}

/// Replace comments with spaces, keeping byte offsets and newlines intact.
///
/// Returns the offset of an unterminated comment, if any.
fn blank_comments(css: &str) -> (String, Option<usize>) {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    let mut unterminated = None;

    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let comment_and_after = &rest[start..];
        let (comment, after) = match comment_and_after[2..].find("*/") {
            Some(end) => comment_and_after.split_at(end + 4),
            None => {
                unterminated = Some(out.len());
                (comment_and_after, "")
            }
        };
        for c in comment.chars() {
            if c == '\n' {
                out.push('\n');
            } else {
                out.extend(std::iter::repeat(' ').take(c.len_utf8()));
            }
        }
        rest = after;
    }
    out.push_str(rest);

    (out, unterminated)
}

/// Parse an identifier (alphanumeric, hyphen, underscore)
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn at_rule_name(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), identifier)(input)
}

/// `name: value` with the value running to the end of the input.
fn declaration(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(':')(input)?;
    let (input, value) = rest(input)?;
    Ok((input, (name, value.trim())))
}

fn strip_important(value: &str) -> &str {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.strip_suffix("!important") {
        Some(kept) => trimmed[..kept.len()].trim_end(),
        None => trimmed,
    }
}

/// Mode a selector's declarations belong to.
fn selector_scope(selector: &str, parent: ThemeMode) -> ThemeMode {
    if parent == ThemeMode::Dark {
        return ThemeMode::Dark;
    }

    let selector = selector.to_ascii_lowercase();
    let compact: String = selector.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.contains(":not(.dark") {
        return ThemeMode::Light;
    }

    let data_theme_dark = ["[data-theme=\"dark\"]", "[data-theme='dark']", "[data-theme=dark]"]
        .iter()
        .any(|pattern| compact.contains(pattern));

    if data_theme_dark || has_class(&selector, "dark") {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}

/// Whether `selector` contains `.class` as a whole class name.
fn has_class(selector: &str, class: &str) -> bool {
    let needle = format!(".{class}");
    selector.match_indices(&needle).any(|(index, _)| {
        selector[index + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '-' || c == '_'))
    })
}
