//! Turning free-form provider output into a list of insight strings.
//!
//! Strategies run in a fixed order and the first one that yields at least one
//! non-empty string wins:
//!
//! 1. [`JsonArray`]: the whole response is a JSON array of strings.
//! 2. [`EmbeddedJsonArray`]: a `[...]` block somewhere in the text is.
//! 3. [`LineHeuristic`]: bullet / numbered / long lines.

use std::sync::LazyLock;

use regex::Regex;

/// Lines longer than this are kept by the line heuristic even without a marker.
const LONG_LINE: usize = 20;

/// Stripped lines must be longer than this to count as an insight.
const MIN_INSIGHT_LEN: usize = 10;

/// Outermost `[...]` block, spanning lines.
static EMBEDDED_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("Invalid embedded array regex"));

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]").expect("Invalid numbered list regex"));

/// One way of reading insights out of a response.
pub trait ResponseParser: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `None` when this strategy does not apply.
    fn parse(&self, text: &str) -> Option<Vec<String>>;
}

/// The response is exactly a JSON array of strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonArray;

impl ResponseParser for JsonArray {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, text: &str) -> Option<Vec<String>> {
        parse_string_array(text.trim())
    }
}

/// A JSON array embedded in surrounding prose or a code fence.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedJsonArray;

impl ResponseParser for EmbeddedJsonArray {
    fn name(&self) -> &'static str {
        "embedded_json"
    }

    fn parse(&self, text: &str) -> Option<Vec<String>> {
        let found = EMBEDDED_ARRAY.find(text)?;
        parse_string_array(found.as_str())
    }
}

/// Line splitting for bullet or numbered lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineHeuristic;

impl ResponseParser for LineHeuristic {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn parse(&self, text: &str) -> Option<Vec<String>> {
        let items: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| has_list_marker(line) || line.chars().count() > LONG_LINE)
            .map(strip_markers)
            .filter(|line| line.chars().count() > MIN_INSIGHT_LEN)
            .map(str::to_string)
            .collect();
        non_empty(items)
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInsights {
    /// Name of the strategy that produced the items.
    pub strategy: &'static str,
    pub items: Vec<String>,
}

/// The default strategy order.
#[must_use]
pub fn default_parsers() -> Vec<Box<dyn ResponseParser>> {
    vec![
        Box::new(JsonArray),
        Box::new(EmbeddedJsonArray),
        Box::new(LineHeuristic),
    ]
}

/// Run the default strategies over `text`.
#[must_use]
pub fn parse_response(text: &str) -> Option<ParsedInsights> {
    parse_with(&default_parsers(), text)
}

/// Run `parsers` in order; the first non-empty result wins.
#[must_use]
pub fn parse_with(parsers: &[Box<dyn ResponseParser>], text: &str) -> Option<ParsedInsights> {
    parsers.iter().find_map(|parser| {
        let items = parser.parse(text)?;
        tracing::debug!(strategy = parser.name(), count = items.len(), "parsed provider response");
        Some(ParsedInsights {
            strategy: parser.name(),
            items,
        })
    })
}

fn parse_string_array(text: &str) -> Option<Vec<String>> {
    let items: Vec<String> = serde_json::from_str(text).ok()?;
    non_empty(
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() { None } else { Some(items) }
}

fn has_list_marker(line: &str) -> bool {
    line.starts_with(['-', '*', '•']) || NUMBERED.is_match(line)
}

fn strip_markers(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_whitespace() || c.is_ascii_digit() || matches!(c, '-' | '*' | '•' | '.' | ')' | '"')
    })
    .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '"' | ','))
}
