//! Recovering the offending variable name from coercion failure messages.
//!
//! Engines phrase coercion failures differently. Each marker pair brackets the
//! variable name in one known phrasing:
//!
//! - `Variable 'createdAt' has an invalid value`
//! - `Invalid value for argument "createdAt", expected type "Date"`

/// `(start, end)` delimiters around the variable name, tried in order.
const MARKERS: &[(&str, &str)] = &[
  ("Variable ", " has"),
  ("Invalid value for argument ", ","),
];

const QUOTES: &[char] = &['\'', '"'];

/// Extract the offending variable name from a coercion failure message.
///
/// Returns `None` when no marker pair matches or the bracketed text is empty
/// once quotes and a leading `$` are stripped.
pub fn offending_variable(message: &str) -> Option<String> {
  MARKERS
    .iter()
    .filter_map(|(start, end)| substring_between(message, start, end))
    .map(|name| name.trim().trim_matches(QUOTES).trim_start_matches('$').trim())
    .find(|name| !name.is_empty())
    .map(str::to_string)
}

/// True when `message` is phrased like an input coercion failure.
pub(crate) fn is_coercion_message(message: &str) -> bool {
  MARKERS.iter().any(|(start, end)| {
    message.starts_with(start) && substring_between(message, start, end).is_some()
  })
}

/// The text between the first `start` and the first `end` after it.
fn substring_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
  let from = text.find(start)? + start.len();
  let len = text[from..].find(end)?;
  Some(&text[from..from + len])
}
