//! Canonical snake_case keys for human-readable text.
//!
//! The same key doubles as the frequency-index bucket and as a locale-bundle
//! path segment, so the mapping has to be stable across runs and processes.

/// Map arbitrary text to a snake_case identifier.
///
/// Text is split into ASCII tokens, in order of preference at each position:
///
/// 1. an uppercase run of two or more letters that ends at a word boundary,
///    or right before a capitalized word (`XMLHttp` yields `xml`)
/// 2. an optionally capitalized lowercase run with trailing digits (`Column2`)
/// 3. a single uppercase letter
/// 4. a run of digits
///
/// Anything else (whitespace, punctuation, non-ASCII) separates tokens.
/// Tokens are lower-cased and joined with `_`.
///
/// Text without any token falls back to the raw text with whitespace runs
/// and dots replaced by `_`, so the result stays a single path segment.
///
/// # Examples
///
/// ```
/// use schemasync::core::normalize_key;
///
/// assert_eq!(normalize_key("Welcome to our store"), "welcome_to_our_store");
/// assert_eq!(normalize_key("XMLHttpRequest"), "xml_http_request");
/// assert_eq!(normalize_key("Show 2 columns"), "show_2_columns");
/// assert_eq!(normalize_key("日本語"), "日本語");
/// ```
pub fn normalize_key(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        match match_token(&chars, pos) {
            Some(end) => {
                let token: String = chars[pos..end].iter().collect();
                tokens.push(token.to_ascii_lowercase());
                pos = end;
            }
            None => pos += 1,
        }
    }

    if tokens.is_empty() {
        return fallback_key(text);
    }
    tokens.join("_")
}

fn match_token(chars: &[char], start: usize) -> Option<usize> {
    acronym(chars, start)
        .or_else(|| word(chars, start))
        .or_else(|| single_upper(chars, start))
        .or_else(|| digits(chars, start))
}

fn is_upper(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(char::is_ascii_uppercase)
}

fn is_lower(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(char::is_ascii_lowercase)
}

fn is_digit(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(char::is_ascii_digit)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `[A-Z]{2,}` followed by a word boundary or by `[A-Z][a-z]`.
fn acronym(chars: &[char], start: usize) -> Option<usize> {
    let mut end = start;
    while is_upper(chars, end) {
        end += 1;
    }
    let run = end - start;
    if run < 2 {
        return None;
    }

    // The run ends on an uppercase letter, so a boundary only exists when
    // the next character is not a word character.
    let at_boundary = chars.get(end).is_none_or(|c| !is_word_char(*c));
    if at_boundary {
        return Some(end);
    }
    // Give the last capital back to the following capitalized word.
    if run > 2 && is_lower(chars, end) {
        return Some(end - 1);
    }
    None
}

/// `[A-Z]?[a-z]+[0-9]*`
fn word(chars: &[char], start: usize) -> Option<usize> {
    let mut end = start;
    if is_upper(chars, end) {
        end += 1;
    }
    let lower_start = end;
    while is_lower(chars, end) {
        end += 1;
    }
    if end == lower_start {
        return None;
    }
    while is_digit(chars, end) {
        end += 1;
    }
    Some(end)
}

fn single_upper(chars: &[char], start: usize) -> Option<usize> {
    is_upper(chars, start).then_some(start + 1)
}

fn digits(chars: &[char], start: usize) -> Option<usize> {
    let mut end = start;
    while is_digit(chars, end) {
        end += 1;
    }
    (end > start).then_some(end)
}

fn fallback_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace('.', "_")
}
