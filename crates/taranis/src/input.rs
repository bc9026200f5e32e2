//! Input tokenizer.
//!
//! Turns raw command line tokens into `(key, value)` occurrences:
//! - prefix detection against the accepted prefixes, longest first
//! - `key=value` / `key:value` splitting on the earliest separator
//! - joining `--key value` (and `--key: value`) across two tokens

use crate::value::Value;

/// Separators between a key and its value inside one token, in priority order
/// for separators found at the same index.
pub const VALUE_SEPARATORS: [&str; 2] = ["=", ":"];

/// Prefixes that mark a token as an argument on this platform, longest first.
///
/// `-` and `--` are always accepted. `/` is accepted too where it is not the
/// path separator, so it never swallows POSIX paths.
pub fn accepted_prefixes() -> Vec<String> {
    let mut prefixes = vec!["-".to_string(), "--".to_string()];
    if std::path::MAIN_SEPARATOR != '/' {
        prefixes.push("/".to_string());
    }
    sort_longest_first(&mut prefixes);
    prefixes
}

pub(crate) fn sort_longest_first(prefixes: &mut [String]) {
    // Stable, so equal-length prefixes keep their declaration order.
    prefixes.sort_by(|a, b| b.len().cmp(&a.len()));
}

/// Split `text` on the earliest separator.
///
/// Returns `(key, separator, value)`. Everything after the separator is the
/// value verbatim, including further separators.
pub fn split_key_value<'a>(text: &'a str, separators: &[&'a str]) -> Option<(&'a str, &'a str, &'a str)> {
    let (index, separator) = separators
        .iter()
        .filter_map(|sep| text.find(sep).map(|idx| (idx, *sep)))
        .min_by_key(|(idx, _)| *idx)?;
    Some((&text[..index], separator, &text[index + separator.len()..]))
}

/// One raw input token and what it parsed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputToken {
    raw: String,
    prefix: Option<String>,
    remainder: String,
    key: String,
    separator: Option<String>,
    value: Option<String>,
}

impl InputToken {
    /// Parse `raw` against `prefixes`, which must be ordered longest first.
    pub fn parse(raw: &str, prefixes: &[String]) -> Self {
        let trimmed = raw.trim();
        let prefix = prefixes
            .iter()
            .find(|p| {
                trimmed
                    .get(..p.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(p))
            })
            .cloned();

        let mut token = Self {
            raw: raw.to_string(),
            prefix,
            remainder: String::new(),
            key: String::new(),
            separator: None,
            value: None,
        };
        let Some(prefix) = &token.prefix else {
            return token;
        };

        token.remainder = trimmed[prefix.len()..].to_string();
        match split_key_value(&token.remainder, &VALUE_SEPARATORS) {
            Some((key, separator, value)) => {
                token.key = key.to_string();
                token.separator = Some(separator.to_string());
                if !value.is_empty() {
                    token.value = Some(value.to_string());
                }
            }
            None => token.key = token.remainder.clone(),
        }
        token
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The accepted prefix this token started with, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Text after the prefix.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// A prefix followed by a non-empty key.
    pub fn is_valid(&self) -> bool {
        self.prefix.is_some() && !self.key.is_empty()
    }

    /// Valid, but nothing was attached to the key within this token.
    pub fn wants_value(&self) -> bool {
        self.is_valid() && self.value.is_none()
    }
}

/// A key found in the input, with the value resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub key: String,
    pub value: Value,
}

/// Iterator over the occurrences in a token sequence, left to right.
///
/// Tokens that are not valid arguments are skipped, unless they were consumed
/// as the value of the argument before them.
#[derive(Debug)]
pub struct Tokenizer<'a, S> {
    tokens: &'a [S],
    prefixes: &'a [String],
    index: usize,
}

impl<'a, S: AsRef<str>> Tokenizer<'a, S> {
    pub fn new(tokens: &'a [S], prefixes: &'a [String]) -> Self {
        Self {
            tokens,
            prefixes,
            index: 0,
        }
    }

    fn parse_at(&self, index: usize) -> Option<InputToken> {
        self.tokens
            .get(index)
            .map(|raw| InputToken::parse(raw.as_ref(), self.prefixes))
    }
}

impl<S: AsRef<str>> Iterator for Tokenizer<'_, S> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.tokens.len() {
            let token = self.parse_at(self.index)?;
            self.index += 1;

            if !token.is_valid() {
                tracing::debug!(token = token.raw(), "skipping token that is not an argument");
                continue;
            }

            let mut value = token.value().map(Value::from);
            if token.wants_value() {
                if let Some(next) = self.parse_at(self.index) {
                    if !next.is_valid() {
                        value = Some(Value::from(next.raw()));
                        self.index += 1;
                    }
                }
            }

            return Some(Occurrence {
                key: token.key().to_string(),
                value: value.unwrap_or(Value::Bool(true)),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        let mut p = vec!["-".to_string(), "--".to_string(), "/".to_string()];
        sort_longest_first(&mut p);
        p
    }

    fn occurrences(tokens: &[&str]) -> Vec<(String, Value)> {
        let prefixes = prefixes();
        Tokenizer::new(tokens, &prefixes)
            .map(|o| (o.key, o.value))
            .collect()
    }

    #[test]
    fn double_dash_is_checked_before_single() {
        let token = InputToken::parse("--foo", &prefixes());
        assert_eq!(token.prefix(), Some("--"));
        assert_eq!(token.key(), "foo");

        let token = InputToken::parse("-foo", &prefixes());
        assert_eq!(token.prefix(), Some("-"));
        assert_eq!(token.key(), "foo");
    }

    #[test]
    fn platform_prefixes_are_longest_first() {
        let prefixes = accepted_prefixes();
        assert_eq!(prefixes[0], "--");
        assert!(prefixes.contains(&"-".to_string()));
        assert_eq!(prefixes.contains(&"/".to_string()), std::path::MAIN_SEPARATOR != '/');
    }

    #[test]
    fn first_separator_wins_and_rest_is_verbatim() {
        let token = InputToken::parse("--remote=1.2.3.4=earth", &prefixes());
        assert_eq!(token.key(), "remote");
        assert_eq!(token.separator(), Some("="));
        assert_eq!(token.value(), Some("1.2.3.4=earth"));

        let token = InputToken::parse("--key:value1:value2", &prefixes());
        assert_eq!(token.key(), "key");
        assert_eq!(token.value(), Some("value1:value2"));

        let token = InputToken::parse("--url:http://host=1", &prefixes());
        assert_eq!(token.key(), "url");
        assert_eq!(token.separator(), Some(":"));
        assert_eq!(token.value(), Some("http://host=1"));
    }

    #[test]
    fn split_prefers_declaration_order_only_on_ties() {
        assert_eq!(split_key_value("a:b=c", &VALUE_SEPARATORS), Some(("a", ":", "b=c")));
        assert_eq!(split_key_value("a=b:c", &VALUE_SEPARATORS), Some(("a", "=", "b:c")));
        assert_eq!(split_key_value("abc", &VALUE_SEPARATORS), None);
        assert_eq!(split_key_value("a==b", &["==", "="]), Some(("a", "==", "b")));
    }

    #[test]
    fn malformed_tokens_are_invalid() {
        for raw in ["-", "--", "--=value", "value", ""] {
            assert!(!InputToken::parse(raw, &prefixes()).is_valid(), "{raw:?}");
        }
        let token = InputToken::parse("  --mouse  ", &prefixes());
        assert!(token.is_valid());
        assert_eq!(token.key(), "mouse");
        assert_eq!(token.remainder(), "mouse");
    }

    #[test]
    fn bare_key_joins_next_plain_token() {
        assert_eq!(
            occurrences(&["--remote", "1.2.3.4"]),
            vec![("remote".to_string(), Value::from("1.2.3.4"))]
        );
        assert_eq!(
            occurrences(&["--remote:", "1.2.3.4"]),
            vec![("remote".to_string(), Value::from("1.2.3.4"))]
        );
        assert_eq!(
            occurrences(&["--remote=1.2.3.4"]),
            vec![("remote".to_string(), Value::from("1.2.3.4"))]
        );
    }

    #[test]
    fn next_argument_is_not_joined() {
        assert_eq!(
            occurrences(&["--mouse", "--remote", "x", "stray"]),
            vec![
                ("mouse".to_string(), Value::Bool(true)),
                ("remote".to_string(), Value::from("x")),
            ]
        );
    }

    #[test]
    fn trailing_bare_key_is_true() {
        assert_eq!(
            occurrences(&["value", "-m"]),
            vec![("m".to_string(), Value::Bool(true))]
        );
        assert_eq!(
            occurrences(&["--remote:"]),
            vec![("remote".to_string(), Value::Bool(true))]
        );
    }

    #[test]
    fn lone_dash_can_be_a_value() {
        assert_eq!(
            occurrences(&["--input", "-"]),
            vec![("input".to_string(), Value::from("-"))]
        );
    }
}
