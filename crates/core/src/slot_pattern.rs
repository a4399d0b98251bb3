use std::{ops::Range, sync::LazyLock};

use regex::Regex;

static QUOTED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("hardcoded regex must compile"));

/// How the value token is picked out of a coarse structural match.
#[derive(Debug, Clone)]
enum TokenRule {
    /// First match of a numeric sub-pattern
    Numeric(Regex),
    /// Numeric sub-pattern, falling back to the content of the first quoted string
    NumericOrQuoted(Regex),
    /// Content of the first quoted string
    Quoted,
}

/// Two-level search for one version slot: a coarse structural pattern (attribute
/// declaration, header line, key line) and a nested pattern for the value inside it.
///
/// A numeric sub-pattern with a capture group yields the group, so it can anchor on
/// surrounding quotes without making them part of the token.
#[derive(Debug, Clone)]
pub struct SlotPattern {
    coarse: Regex,
    token: TokenRule,
}

/// Absolute byte ranges of a located slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMatch {
    /// Span of the coarse structural match
    pub span: Range<usize>,
    /// Span of the value token, always inside `span`
    pub token: Range<usize>,
}

impl SlotMatch {
    #[must_use]
    pub fn token_text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.token.clone()]
    }
}

impl SlotPattern {
    #[must_use]
    pub fn numeric(coarse: Regex, numeric: Regex) -> Self {
        Self {
            coarse,
            token: TokenRule::Numeric(numeric),
        }
    }

    #[must_use]
    pub fn numeric_or_quoted(coarse: Regex, numeric: Regex) -> Self {
        Self {
            coarse,
            token: TokenRule::NumericOrQuoted(numeric),
        }
    }

    #[must_use]
    pub fn quoted(coarse: Regex) -> Self {
        Self {
            coarse,
            token: TokenRule::Quoted,
        }
    }

    #[must_use]
    pub fn locate(&self, text: &str) -> Option<SlotMatch> {
        self.locate_from(text, 0)
    }

    /// First slot whose coarse match starts at or after `from`.
    ///
    /// Line anchors in the coarse pattern still see the whole text, so `from` can
    /// point into the middle of a line.
    #[must_use]
    pub fn locate_from(&self, text: &str, from: usize) -> Option<SlotMatch> {
        let found = self.coarse.find_at(text, from)?;
        let token = self.token_range(found.as_str())?;
        Some(SlotMatch {
            span: found.range(),
            token: found.start() + token.start..found.start() + token.end,
        })
    }

    /// First slot whose coarse match lies entirely inside `range`.
    #[must_use]
    pub fn locate_in(&self, text: &str, range: Range<usize>) -> Option<SlotMatch> {
        self.locate_from(text, range.start)
            .filter(|found| found.span.end <= range.end)
    }

    /// Every slot inside `range`, in order. Coarse matches without a usable token are
    /// skipped.
    #[must_use]
    pub fn locate_all_in(&self, text: &str, range: Range<usize>) -> Vec<SlotMatch> {
        let mut matches = Vec::new();
        let mut position = range.start;
        while let Some(found) = self.coarse.find_at(text, position) {
            if found.end() > range.end {
                break;
            }
            if let Some(token) = self.token_range(found.as_str()) {
                matches.push(SlotMatch {
                    span: found.range(),
                    token: found.start() + token.start..found.start() + token.end,
                });
            }
            position = if found.end() > found.start() {
                found.end()
            } else {
                found.end() + 1
            };
            if position > text.len() {
                break;
            }
        }
        matches
    }

    fn token_range(&self, matched: &str) -> Option<Range<usize>> {
        let quoted = || {
            QUOTED_PATTERN
                .captures(matched)
                .and_then(|captures| captures.get(1))
                .map(|m| m.range())
        };
        match &self.token {
            TokenRule::Numeric(numeric) => numeric_token(numeric, matched),
            TokenRule::NumericOrQuoted(numeric) => {
                numeric_token(numeric, matched).or_else(quoted)
            }
            TokenRule::Quoted => quoted(),
        }
    }
}

/// The first capture group if the pattern has one, the whole match otherwise.
fn numeric_token(numeric: &Regex, matched: &str) -> Option<Range<usize>> {
    numeric
        .captures(matched)
        .and_then(|captures| captures.get(1).or_else(|| captures.get(0)))
        .map(|m| m.range())
}

/// Replace exactly `range` of `text`; every other character is kept as is.
#[must_use]
pub fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len() + replacement.len());
    result.push_str(&text[..range.start]);
    result.push_str(replacement);
    result.push_str(&text[range.end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_pattern() -> SlotPattern {
        SlotPattern::numeric(
            Regex::new(r#"(?m)^\s*Version\s*=\s*"[^"]*""#).unwrap(),
            Regex::new(r"\d+(?:\.\d+){1,3}").unwrap(),
        )
    }

    #[test]
    fn test_locate_numeric_token() {
        let text = "# header\nVersion = \"1.2.3\"\nName = \"x\"\n";
        let found = version_pattern().locate(text).unwrap();
        assert_eq!(found.token_text(text), "1.2.3");
        assert_eq!(&text[found.span.clone()], "Version = \"1.2.3\"");
    }

    #[test]
    fn test_locate_missing_slot() {
        assert!(version_pattern().locate("Name = \"x\"\n").is_none());
        assert!(version_pattern().locate("Version = \"beta\"\n").is_none());
    }

    #[test]
    fn test_quoted_fallback() {
        let pattern = SlotPattern::numeric_or_quoted(
            Regex::new(r#"Info\("[^"]*"\)"#).unwrap(),
            Regex::new(r"\d+(?:\.\d+){1,3}").unwrap(),
        );
        let text = r#"Info("release candidate")"#;
        let found = pattern.locate(text).unwrap();
        assert_eq!(found.token_text(text), "release candidate");
    }

    #[test]
    fn test_numeric_capture_group() {
        let pattern = SlotPattern::numeric(
            Regex::new(r#"Info\("[^"]*"\)"#).unwrap(),
            Regex::new(r#""(\d+(?:\.\d+){1,3})""#).unwrap(),
        );
        let text = r#"Info("4.5.6")"#;
        assert_eq!(pattern.locate(text).unwrap().token_text(text), "4.5.6");
        assert!(pattern.locate(r#"Info("4.5.6 beta")"#).is_none());
    }

    #[test]
    fn test_quoted_takes_whole_content() {
        let pattern = SlotPattern::quoted(Regex::new(r#"Info\("[^"]*"\)"#).unwrap());
        let text = r#"Info("1.2.3-beta")"#;
        assert_eq!(pattern.locate(text).unwrap().token_text(text), "1.2.3-beta");
    }

    #[test]
    fn test_locate_from_skips_earlier_matches() {
        let text = "Version = \"1.0\"\n[section]\nVersion = \"2.0\"\n";
        let anchor = text.find("[section]").unwrap();
        let found = version_pattern().locate_from(text, anchor).unwrap();
        assert_eq!(found.token_text(text), "2.0");
    }

    #[test]
    fn test_locate_in_stops_at_range_end() {
        let text = "[a]\nName = \"x\"\n[b]\nVersion = \"2.0\"\n";
        let section = 0..text.find("[b]").unwrap();
        assert!(version_pattern().locate_in(text, section).is_none());
        assert_eq!(
            version_pattern()
                .locate_in(text, 0..text.len())
                .unwrap()
                .token_text(text),
            "2.0"
        );
    }

    #[test]
    fn test_locate_all_in() {
        let text = "Version = \"1.0\"\nVersion = \"x\"\nVersion = \"2.0.1\"\n[b]\nVersion = \"3.0\"\n";
        let tokens = version_pattern()
            .locate_all_in(text, 0..text.find("[b]").unwrap())
            .iter()
            .map(|found| found.token_text(text).to_string())
            .collect::<Vec<_>>();
        assert_eq!(tokens, vec!["1.0", "2.0.1"]);
    }

    #[test]
    fn test_splice_only_touches_range() {
        let text = "a \"1.0.0.0\" b";
        let found = 3..10;
        assert_eq!(splice(text, found, "2.1.3.7"), "a \"2.1.3.7\" b");
    }
}
