use std::{ops::Range, sync::LazyLock};

use regex::Regex;
use verstamp_core::{
    Component, FormatMode, SlotPattern, SubstituteError, Version, VersionError, VersionFormat,
    VersionKind,
};

static ANCHOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*\w+[ \t]+VERSIONINFO\b").expect("hardcoded regex must compile")
});

static SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*[,.][ \t]*").expect("hardcoded regex must compile"));

const HEADER_NUMBER: &str = r"\d+(?:[ \t]*[,.][ \t]*\d+){1,3}";

/// Only entries that hold nothing but the number (and the usual `\0`) are rewritten.
const STRING_NUMBER: &str = r#""(\d+(?:[ \t]*[,.][ \t]*\d+){0,3})[ \t]*(?:\\0)?""#;

const SLOTS: [VersionKind; 2] = [VersionKind::File, VersionKind::Informational];

/// The header statement and the string table entry of one slot.
#[derive(Debug)]
struct SlotPatterns {
    header: SlotPattern,
    string: SlotPattern,
}

impl SlotPatterns {
    fn new(keyword: &str, value_name: &str) -> Self {
        let header = SlotPattern::numeric(
            regex(&format!(r"(?mi)^[ \t]*{keyword}[ \t]+{HEADER_NUMBER}")),
            regex(HEADER_NUMBER),
        );
        let string = SlotPattern::numeric(
            regex(&format!(
                r#"(?mi)^[ \t]*VALUE[ \t]+"{value_name}"[ \t]*,[ \t]*"[^"\r\n]*""#
            )),
            regex(STRING_NUMBER),
        );
        Self { header, string }
    }
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("resource regex must compile")
}

/// `VERSIONINFO` block of a Windows resource script (`.rc`, `.rc2`).
///
/// Carries the file slot (`FILEVERSION` / `"FileVersion"`) and the informational slot
/// (`PRODUCTVERSION` / `"ProductVersion"`). There is no primary slot.
#[derive(Debug)]
pub struct ResourceScriptFormat {
    file: SlotPatterns,
    product: SlotPatterns,
}

impl Default for ResourceScriptFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceScriptFormat {
    pub fn new() -> Self {
        Self {
            file: SlotPatterns::new("FILEVERSION", "FileVersion"),
            product: SlotPatterns::new("PRODUCTVERSION", "ProductVersion"),
        }
    }

    fn patterns(&self, kind: VersionKind) -> Option<&SlotPatterns> {
        match kind {
            VersionKind::File => Some(&self.file),
            VersionKind::Informational => Some(&self.product),
            VersionKind::Primary => None,
        }
    }

    /// Token ranges to rewrite for `kind` with the component count each one receives,
    /// collected block by block so every header is rewritten with its own strings.
    fn targets(&self, text: &str, kind: VersionKind) -> Vec<(Range<usize>, usize)> {
        let Some(patterns) = self.patterns(kind) else {
            return Vec::new();
        };
        let mut targets = Vec::new();
        for block in blocks(text) {
            if let Some(header) = patterns.header.locate_in(text, block.clone()) {
                targets.push((header.token, 4));
            }
            for entry in patterns.string.locate_all_in(text, block) {
                let count = component_count(entry.token_text(text));
                targets.push((entry.token, count));
            }
        }
        targets
    }
}

/// Text of each `VERSIONINFO` resource, from the end of its anchor line up to the next
/// anchor or the end of the file.
fn blocks(text: &str) -> Vec<Range<usize>> {
    let anchors = ANCHOR_PATTERN.find_iter(text).collect::<Vec<_>>();
    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| {
            let end = anchors
                .get(index + 1)
                .map_or(text.len(), |next| next.start());
            anchor.end()..end
        })
        .collect()
}

fn component_count(token: &str) -> usize {
    SEPARATOR_PATTERN.split(token).count()
}

/// `version` written with the first separator of `existing`, cut to `count` components.
fn rewrite(existing: &str, version: &Version, count: usize) -> String {
    let separator = SEPARATOR_PATTERN
        .find(existing)
        .map_or(".", |separator| separator.as_str());
    version.format_truncated(count).replace('.', separator)
}

impl VersionFormat for ResourceScriptFormat {
    fn name(&self) -> &'static str {
        "resource script"
    }

    fn slots(&self) -> &[VersionKind] {
        &SLOTS
    }

    /// Read from the first `VERSIONINFO` block only. The header copy wins; the first
    /// string entry of the block stands in when the header is missing or not numeric.
    fn extract(&self, text: &str, kind: VersionKind) -> Option<String> {
        let patterns = self.patterns(kind)?;
        let block = blocks(text).into_iter().next()?;
        patterns
            .header
            .locate_in(text, block.clone())
            .or_else(|| patterns.string.locate_in(text, block))
            .map(|found| found.token_text(text).to_string())
    }

    /// Accepts both `1,0,0,0` and `1.0.0.0`; missing components are zero.
    fn parse(&self, _kind: VersionKind, token: &str) -> Result<Version, VersionError> {
        let dotted = SEPARATOR_PATTERN
            .split(token.trim())
            .collect::<Vec<_>>()
            .join(".");
        Version::parse(&dotted, Component::Number(0)).map_err(|_| VersionError::Format {
            text: token.to_string(),
        })
    }

    fn render(&self, _kind: VersionKind, version: &Version) -> Result<String, VersionError> {
        if !version.is_concrete() {
            return Err(VersionError::Format {
                text: version.to_string(),
            });
        }
        Ok(version.format(FormatMode::Full))
    }

    fn substitute(
        &self,
        text: &str,
        kind: VersionKind,
        value: &str,
    ) -> Result<String, SubstituteError> {
        let version = self.parse(kind, value).map_err(SubstituteError::Invalid)?;
        if !version.is_concrete() {
            return Err(SubstituteError::Invalid(VersionError::Format {
                text: value.to_string(),
            }));
        }
        let mut targets = self.targets(text, kind);
        if targets.is_empty() {
            return Err(SubstituteError::NotFound);
        }
        targets.sort_by_key(|(range, _)| range.start);

        let mut result = String::with_capacity(text.len() + value.len() * targets.len());
        let mut position = 0;
        for (range, count) in targets {
            result.push_str(&text[position..range.start]);
            result.push_str(&rewrite(&text[range.clone()], &version, count));
            position = range.end;
        }
        result.push_str(&text[position..]);
        Ok(result)
    }
}
