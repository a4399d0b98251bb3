use regex::Regex;
use verstamp_core::{
    Component, FormatMode, RegeneratedIdentifier, SlotPattern, SubstituteError, Version,
    VersionError, VersionFormat, VersionKind, splice,
};

use crate::{
    InstallerKind,
    guid::{GUID, regenerate_guid},
};

const SLOTS: [VersionKind; 1] = [VersionKind::Informational];

const PRODUCT_CODE: &str = "ProductCode";
const PACKAGE_CODE: &str = "PackageCode";

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("installer regex must compile")
}

/// `"Key" = "8:value"` inside a deployment project.
fn deployment_key(key: &str) -> Regex {
    regex(&format!(r#"(?m)^[ \t]*"{key}"[ \t]*=[ \t]*"8:[^"\r\n]*""#))
}

/// `<?define Key = "value" ?>` inside a WiX include.
fn wix_define(key: &str) -> Regex {
    regex(&format!(r#"<\?define[ \t]+{key}[ \t]*=[ \t]*"[^"\r\n]*"[ \t]*\?>"#))
}

fn block_header(name: &str) -> Regex {
    regex(&format!(r#"(?m)^[ \t]*"{name}"[ \t]*\r?$"#))
}

/// Version key, linked identifiers and block scope of one installer kind.
#[derive(Debug)]
pub struct InstallerFormat {
    kind: InstallerKind,
    /// Block headers that must be passed, in order, before the keys are searched
    scope: Vec<Regex>,
    version: SlotPattern,
    /// Identifiers replaced together whenever the version changes, by key
    identifiers: Vec<(&'static str, SlotPattern)>,
}

impl InstallerFormat {
    #[must_use]
    pub fn new(kind: InstallerKind) -> Self {
        let (low, high) = kind.component_range();
        let number = format!(r"\d+(?:\.\d+){{{},{}}}", low - 1, high - 1);
        let (scope, version, identifiers) = match kind {
            InstallerKind::WixInclude => (
                Vec::new(),
                SlotPattern::numeric(
                    wix_define("ProductVersion"),
                    regex(&format!(r#""({number})""#)),
                ),
                vec![(
                    PRODUCT_CODE,
                    SlotPattern::numeric(
                        wix_define(PRODUCT_CODE),
                        regex(&format!(r#""({GUID})""#)),
                    ),
                )],
            ),
            _ => {
                let (block, key) = match kind {
                    InstallerKind::Package => ("Product", "ProductVersion"),
                    InstallerKind::MergeModule => ("Module", "Version"),
                    _ => ("CabFile", "Version"),
                };
                // A new MSI product needs a new package as well
                let identifiers = if kind.has_product_code() {
                    [PRODUCT_CODE, PACKAGE_CODE]
                        .into_iter()
                        .map(|key| {
                            (
                                key,
                                SlotPattern::numeric(
                                    deployment_key(key),
                                    regex(&format!(r#""8:({GUID})""#)),
                                ),
                            )
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                (
                    vec![block_header("Deployable"), block_header(block)],
                    SlotPattern::numeric(
                        deployment_key(key),
                        regex(&format!(r#""8:({number})""#)),
                    ),
                    identifiers,
                )
            }
        };
        Self {
            kind,
            scope,
            version,
            identifiers,
        }
    }

    /// Offset at which the kind's block starts, or `None` if the block is missing.
    fn scope_start(&self, text: &str) -> Option<usize> {
        self.scope.iter().try_fold(0, |position, header| {
            header.find_at(text, position).map(|found| found.end())
        })
    }
}

impl VersionFormat for InstallerFormat {
    fn name(&self) -> &'static str {
        match self.kind {
            InstallerKind::WixInclude => "WiX include",
            _ => "deployment project",
        }
    }

    fn slots(&self) -> &[VersionKind] {
        &SLOTS
    }

    fn extract(&self, text: &str, kind: VersionKind) -> Option<String> {
        if kind != VersionKind::Informational {
            return None;
        }
        let start = self.scope_start(text)?;
        self.version
            .locate_from(text, start)
            .map(|found| found.token_text(text).to_string())
    }

    fn parse(&self, _kind: VersionKind, token: &str) -> Result<Version, VersionError> {
        Version::parse(token, Component::Number(0))
    }

    fn render(&self, _kind: VersionKind, version: &Version) -> Result<String, VersionError> {
        if !version.is_concrete() {
            return Err(VersionError::Format {
                text: version.to_string(),
            });
        }
        Ok(version.format(FormatMode::Full))
    }

    /// The new value keeps the component count of the value it replaces, so a
    /// three-part MSI product version stays three-part.
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
        if kind != VersionKind::Informational {
            return Err(SubstituteError::NotFound);
        }
        let start = self.scope_start(text).ok_or(SubstituteError::NotFound)?;
        let found = self
            .version
            .locate_from(text, start)
            .ok_or(SubstituteError::NotFound)?;
        let count = found.token_text(text).split('.').count();
        Ok(splice(text, found.token, &version.format_truncated(count)))
    }

    /// Identifiers written as `*` are left for the toolchain to assign.
    fn regenerate_identifiers(&self, text: &str) -> (String, Vec<RegeneratedIdentifier>) {
        let mut text = text.to_string();
        let mut regenerated = Vec::new();
        let Some(start) = self.scope_start(&text) else {
            return (text, regenerated);
        };
        for (name, pattern) in &self.identifiers {
            let Some(found) = pattern.locate_from(&text, start) else {
                continue;
            };
            let old = found.token_text(&text).to_string();
            let new = regenerate_guid(&old);
            text = splice(&text, found.token, &new);
            regenerated.push(RegeneratedIdentifier {
                name: (*name).to_string(),
                old,
                new,
            });
        }
        (text, regenerated)
    }
}
