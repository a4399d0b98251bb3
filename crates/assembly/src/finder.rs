use std::path::Path;

use verstamp_core::{Config, FormatFinder, VersionFormat};

use crate::{AssemblyInfoFormat, AttributeDialect};

/// Picks up `AssemblyInfo.*` files of every supported dialect.
#[derive(Debug, Default)]
pub struct AssemblyInfoFinder;

impl AssemblyInfoFinder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatFinder for AssemblyInfoFinder {
    fn name(&self) -> &'static str {
        "assembly attributes"
    }

    fn file_patterns(&self) -> &[&str] {
        &[
            "AssemblyInfo.cs",
            "AssemblyInfo.vb",
            "AssemblyInfo.cpp",
            "AssemblyInfo.h",
            "AssemblyInfo.jsl",
            "AssemblyInfo.fs",
        ]
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            return false;
        };
        stem.to_ascii_lowercase().contains("assemblyinfo")
            && AttributeDialect::for_path(path).is_some()
    }

    fn format_for(
        &self,
        path: &Path,
        _text: &str,
        config: &Config,
    ) -> Option<Box<dyn VersionFormat>> {
        let dialect = AttributeDialect::for_path(path)?;
        Some(Box::new(AssemblyInfoFormat::new(
            dialect,
            config.informational_must_be_numeric,
        )))
    }
}
