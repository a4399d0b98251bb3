use std::path::Path;

use verstamp_core::extension_of;

/// How one source language spells an assembly-level attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDialect {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub open: &'static str,
    pub close: &'static str,
    /// Keyword between the opening bracket and the attribute name
    pub prefix: Option<&'static str>,
    pub case_insensitive: bool,
}

/// `[assembly: AssemblyVersion("1.0.*")]`
pub const CSHARP: AttributeDialect = AttributeDialect {
    name: "C#",
    extensions: &["cs"],
    open: "[",
    close: "]",
    prefix: Some("assembly:"),
    case_insensitive: false,
};

/// `<Assembly: AssemblyVersion("1.0.*")>`
pub const VISUAL_BASIC: AttributeDialect = AttributeDialect {
    name: "Visual Basic",
    extensions: &["vb"],
    open: "<",
    close: ">",
    prefix: Some("Assembly:"),
    case_insensitive: true,
};

/// `[assembly:AssemblyVersionAttribute("1.0.*")];`
pub const CPP_CLI: AttributeDialect = AttributeDialect {
    name: "C++/CLI",
    extensions: &["cpp", "h"],
    open: "[",
    close: "]",
    prefix: Some("assembly:"),
    case_insensitive: false,
};

/// `/** @assembly AssemblyVersion("1.0.*") */`
pub const JSHARP: AttributeDialect = AttributeDialect {
    name: "J#",
    extensions: &["jsl"],
    open: "/**",
    close: "*/",
    prefix: Some("@assembly"),
    case_insensitive: false,
};

/// `[<assembly: AssemblyVersion("1.0.*")>]`
pub const FSHARP: AttributeDialect = AttributeDialect {
    name: "F#",
    extensions: &["fs"],
    open: "[<",
    close: ">]",
    prefix: Some("assembly:"),
    case_insensitive: false,
};

pub const DIALECTS: [AttributeDialect; 5] = [CSHARP, VISUAL_BASIC, CPP_CLI, JSHARP, FSHARP];

impl AttributeDialect {
    #[must_use]
    pub fn for_path(path: &Path) -> Option<Self> {
        let extension = extension_of(path)?;
        DIALECTS
            .into_iter()
            .find(|dialect| dialect.extensions.contains(&extension.as_str()))
    }

    /// Coarse pattern for one attribute name. Declarations must start their line, which
    /// keeps line-commented declarations out.
    #[must_use]
    pub fn declaration_pattern(&self, attribute: &str) -> String {
        let flags = if self.case_insensitive { "(?mi)" } else { "(?m)" };
        let prefix = self
            .prefix
            .map(|prefix| format!(r"{}\s*", regex::escape(prefix).replace(':', r"\s*:")))
            .unwrap_or_default();
        format!(
            r#"{flags}^[ \t]*{open}\s*{prefix}{attribute}\s*\(\s*"[^"\r\n]*"\s*\)\s*{close}"#,
            open = regex::escape(self.open),
            attribute = regex::escape(attribute),
            close = regex::escape(self.close),
        )
    }
}
