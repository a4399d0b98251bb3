use clap::ValueEnum;

/// Output of the `check` command.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FormatOptions {
    /// Colored listing for people
    #[default]
    #[value(name = "stdout")]
    Stdout,
    /// Machine-readable listing for build scripts
    #[value(name = "json")]
    Json,
}

impl FormatOptions {
    pub fn print(&self, stdout_msg: &str, json_msg: &str) {
        match self {
            Self::Stdout => println!("{stdout_msg}"),
            Self::Json => println!("{json_msg}"),
        }
    }
}
