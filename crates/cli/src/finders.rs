use verstamp_assembly::AssemblyInfoFinder;
use verstamp_core::FormatFinder;
use verstamp_installer::InstallerFinder;
use verstamp_resource::ResourceScriptFinder;

// finder list

pub fn get_finders() -> Vec<Box<dyn FormatFinder>> {
    vec![
        Box::new(AssemblyInfoFinder::new()),
        Box::new(ResourceScriptFinder::new()),
        Box::new(InstallerFinder::new()),
    ]
}

/// File names and globs the finders look for, comma separated.
pub fn describe_file_patterns(finders: &[Box<dyn FormatFinder>]) -> String {
    finders
        .iter()
        .flat_map(|finder| finder.file_patterns().iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}
