use ignore::WalkBuilder;
use path_absolutize::Absolutize;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Walk paths and yield absolute file paths, respecting gitignore.
///
/// Absolute paths keep policy lookups keyed by one spelling per file.
pub fn walk_paths(paths: &[String]) -> impl Iterator<Item = io::Result<PathBuf>> {
    let mut all_files = vec![];

    for path in paths {
        let walker = WalkBuilder::new(path)
            .hidden(true) // Skip hidden files, .editorconfig included
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        all_files.push(
                            entry
                                .path()
                                .absolutize()
                                .map(|p| p.into_owned()),
                        );
                    }
                }
                Err(e) => {
                    warn!(path = %path, "walk error: {e}");
                    all_files.push(Err(io::Error::other(e.to_string())));
                }
            }
        }
    }

    all_files.into_iter()
}
