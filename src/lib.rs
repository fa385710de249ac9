pub mod colors;
pub mod config;
pub mod diagnostic;
pub mod fix;
mod output;
pub mod policy;
pub mod progress;
pub mod rules;
pub mod scanner;
pub mod source;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_lint_options, CliLintOptions,
    ConfigError, EcstyleToml, EditorConfigStore, PropertyStore, RulesSection,
    ECSTYLE_TOML_TEMPLATE,
};
pub use diagnostic::{Diagnostic, Fix, MessageId, Position, Span};
pub use output::{print_diff, Config, OutputContext, OutputMode, RunResult};
pub use policy::{ConfigResolver, Policy, PolicyError, PolicyErrorKind, RuleConfig, RuleName};
pub use progress::ProgressReporter;
pub use rules::{
    EolLastFallback, EolLastMode, EolLastOptions, FixedSource, LinebreakStyleFallback,
    LinebreakStyleMode, LinebreakStyleOptions, LintOptions, Linter,
};
pub use walker::walk_paths;

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BINARY_CHECK_SIZE: usize = 8192;

/// Check if content is binary by looking for null bytes in first 8192 bytes
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_CHECK_SIZE);
    content[..check_len].contains(&0)
}

/// Failure that aborts the check of one file.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// What happened to one file.
#[derive(Debug)]
enum FileOutcome {
    Skipped(&'static str),
    Clean,
    /// Check mode: violations found, file untouched.
    Problems(Vec<Diagnostic>),
    /// Fix mode: fixes written and/or violations left over.
    Fixed { original: String, fixed: FixedSource },
}

/// Main entry point: lint all files in given paths
///
/// Files are checked in parallel against one shared [`ConfigResolver`];
/// results are reported in walk order afterwards. A path that cannot be
/// walked counts as a failed file; the rest are still checked.
pub fn run(paths: &[String], config: &Config, ctx: &OutputContext) -> io::Result<RunResult> {
    let mut result = RunResult::default();

    let mut files: Vec<PathBuf> = vec![];
    for entry in walk_paths(paths) {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => {
                result.files_failed += 1;
                output::print_walk_error(&e, ctx);
            }
        }
    }

    let resolver = ConfigResolver::new(EditorConfigStore::new());
    let linter = Linter::new(&config.lint, &resolver);
    debug!(files = files.len(), rules = ?linter.rule_names(), "linting");

    let progress = ProgressReporter::new(files.len() as u64, ctx.show_progress);

    let outcomes: Vec<_> = files
        .par_iter()
        .map(|path| {
            let outcome = process_file(path, &linter, config);
            if let Some(name) = path.file_name() {
                progress.tick_file(&name.to_string_lossy());
            }
            outcome
        })
        .collect();

    progress.finish();
    debug!(cached_paths = resolver.cache().len(), "linted");

    for (path, outcome) in files.iter().zip(outcomes) {
        report_outcome(path, outcome, &mut result, ctx);
    }

    output::print_summary(&result, config, ctx);

    Ok(result)
}

fn process_file(path: &Path, linter: &Linter<'_>, config: &Config) -> Result<FileOutcome, ProcessError> {
    let bytes = fs::read(path)?;

    if bytes.is_empty() {
        return Ok(FileOutcome::Skipped("empty"));
    }

    if is_binary(&bytes) {
        return Ok(FileOutcome::Skipped("binary"));
    }

    let Ok(content) = String::from_utf8(bytes) else {
        return Ok(FileOutcome::Skipped("non-UTF-8"));
    };

    if config.check_only {
        let diagnostics = linter.lint(path, &content)?;
        return Ok(if diagnostics.is_empty() {
            FileOutcome::Clean
        } else {
            FileOutcome::Problems(diagnostics)
        });
    }

    let fixed = linter.fix(path, &content)?;
    if !fixed.has_changes() && fixed.remaining.is_empty() {
        return Ok(FileOutcome::Clean);
    }
    if fixed.has_changes() {
        fs::write(path, &fixed.content)?;
    }
    Ok(FileOutcome::Fixed {
        original: content,
        fixed,
    })
}

fn report_outcome(
    path: &Path,
    outcome: Result<FileOutcome, ProcessError>,
    result: &mut RunResult,
    ctx: &OutputContext,
) {
    match outcome {
        Ok(FileOutcome::Skipped(reason)) => {
            if ctx.verbose {
                output::print_skipped(path, reason, ctx);
            }
        }
        Ok(FileOutcome::Clean) => {
            if ctx.verbose {
                output::print_checked(path, ctx);
            }
        }
        Ok(FileOutcome::Problems(diagnostics)) => {
            result.files_with_problems += 1;
            output::print_check_result(path, &diagnostics, ctx);
        }
        Ok(FileOutcome::Fixed { original, fixed }) => {
            if fixed.has_changes() {
                result.files_fixed += 1;
            }
            if !fixed.remaining.is_empty() {
                result.files_with_problems += 1;
            }
            output::print_fix_result(path, &original, &fixed, ctx);
        }
        Err(e) => {
            result.files_failed += 1;
            output::print_error(path, &e, ctx);
        }
    }
}
