use crate::colors::Colors;
use crate::diagnostic::Diagnostic;
use crate::rules::{FixedSource, LintOptions};
use similar::{ChangeTag, TextDiff};
use std::fmt::Display;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

pub struct Config {
    pub check_only: bool,
    pub output_mode: OutputMode,
    pub lint: LintOptions,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool, show_progress: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
            show_progress,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files_fixed: usize,
    pub files_with_problems: usize,
    pub files_failed: usize,
}

impl RunResult {
    pub fn has_problems(&self) -> bool {
        self.files_with_problems > 0 || self.files_failed > 0
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic], ctx: &OutputContext) {
    let colors = &ctx.colors;
    for diagnostic in diagnostics {
        println!(
            "  {}{}:{}{}  {}  {}{}{}",
            colors.location,
            diagnostic.span.start.line,
            diagnostic.span.start.column,
            colors.reset(),
            diagnostic.message(),
            colors.rule,
            diagnostic.rule,
            colors.reset()
        );
    }
}

pub fn print_check_result(path: &Path, diagnostics: &[Diagnostic], ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }

    println!(
        "{}Error:{} {}",
        ctx.colors.error,
        ctx.colors.reset(),
        path.display()
    );
    print_diagnostics(diagnostics, ctx);
}

pub fn print_fix_result(path: &Path, original: &str, fixed: &FixedSource, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => {
            if fixed.has_changes() {
                print_diff(&path.display().to_string(), original, &fixed.content);
            }
            if !fixed.remaining.is_empty() {
                print_check_result(path, &fixed.remaining, ctx);
            }
        }
        OutputMode::Normal => {
            if fixed.has_changes() {
                println!(
                    "{}Fixed:{} {}",
                    ctx.colors.success,
                    ctx.colors.reset(),
                    path.display()
                );
            }
            if !fixed.remaining.is_empty() {
                print_check_result(path, &fixed.remaining, ctx);
            }
        }
    }
}

pub fn print_checked(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{}Checked:{} {}",
        ctx.colors.info,
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_skipped(path: &Path, reason: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{}Skipping {}: {}{}",
        ctx.colors.info,
        reason,
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_error(path: &Path, error: &impl Display, ctx: &OutputContext) {
    eprintln!(
        "{}Error processing {}:{} {error}",
        ctx.colors.error,
        path.display(),
        ctx.colors.reset()
    );
}

/// A path that could not be walked; the walker's error names it.
pub fn print_walk_error(error: &impl Display, ctx: &OutputContext) {
    eprintln!(
        "{}Error:{} {error}",
        ctx.colors.error,
        ctx.colors.reset()
    );
}

pub fn print_diff(label: &str, original: &str, content: &str) {
    let diff = TextDiff::from_lines(original, content);

    println!("--- {label}");
    println!("+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                // Make line terminators visible: they are usually what changed
                let line = change.value();
                let body = line.trim_end_matches(['\r', '\n']);
                let eol = line[body.len()..].replace('\r', "␍").replace('\n', "␊");
                if eol.is_empty() {
                    println!("{sign}{body}");
                    println!("\\ No newline at end of file");
                } else {
                    println!("{sign}{body}{eol}");
                }
            }
        }
    }
}

pub fn print_summary(result: &RunResult, config: &Config, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    let mut parts = vec![];
    if result.files_fixed > 0 && !config.check_only {
        parts.push(format!(
            "{}{} files fixed{}",
            ctx.colors.success,
            result.files_fixed,
            ctx.colors.reset()
        ));
    }
    if result.files_with_problems > 0 {
        parts.push(format!(
            "{}{} files with problems{}",
            ctx.colors.error,
            result.files_with_problems,
            ctx.colors.reset()
        ));
    }
    if result.files_failed > 0 {
        parts.push(format!(
            "{}{} files failed{}",
            ctx.colors.error,
            result.files_failed,
            ctx.colors.reset()
        ));
    }

    if !parts.is_empty() {
        println!();
        println!("{}", parts.join(", "));
    }
}
