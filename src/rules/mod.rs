//! Text rules and the driver that runs them.

mod eol_last;
mod linebreak_style;

pub use eol_last::{EolLast, EolLastFallback, EolLastMode, EolLastOptions};
pub use linebreak_style::{
    LinebreakStyle, LinebreakStyleFallback, LinebreakStyleMode, LinebreakStyleOptions,
};

use std::path::Path;

use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::fix::apply_fixes;
use crate::policy::{ConfigResolver, Policy, PolicyError, RuleName, RuleSetting};
use crate::source::SourceText;

/// Upper bound on lint-and-fix rounds for one file.
const MAX_FIX_PASSES: usize = 10;

pub trait Rule: Send + Sync {
    fn name(&self) -> RuleName;

    /// Check the source in `ctx`, reporting violations through it.
    ///
    /// Empty text is valid under every policy and is accepted before any
    /// configuration lookup. Errors other than an incomplete policy abort
    /// the file.
    fn check(&self, ctx: &mut LintContext<'_>) -> Result<(), PolicyError>;
}

/// What a rule sees while checking one file.
pub struct LintContext<'a> {
    pub source: &'a SourceText<'a>,
    pub path: &'a Path,
    resolver: &'a ConfigResolver,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LintContext<'a> {
    pub fn new(source: &'a SourceText<'a>, path: &'a Path, resolver: &'a ConfigResolver) -> Self {
        Self {
            source,
            path,
            resolver,
            diagnostics: vec![],
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        debug!(
            file = %self.path.display(),
            rule = %diagnostic.rule,
            message_id = diagnostic.message_id.as_str(),
            line = diagnostic.span.start.line,
            column = diagnostic.span.start.column,
            "reported"
        );
        self.diagnostics.push(diagnostic);
    }

    /// Look up the `.editorconfig` policy for `T` at the current file.
    ///
    /// An incomplete policy is reported as a diagnostic and yields `None`.
    pub fn editorconfig_policy<T: RuleSetting>(
        &mut self,
        fallback: Option<Policy<T>>,
    ) -> Result<Option<Policy<T>>, PolicyError> {
        match self.resolver.get_options(self.path, fallback) {
            Ok(policy) => Ok(Some(policy)),
            Err(err) if err.is_incomplete() => {
                self.report(Diagnostic::missing_config(T::RULE));
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Which rules run and with what options. `None` disables a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintOptions {
    pub eol_last: Option<EolLastOptions>,
    pub linebreak_style: Option<LinebreakStyleOptions>,
}

/// A file after autofixing.
#[derive(Debug)]
pub struct FixedSource {
    pub content: String,
    /// Diagnostics still present in `content`.
    pub remaining: Vec<Diagnostic>,
    pub fixes_applied: usize,
}

impl FixedSource {
    pub fn has_changes(&self) -> bool {
        self.fixes_applied > 0
    }
}

pub struct Linter<'a> {
    rules: Vec<Box<dyn Rule>>,
    resolver: &'a ConfigResolver,
}

impl<'a> Linter<'a> {
    pub fn new(options: &LintOptions, resolver: &'a ConfigResolver) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = vec![];
        if let Some(eol_last) = options.eol_last {
            rules.push(Box::new(EolLast::new(eol_last)));
        }
        if let Some(linebreak_style) = options.linebreak_style {
            rules.push(Box::new(LinebreakStyle::new(linebreak_style)));
        }
        Self { rules, resolver }
    }

    pub fn rule_names(&self) -> Vec<RuleName> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn lint(&self, path: &Path, text: &str) -> Result<Vec<Diagnostic>, PolicyError> {
        let source = SourceText::new(text);
        let mut ctx = LintContext::new(&source, path, self.resolver);

        for rule in &self.rules {
            rule.check(&mut ctx)?;
        }

        Ok(ctx.into_diagnostics())
    }

    /// Lint and apply fixes until none remain or the pass limit is reached.
    pub fn fix(&self, path: &Path, text: &str) -> Result<FixedSource, PolicyError> {
        let mut content = text.to_string();
        let mut fixes_applied = 0;

        for pass in 1..=MAX_FIX_PASSES {
            let diagnostics = self.lint(path, &content)?;
            let fixes: Vec<_> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
            if fixes.is_empty() {
                return Ok(FixedSource {
                    content,
                    remaining: diagnostics,
                    fixes_applied,
                });
            }

            let result = apply_fixes(fixes, &content);
            debug!(
                file = %path.display(),
                pass,
                applied = result.applied,
                skipped = result.skipped,
                "applied fixes"
            );
            fixes_applied += result.applied;
            content = result.content;
        }

        let remaining = self.lint(path, &content)?;
        Ok(FixedSource {
            content,
            remaining,
            fixes_applied,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::EditorConfigStore;
    use crate::diagnostic::MessageId;
    use std::fs;
    use tempfile::TempDir;

    /// A project directory holding `.editorconfig` and one file to lint.
    pub(crate) struct Project {
        pub(crate) _dir: TempDir,
        pub(crate) file: std::path::PathBuf,
        pub(crate) resolver: ConfigResolver,
    }

    pub(crate) fn project(editorconfig: &str) -> Project {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".editorconfig"), editorconfig).unwrap();
        let file = dir.path().join("input.js");
        fs::write(&file, "").unwrap();
        Project {
            _dir: dir,
            file,
            resolver: ConfigResolver::new(EditorConfigStore),
        }
    }

    fn both_rules(eol: EolLastMode, linebreak: LinebreakStyleMode) -> LintOptions {
        LintOptions {
            eol_last: Some(EolLastOptions {
                mode: eol,
                fallback: None,
            }),
            linebreak_style: Some(LinebreakStyleOptions {
                mode: linebreak,
                fallback: None,
            }),
        }
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let p = project("root = true\n");
        let linter = Linter::new(&LintOptions::default(), &p.resolver);
        assert!(linter.rule_names().is_empty());
        assert!(linter.lint(&p.file, "no newline").unwrap().is_empty());
    }

    #[test]
    fn test_fix_resolves_overlapping_fixes_over_passes() {
        let p = project("root = true\n");
        let linter = Linter::new(
            &both_rules(EolLastMode::Never, LinebreakStyleMode::Unix),
            &p.resolver,
        );

        let fixed = linter.fix(&p.file, "a\r\nb\r\n").unwrap();
        assert_eq!(fixed.content, "a\nb");
        assert!(fixed.remaining.is_empty());
        assert!(fixed.has_changes());
    }

    #[test]
    fn test_fix_always_windows_line_endings() {
        let p = project("root = true\n");
        let linter = Linter::new(
            &both_rules(EolLastMode::Always, LinebreakStyleMode::Windows),
            &p.resolver,
        );

        let fixed = linter.fix(&p.file, "a\nb").unwrap();
        // eol-last inserts LF, linebreak-style then converts it
        assert_eq!(fixed.content, "a\r\nb\r\n");
        assert!(fixed.remaining.is_empty());
    }

    #[test]
    fn test_fix_keeps_unfixable_diagnostics() {
        let p = project("root = true\n");
        let linter = Linter::new(
            &both_rules(EolLastMode::Editorconfig, LinebreakStyleMode::Editorconfig),
            &p.resolver,
        );

        let fixed = linter.fix(&p.file, "x\r\n").unwrap();
        assert_eq!(fixed.content, "x\r\n");
        assert!(!fixed.has_changes());
        let ids: Vec<_> = fixed.remaining.iter().map(|d| (d.rule, d.message_id)).collect();
        assert_eq!(
            ids,
            vec![
                (RuleName::EolLast, MessageId::Editorconfig),
                (RuleName::LinebreakStyle, MessageId::Editorconfig),
            ]
        );
    }

    #[test]
    fn test_invalid_editorconfig_aborts_file() {
        let p = project("root = true\n[*]\nindent_style = space\nindent_size = tab\n");
        let linter = Linter::new(
            &both_rules(EolLastMode::Editorconfig, LinebreakStyleMode::Unix),
            &p.resolver,
        );

        let err = linter.lint(&p.file, "x").unwrap_err();
        assert!(matches!(err, PolicyError::IncompatibleIndentSize { .. }));
    }
}
