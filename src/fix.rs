use crate::diagnostic::Fix;

/// Result of applying one batch of fixes.
#[derive(Debug, PartialEq, Eq)]
pub struct AppliedFixes {
    pub content: String,
    pub applied: usize,
    /// Fixes that overlapped an earlier one and were left for another pass.
    pub skipped: usize,
}

/// Apply `fixes` to `contents`.
///
/// Fixes are applied in order of their start offset. A fix starting before
/// the end of the previously applied one is skipped.
pub fn apply_fixes<'a>(fixes: impl IntoIterator<Item = &'a Fix>, contents: &str) -> AppliedFixes {
    let mut fixes: Vec<&Fix> = fixes.into_iter().collect();
    fixes.sort_by_key(|fix| fix.range.start);

    let mut content = String::with_capacity(contents.len());
    let mut last_end = 0;
    let mut applied = 0;
    let mut skipped = 0;

    for fix in fixes {
        if fix.range.start < last_end || fix.range.end > contents.len() {
            skipped += 1;
            continue;
        }
        content.push_str(&contents[last_end..fix.range.start]);
        content.push_str(&fix.replacement);
        last_end = fix.range.end;
        applied += 1;
    }
    content.push_str(&contents[last_end..]);

    AppliedFixes {
        content,
        applied,
        skipped,
    }
}
