use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn ecstyle_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ecstyle"));
    cmd.current_dir(dir).env_remove("RUST_LOG").arg("--no-color");
    cmd
}

/// Temp project whose `.editorconfig` stops the upward search.
fn project(editorconfig: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".editorconfig"),
        format!("root = true\n{editorconfig}"),
    )
    .unwrap();
    let file = dir.path().join("test.txt");
    (dir, file)
}

const UNIX_WITH_NEWLINE: &str = "[*]\nend_of_line = lf\ninsert_final_newline = true\n";

// ===========================================
// Check mode
// ===========================================

#[test]
fn test_check_mode_no_modification() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "hello").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--check")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "hello");
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1:5  Newline required at end of file but not found.  eol-last"));
}

#[test]
fn test_check_mode_exit_code_0_when_no_problems() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "hello\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--check")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
}

#[test]
fn test_check_mode_reports_each_crlf() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "a\r\nbc\r\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--check")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1:1  Expected linebreaks to be 'LF' but found 'CRLF'.  linebreak-style"));
    assert!(stdout.contains("2:2  Expected linebreaks to be 'LF' but found 'CRLF'.  linebreak-style"));
    assert!(!output.status.success());
}

// ===========================================
// Fix mode
// ===========================================

#[test]
fn test_normal_mode_fixes_files() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "foo\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fixed:"));
}

#[test]
fn test_fix_crlf_to_lf() {
    let (dir, file) = project("[*]\nend_of_line = lf\n");
    fs::write(&file, "a\r\nb\r\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\n");
    assert!(output.status.success());
}

#[test]
fn test_fix_windows_with_final_newline() {
    let (dir, file) = project("[*]\nend_of_line = crlf\ninsert_final_newline = true\n");
    fs::write(&file, "a\nb").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "a\r\nb\r\n");
    assert!(output.status.success());
}

#[test]
fn test_fix_never_removes_trailing_newlines() {
    let (dir, file) = project("[*]\ninsert_final_newline = false\n");
    fs::write(&file, "a\n\n\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "a");
    assert!(output.status.success());
}

#[test]
fn test_section_glob_scopes_policy() {
    let (dir, file) = project("[*.md]\nend_of_line = crlf\n");
    fs::write(&file, "a\r\n").unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    let readme = docs.join("README.md");
    fs::write(&readme, "a\r\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--check")
        .arg(dir.path().to_str().unwrap())
        .output()
        .unwrap();

    // `[*.md]` never matches a directory's `*` probe, so no policy applies
    assert!(output.status.success());
}

#[test]
fn test_nested_editorconfig_overrides_parent() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "a\n").unwrap();
    let win = dir.path().join("win");
    fs::create_dir(&win).unwrap();
    fs::write(win.join(".editorconfig"), "[*]\nend_of_line = crlf\n").unwrap();
    let nested = win.join("nested.txt");
    fs::write(&nested, "x\ny\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(dir.path().to_str().unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "a\n");
    assert_eq!(fs::read_to_string(&nested).unwrap(), "x\r\ny\r\n");
}

// ===========================================
// Missing and invalid .editorconfig
// ===========================================

#[test]
fn test_missing_config_without_fallback_reports_once() {
    let (dir, file) = project("");
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--check")
        .arg("--eol-last")
        .arg("editorconfig")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "0:0  `insert_final_newline` is not set in .editorconfig and `fallback` option is not given either. Set one of them.  eol-last"
    ));
    assert!(!output.status.success());
}

#[test]
fn test_missing_config_is_not_fixable() {
    let (dir, file) = project("");
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--linebreak-style")
        .arg("editorconfig")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "foo");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("`end_of_line` is not set in .editorconfig"));
    assert!(!output.status.success());
}

#[test]
fn test_fallback_applies_when_editorconfig_is_silent() {
    let (dir, file) = project("");
    fs::write(&file, "foo\r\n").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--linebreak-style-fallback")
        .arg("unix")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "foo\n");
    assert!(output.status.success());
}

#[test]
fn test_defaults_ignore_undeclared_rules() {
    let (dir, file) = project("");
    fs::write(&file, "foo\r\nbar").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--check")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
}

#[test]
fn test_invalid_indent_config_fails_file() {
    let (dir, file) = project("[*]\nindent_style = space\ninsert_final_newline = true\n");
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error processing"));
    assert!(stderr.contains("indent_size is required but not set."));
    assert_eq!(fs::read_to_string(&file).unwrap(), "foo");
    assert!(!output.status.success());
}

#[test]
fn test_missing_path_does_not_stop_other_files() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(dir.path().join("missing").to_str().unwrap())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "foo\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(!output.status.success());
}

#[test]
fn test_explicit_mode_needs_no_editorconfig() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".editorconfig"), "root = true\n").unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--eol-last")
        .arg("always")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "foo\n");
    assert!(output.status.success());
}

// ===========================================
// Output modes
// ===========================================

#[test]
fn test_quiet_mode_output() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "hello").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--quiet")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("test.txt"));
    assert!(!stdout.contains("Fixed:"));
}

#[test]
fn test_diff_mode_output() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(&file, "hello").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--diff")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("---"));
    assert!(stdout.contains("+++"));
    assert!(stdout.contains("-hello"));
    assert!(stdout.contains("+hello␊"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "hello\n");
}

#[test]
fn test_skip_binary_and_empty_files() {
    let (dir, _) = project(UNIX_WITH_NEWLINE);
    let binary = dir.path().join("image.bin");
    fs::write(&binary, b"ab\x00cd").unwrap();
    let empty = dir.path().join("empty.txt");
    fs::write(&empty, "").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--verbose")
        .arg(dir.path().to_str().unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read(&binary).unwrap(), b"ab\x00cd");
    assert_eq!(fs::read(&empty).unwrap(), b"");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipping binary"));
    assert!(stdout.contains("Skipping empty"));
}

// ===========================================
// Tool configuration
// ===========================================

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    let output = ecstyle_cmd(dir.path()).arg("--init").output().unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(dir.path().join("ecstyle.toml")).unwrap();
    assert!(content.contains("[rules.eol-last]"));
    assert!(content.contains("[rules.linebreak-style]"));
}

#[test]
fn test_init_fails_if_config_exists() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ecstyle.toml"), "").unwrap();

    let output = ecstyle_cmd(dir.path()).arg("--init").output().unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_config_file_sets_rule_mode() {
    let (dir, file) = project("");
    fs::write(
        dir.path().join("ecstyle.toml"),
        "[rules.eol-last]\nmode = \"always\"\n\n[rules.linebreak-style]\nenabled = false\n",
    )
    .unwrap();
    fs::write(&file, "foo\r\nbar").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "foo\r\nbar\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Using config:"));
}

#[test]
fn test_invalid_config_file_falls_back_to_defaults() {
    let (dir, file) = project(UNIX_WITH_NEWLINE);
    fs::write(dir.path().join("ecstyle.toml"), "[rules\n").unwrap();
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning: Failed to load"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "foo\n");
    assert!(output.status.success());
}

#[test]
fn test_print_config() {
    let (dir, file) = project(
        "[*]\ninsert_final_newline = true\nend_of_line = crlf\nindent_style = tab\n",
    );
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--print-config")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("eol-last = \"always\""));
    assert!(stdout.contains("linebreak-style = \"windows\""));
    assert!(stdout.contains("indent = \"tab\""));
    assert!(stdout.contains("jsx-indent-props = \"tab\""));
}

#[test]
fn test_print_config_reports_invalid_editorconfig() {
    let (dir, file) = project("[*]\nindent_style = space\nindent_size = tab\n");
    fs::write(&file, "foo").unwrap();

    let output = ecstyle_cmd(dir.path())
        .arg("--print-config")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("indent_size = \"tab\""));
}
