use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ecstyle::{
    find_config_file, generate_init_file, load_config, merge_lint_options, run, should_use_colors,
    CliLintOptions, Config, ConfigResolver, EcstyleToml, EditorConfigStore, EolLastFallback,
    EolLastMode, LinebreakStyleFallback, LinebreakStyleMode, OutputContext, OutputMode,
};
use path_absolutize::Absolutize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecstyle")]
#[command(
    version,
    about = "Enforce final newlines and line endings as .editorconfig declares"
)]
struct Cli {
    /// Target files or directories
    #[arg(required_unless_present_any = ["init", "print_config"])]
    paths: Vec<String>,

    /// Check only (no modifications), exit 1 if problems found
    #[arg(short, long)]
    check: bool,

    /// Show changes in diff format
    #[arg(short, long)]
    diff: bool,

    /// Output only file names
    #[arg(short, long)]
    quiet: bool,

    /// List every checked or skipped file and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Final newline policy for the eol-last rule
    #[arg(long, value_enum, value_name = "MODE")]
    eol_last: Option<EolLastMode>,

    /// Policy for eol-last when .editorconfig says nothing
    #[arg(long, value_enum, value_name = "FALLBACK")]
    eol_last_fallback: Option<EolLastFallback>,

    /// Line ending policy for the linebreak-style rule
    #[arg(long, value_enum, value_name = "MODE")]
    linebreak_style: Option<LinebreakStyleMode>,

    /// Policy for linebreak-style when .editorconfig says nothing
    #[arg(long, value_enum, value_name = "FALLBACK")]
    linebreak_style_fallback: Option<LinebreakStyleFallback>,

    /// Generate a template ecstyle.toml configuration file
    #[arg(long)]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the rule configuration .editorconfig resolves to for FILE
    #[arg(long, value_name = "FILE", conflicts_with = "init")]
    print_config: Option<PathBuf>,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Handle --init command
    if cli.init {
        return handle_init();
    }

    if let Some(ref file) = cli.print_config {
        return handle_print_config(file);
    }

    // Load configuration
    let toml_config = load_configuration(&cli.config, cli.quiet);

    // Merge configurations: CLI > TOML > defaults
    let cli_options = build_cli_options(&cli);
    let lint = merge_lint_options(&cli_options, toml_config.as_ref().map(|c| &c.rules));

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.diff {
        OutputMode::Diff
    } else {
        OutputMode::Normal
    };

    let config = Config {
        check_only: cli.check,
        output_mode,
        lint,
    };

    let ctx = OutputContext::new(
        output_mode,
        should_use_colors(cli.color, cli.no_color),
        cli.verbose,
        !cli.quiet,
    );

    match run(&cli.paths, &config, &ctx) {
        Ok(result) => {
            if result.has_problems() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "ecstyle=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn handle_print_config(file: &Path) -> ExitCode {
    let path = match file.absolutize() {
        Ok(path) => path.into_owned(),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let resolver = ConfigResolver::new(EditorConfigStore::new());
    match resolver.rule_config(&path) {
        Ok(rule_config) => {
            print!("{rule_config}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}: {e}", file.display());
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>, quiet: bool) -> Option<EcstyleToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            if !quiet {
                eprintln!("Using config: {}", p.display());
            }
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}

fn build_cli_options(cli: &Cli) -> CliLintOptions {
    // Only options given on the command line are set, so the config file
    // still applies to the rest.
    CliLintOptions {
        eol_last: cli.eol_last,
        eol_last_fallback: cli.eol_last_fallback,
        linebreak_style: cli.linebreak_style,
        linebreak_style_fallback: cli.linebreak_style_fallback,
    }
}
