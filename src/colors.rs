use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI escapes used by the reporter; all empty when colour is off.
#[derive(Clone, Copy)]
pub struct Colors {
    pub error: &'static str,
    pub success: &'static str,
    pub info: &'static str,
    /// `line:column` prefixes
    pub location: &'static str,
    /// Rule names after a message
    pub rule: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                error: "\x1b[31m",    // Red
                success: "\x1b[32m",  // Green
                info: "\x1b[36m",     // Cyan
                location: "\x1b[2m",  // Dim
                rule: "\x1b[2;37m",   // Dim grey
                enabled: true,
            }
        } else {
            Self {
                error: "",
                success: "",
                info: "",
                location: "",
                rule: "",
                enabled: false,
            }
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}
