use colored::Colorize;
use std::fmt;

/// Forces colors off when the user disabled them; otherwise `colored`
/// follows `NO_COLOR`/`CLICOLOR` from the environment.
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

pub fn section(title: impl fmt::Display) {
    println!("{}", format!("=== {} ===", title).bold());
}

pub fn info(message: impl fmt::Display) {
    println!("{}", message);
}

pub fn detail(message: impl fmt::Display) {
    println!("  {}", message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green(), message);
}

pub fn warning(message: impl fmt::Display) {
    eprintln!("{} {}", "[!]".yellow(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red(), message);
}

pub fn hint(message: impl fmt::Display) {
    eprintln!("    {}", message.to_string().dimmed());
}
