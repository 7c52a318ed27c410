use crate::version::Version;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Failures go to stderr so they stay visible when stdout is captured.
pub fn display_error(message: &str) {
    eprintln!("{RED}ERROR:{RESET} {message}");
}

pub fn display_success(message: &str) {
    println!("{GREEN}✓{RESET} {message}");
}

pub fn display_status(message: &str) {
    println!("{YELLOW}→{RESET} {message}");
}

pub fn display_proposed_version(current: Version, next: Version) {
    println!("\n{BOLD}Proposed Version Change:{RESET}");
    println!("  From: {RED}{current}{RESET}");
    println!("  To:   {GREEN}{next}{RESET}");
}
