use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BULLET_PREFIX: Regex =
        Regex::new(r"^(?:[-\x{2013}\x{2014}]\s+|[\x{2022}\x{00b7}]\s+)").unwrap();
}

// A line holding only a dash is a placeholder value, not a bullet.
const PLACEHOLDER_DASHES: [&str; 3] = ["-", "\u{2014}", "\u{2013}"];

/// Trim a line and strip a leading bullet, dash or mid-dot marker.
pub fn clean_line(line: &str) -> String {
    let line = line.trim();
    if PLACEHOLDER_DASHES.contains(&line) {
        return line.to_string();
    }
    BULLET_PREFIX.replace(line, "").trim().to_string()
}

/// Split raw text into cleaned, non-empty lines.
pub fn normalize_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .split(|c: char| c == '\n' || c == '\r')
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect();
    log::debug!("Normalized {} non-empty lines", lines.len());
    lines
}
