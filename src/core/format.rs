use crate::domain::model::{FlavorTextEntry, DESCRIPTION_FALLBACK};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn word_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w").expect("valid regex"))
}

fn subject_word_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^\w)|(\s+\w)|(-\w)").expect("valid regex"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn upper(caps: &Captures) -> String {
    caps[0].to_uppercase()
}

/// `thunder-punch` -> `Thunder Punch`
pub fn format_move_name(identifier: &str) -> String {
    let spaced = identifier.replace('-', " ");
    word_start().replace_all(&spaced, upper).into_owned()
}

/// `mr-mime` -> `Mr-Mime`，保留連字號
pub fn format_subject_name(name: &str) -> String {
    subject_word_start().replace_all(name, upper).into_owned()
}

/// 去掉換行、換頁、歸位字元並壓縮連續空白
pub fn normalize_flavor_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\u{000C}' | '\r' => ' ',
            other => other,
        })
        .collect();
    whitespace_run().replace_all(&replaced, " ").trim().to_string()
}

/// First English flavor text entry, normalized, or the fixed fallback.
pub fn extract_description(entries: &[FlavorTextEntry]) -> String {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| normalize_flavor_text(&entry.flavor_text))
        .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string())
}
