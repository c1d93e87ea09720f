// Output file names for generated documents.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Make a value safe to embed in a file name.
pub fn sanitize_filename_component(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let value = UNSAFE_FILENAME_CHARS.replace_all(value, "-");
    let value = WHITESPACE_RUN.replace_all(&value, " ");
    value
        .trim_matches(|c: char| c == ' ' || c == '.' || c == '-')
        .to_string()
}

/// `"<TOKEN>-<Company> - Agreement.docx"`, token prefix omitted when unknown.
pub fn agreement_file_name(company: &str, token: &str) -> String {
    let company = match sanitize_filename_component(company) {
        c if c.is_empty() => "Document".to_string(),
        c => c,
    };
    let token = sanitize_filename_component(token);
    if token.is_empty() {
        format!("{} - Agreement.docx", company)
    } else {
        format!("{}-{} - Agreement.docx", token, company)
    }
}

pub fn kyc_file_name(name: &str) -> String {
    match sanitize_filename_component(name) {
        n if n.is_empty() => "KYC - KYC.docx".to_string(),
        n => format!("{} - KYC.docx", n),
    }
}
