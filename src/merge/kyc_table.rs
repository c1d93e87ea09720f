use super::{Block, Row, Table, TextDocument};
use crate::models::{KycField, KycMapping};

const ACCOUNT_ID_PREFIX: &str = "Account ID with BitMart:";

// Template labels that differ from the display labels.
const LABEL_ALIASES: [(&str, &str); 1] = [("身份", "ID Type")];

// First-column labels whose rows are dropped from the dossier.
const CHANNEL_LABEL_MARKERS: [&str; 2] = ["认证渠道", "认证方式"];

/// Canonical display label for a template's first-column label. Unknown
/// labels come back trimmed.
pub fn normalize_kyc_template_label(label: &str) -> String {
    let cleaned = label.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    let lower = cleaned.to_lowercase();
    if let Some((_, alias)) = LABEL_ALIASES
        .iter()
        .find(|(from, _)| *from == cleaned || *from == lower)
    {
        return alias.to_string();
    }
    KycField::ALL
        .iter()
        .filter_map(|field| field.display_label())
        .find(|display| display.to_lowercase() == lower)
        .unwrap_or(cleaned)
        .to_string()
}

fn is_dropped_row(raw_label: &str, label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    lower.starts_with("kyc picture")
        || lower == "verification channel"
        || CHANNEL_LABEL_MARKERS.iter().any(|marker| raw_label.contains(marker))
}

/// Fill the KYC dossier in place: the account-id paragraph and the
/// two-column attribute table.
pub fn fill_kyc_document(doc: &mut TextDocument, data: &KycMapping, account_id: &str) {
    let account_paragraph = doc
        .paragraphs()
        .find(|(_, paragraph)| {
            paragraph
                .text()
                .trim()
                .to_lowercase()
                .starts_with("account id with bitmart")
        })
        .map(|(idx, _)| idx);
    if let (Some(idx), false) = (account_paragraph, account_id.trim().is_empty()) {
        if let Some(paragraph) = doc.paragraph_mut(idx) {
            paragraph.set_text(&format!("{} {}", ACCOUNT_ID_PREFIX, account_id.trim()));
        }
    }

    for table in doc.tables_mut() {
        table.rows.retain_mut(|row| {
            let Some(first) = row.cells.first_mut() else {
                return true;
            };
            let raw_label = first.text().trim().to_string();
            let label = normalize_kyc_template_label(&raw_label);
            if is_dropped_row(&raw_label, &label) {
                return false;
            }
            if label != raw_label {
                first.set_text(&label);
            }
            if let (Some(field), Some(value_cell)) =
                (KycField::from_display_label(&label), row.cells.get_mut(1))
            {
                value_cell.set_text(data.get(&field).map(String::as_str).unwrap_or(""));
            }
            true
        });
    }
}

/// The ordered dossier used when no template file is given.
pub fn kyc_template() -> TextDocument {
    let rows = KycField::ALL
        .iter()
        .filter_map(|field| field.display_label())
        .map(|label| Row::new(&[label, ""]))
        .collect();
    let mut doc = TextDocument::default();
    doc.push_paragraph(ACCOUNT_ID_PREFIX);
    doc.push_paragraph("1) KYC Info");
    doc.blocks.push(Block::Table(Table { rows }));
    doc
}
