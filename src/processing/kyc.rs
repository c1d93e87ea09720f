// KYC field extraction over bilingual review-console text.

use crate::models::rules::{KycLabel, KYC_LABELS};
use crate::models::{KycField, KycMapping};
use crate::processing::field_correction::FieldCorrection;
use crate::processing::lines::normalize_lines;

const COLONS: [char; 2] = [':', '：'];

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    start: usize,
    end: usize,
    field: KycField,
}

/// A label counts only when followed by whitespace, a colon or the end of
/// the line. The trailing whitespace and one colon belong to the label.
fn label_occurrences(label: &KycLabel, line: &str) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(m) = label.occurrence.find_at(line, pos) {
        let rest = &line[m.end()..];
        let terminated = match rest.chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || COLONS.contains(&c),
        };
        if !terminated {
            pos = m.start() + line[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        let after_space = rest.trim_start();
        let mut end = line.len() - after_space.len();
        if let Some(colon) = after_space.chars().next().filter(|c| COLONS.contains(c)) {
            end += colon.len_utf8();
        }
        found.push(Occurrence {
            start: m.start(),
            end,
            field: label.field,
        });
        pos = m.end().max(m.start() + 1);
    }
    found
}

/// KycExtractor reads identity attributes from pasted KYC review text.
pub struct KycExtractor;

impl KycExtractor {
    pub fn extract_fields(text: &str) -> KycMapping {
        let lines = normalize_lines(text);
        let mut result = KycMapping::new();

        for (idx, line) in lines.iter().enumerate() {
            Self::extract_inline_pairs(line, &mut result);

            let Some(field) = Self::label_key(line) else {
                continue;
            };
            let mut next = lines[idx + 1..]
                .iter()
                .skip_while(|candidate| Self::label_key(candidate) == Some(field));
            if let Some(value) = next.next().filter(|candidate| !Self::is_label_line(candidate)) {
                let value = FieldCorrection::normalize_kyc_value(field, value);
                if !value.is_empty() {
                    log::debug!("{} read from line after its label", field.as_str());
                    result.insert(field, value);
                }
            }
        }

        result
    }

    /// Split a line holding one or more "label: value" pairs. A value runs
    /// up to the next label occurrence; the longest value per field wins.
    pub fn extract_inline_pairs(line: &str, result: &mut KycMapping) {
        let mut occurrences: Vec<Occurrence> = KYC_LABELS
            .iter()
            .flat_map(|label| label_occurrences(label, line))
            .collect();
        if occurrences.is_empty() {
            return;
        }
        occurrences.sort_by_key(|occurrence| occurrence.start);

        for (idx, occurrence) in occurrences.iter().enumerate() {
            let next_start = occurrences.get(idx + 1).map_or(line.len(), |next| next.start);
            if next_start <= occurrence.end {
                continue;
            }
            let raw = line[occurrence.end..next_start]
                .trim()
                .trim_start_matches(COLONS)
                .trim();
            if raw.is_empty() || Self::is_label_line(raw) {
                continue;
            }
            let value = FieldCorrection::normalize_kyc_value(occurrence.field, raw);
            let longer = result
                .get(&occurrence.field)
                .map_or(true, |current| value.chars().count() > current.chars().count());
            if longer {
                result.insert(occurrence.field, value);
            }
        }
    }

    /// Field whose label makes up the whole line, first in dictionary order.
    pub fn label_key(line: &str) -> Option<KycField> {
        let candidate = line.trim();
        if candidate.is_empty() {
            return None;
        }
        KYC_LABELS
            .iter()
            .find(|label| label.bare.is_match(candidate))
            .map(|label| label.field)
    }

    pub fn is_label_line(line: &str) -> bool {
        Self::label_key(line).is_some()
    }
}
