// Agreement clause edits: technical-fee removal, the promotional budget
// sentence and the wallet address block.

use super::{MergeMapping, MergeTarget, TextDocument};
use crate::models::{Chain, WalletSet};
use crate::processing::wallets::WalletExtractor;
use lazy_static::lazy_static;
use regex::Regex;

const FEE_ANCHOR: &str = "A Technical Fee";
const WALLET_CONFIRMATION: &str = "BitMart confirms the wallet addresses as below:";
const WALLET_PLACEHOLDER: &str = "{{Wallets}}";
const ACKNOWLEDGE_PREFIX: &str = "The Exchange will acknowledge";

const BUDGET_FREE_PROMOTION: &str = "Developer agrees to coordinate such promotional activities and to sponsor listing related campaigns on the Exchange, including, but not limited to, campaigns on social media platforms, press releases, promotional events in communities. The Developer agrees to make such budget available before the listing date of the Token.";

lazy_static! {
    static ref FEE_CLAUSE_START: Regex = Regex::new(r"(?i)\bA\s+Technical\s+Fee\b").unwrap();
    static ref NEXT_SECTION: Regex = Regex::new(r"^(?:[dD]\.\s|IV\b)").unwrap();
    static ref CONFIRMATION: Regex =
        Regex::new(r"(?i)\s*BitMart confirms the wallet addresses as below:\s*").unwrap();
    static ref PROMOTIONAL_BUDGET: Regex = Regex::new(
        r"(?is)Developer agrees to coordinate such promotional activities.*?communities(?:,\s*with a budget of .*? USDT\.)?\s*The Developer agrees to make such budget available before the listing date of the Token\."
    )
    .unwrap();
}

/// Drop the technical-fee clause: every body paragraph from the one that
/// mentions "A Technical Fee" up to the next "d. " or "IV" heading.
/// Returns the number of paragraphs removed.
pub fn remove_technical_fee_clause(doc: &mut TextDocument) -> usize {
    let mut in_clause = false;
    let mut doomed = Vec::new();
    for (idx, paragraph) in doc.paragraphs() {
        let text = paragraph.text();
        let text = text.trim();
        if !in_clause && FEE_CLAUSE_START.is_match(text) {
            in_clause = true;
        }
        if in_clause {
            if NEXT_SECTION.is_match(text) {
                in_clause = false;
                continue;
            }
            doomed.push(idx);
        }
    }
    doc.remove_blocks(&doomed);
    log::debug!("Technical fee clause removed ({} paragraphs)", doomed.len());
    doomed.len()
}

/// Rewrite the promotional-activities paragraph without its budget figure.
pub fn replace_promotional_budget(doc: &mut TextDocument) -> bool {
    let mut replaced = false;
    for paragraph in doc.all_paragraphs_mut() {
        let text = paragraph.text().replace('\u{a0}', " ");
        if !text.is_empty() && PROMOTIONAL_BUDGET.is_match(&text) {
            paragraph.set_text(BUDGET_FREE_PROMOTION);
            replaced = true;
        }
    }
    replaced
}

fn is_wallet_line(text: &str) -> bool {
    text.contains(WALLET_PLACEHOLDER)
        || Chain::ALL.iter().any(|chain| text.contains(chain.label()))
        || WalletExtractor::contains_address(text)
}

/// Bring the wallet part of the fee clause in line with `wallets`.
///
/// The fee paragraph ends with the confirmation sentence only when there is
/// at least one wallet. The block between it and the next section either
/// receives the rendered wallet lines or disappears.
pub fn update_wallet_clause(doc: &mut TextDocument, wallets: &WalletSet) {
    let paragraphs: Vec<(usize, String)> = doc
        .paragraphs()
        .map(|(idx, paragraph)| (idx, paragraph.text()))
        .collect();
    let Some(target) = paragraphs.iter().position(|(_, text)| text.contains(FEE_ANCHOR)) else {
        return;
    };
    let target_block = paragraphs[target].0;

    let base = paragraphs[target].1.replace('\u{a0}', " ");
    let base = CONFIRMATION.replace_all(base.trim(), " ");
    let base = base.trim();
    let mut sentence = base.to_string();
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    let has_wallets = !wallets.is_empty();
    if has_wallets {
        sentence = format!("{} {}", sentence, WALLET_CONFIRMATION);
    }
    if let Some(paragraph) = doc.paragraph_mut(target_block) {
        paragraph.set_text(&sentence);
    }

    let end = paragraphs[target + 1..]
        .iter()
        .position(|(_, text)| {
            let text = text.trim();
            text.starts_with(ACKNOWLEDGE_PREFIX) || NEXT_SECTION.is_match(text)
        })
        .map_or(target + 1, |offset| target + 1 + offset);
    let block = &paragraphs[target + 1..end];

    if !has_wallets {
        let mut doomed: Vec<usize> = block.iter().map(|(idx, _)| *idx).collect();
        doomed.extend(
            paragraphs
                .iter()
                .filter(|(idx, text)| *idx != target_block && CONFIRMATION.is_match(text))
                .map(|(idx, _)| *idx),
        );
        doc.remove_blocks(&doomed);
        log::debug!("No wallets, wallet block removed");
        return;
    }

    let wallet_text = wallets.to_text();
    let mut wallet_paragraphs = block
        .iter()
        .filter(|(_, text)| {
            let text = text.trim();
            !text.is_empty() && is_wallet_line(text)
        })
        .map(|(idx, _)| *idx);

    if let Some(keep) = wallet_paragraphs.next() {
        let doomed: Vec<usize> = wallet_paragraphs.collect();
        if let Some(paragraph) = doc.paragraph_mut(keep) {
            paragraph.set_text(&wallet_text);
        }
        doc.remove_blocks(&doomed);
        return;
    }

    let doomed: Vec<usize> = block.iter().map(|(idx, _)| *idx).collect();
    doc.remove_blocks(&doomed);
    let mut inserted = vec![String::new()];
    inserted.extend(wallet_text.lines().map(str::to_string));
    inserted.push(String::new());
    doc.insert_paragraphs_after(target_block, &inserted);
}

/// Mapping-driven clause edits for an agreement: placeholders first, then
/// either fee removal or the wallet clause.
pub fn apply_agreement_clauses(
    doc: &mut TextDocument,
    mapping: &MergeMapping,
    wallets: &WalletSet,
    include_technical_fee: bool,
) {
    doc.apply(mapping);
    if include_technical_fee {
        update_wallet_clause(doc, wallets);
    } else {
        remove_technical_fee_clause(doc);
        replace_promotional_budget(doc);
    }
}
