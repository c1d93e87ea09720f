const FEE_PHRASE: &str = "technical fee";
const NEGATIONS: [&str; 3] = ["waive", "no ", "without"];
const NEGATED_FEE_PHRASES: [&str; 2] = ["no technical fee", "without technical fee"];

/// Whether the agreement keeps its technical-fee clause.
///
/// A mention of the fee next to any negation marker anywhere in the text
/// excludes it. Text that never mentions the fee includes it.
pub fn detect_technical_fee(text: &str) -> bool {
    let lower = text.to_lowercase();
    if lower.contains(FEE_PHRASE) && NEGATIONS.iter().any(|marker| lower.contains(marker)) {
        return false;
    }
    if NEGATED_FEE_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return false;
    }
    true
}
