// Listing-agreement field extraction: the generic pattern pass plus the
// multi-line extractors that override or supplement it.

use crate::models::rules::{listing_patterns, COUNTRY_KEYWORDS};
use crate::models::{FieldKey, FieldMapping};
use crate::processing::dates::parse_date_string;
use crate::processing::field_correction::FieldCorrection;
use crate::processing::lines::normalize_lines;
use crate::processing::numbers::find_amount_candidate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRADING_PAIR: Regex = Regex::new(
        r"(?i)(?:pair|trading\s*pair|open\s*trading\s*pair|币对)\s*[:：]?\s*([A-Z0-9]{2,12})\s*/\s*([A-Z0-9]{2,12})"
    )
    .unwrap();
    static ref ADDRESS_LABEL: Regex =
        Regex::new(r"(?i)^(?:registered\s*address|company\s*address|address)\s*[:：]\s*(.*)").unwrap();
    static ref ADDRESS_STOP_LABEL: Regex = Regex::new(
        r"(?i)^(?:company\s*name|full\s*legal\s*name|signer\s*name|signer|position|email|deflation|open\s*trading\s*pair|mm\s*demand|time\s*to\s*market|listing\s*fee|payment\s*address|jurisdiction|token)"
    )
    .unwrap();
    static ref COMPANY_LINE: Regex = Regex::new(r"(?i)^(?:company\s*name|company)\s*[:：]\s*.+").unwrap();
    static ref AFTER_COMPANY_STOP_LABEL: Regex = Regex::new(
        r"(?i)^(?:token|ticker|symbol|pair|trading\s*pair|listing|date|signer|email|certificate|payment|special|mm\s*demand|jurisdiction|address|registered)\b"
    )
    .unwrap();
    static ref LABELED_LINE: Regex = Regex::new(r"^.+\s*[:：].+").unwrap();
    static ref SIGNER_LABEL: Regex =
        Regex::new(r"(?i)^(?:signer\s*name|full\s*legal\s*name|signer)\s*[:：]\s*(.*)").unwrap();
    static ref AMOUNT_LABEL: Regex =
        Regex::new(r"(?i)number\s*数字|amount\s*[:：]|金额\s*[:：]|listing\s*fee").unwrap();
    static ref WORDS_LABEL: Regex = Regex::new(r"(?i)money|英文大写|amountinwords").unwrap();
    static ref PARENTHESIZED_WORDS: Regex = Regex::new(r"\(\s*([A-Z][A-Z\s\-]+)\s*\)").unwrap();
}

/// ListingExtractor pulls listing-agreement fields out of a pasted email.
pub struct ListingExtractor;

impl ListingExtractor {
    /// Extract every listing field found in `text`. Keys with no value are absent.
    pub fn extract_fields(text: &str) -> FieldMapping {
        let lines = normalize_lines(text);
        let mut result = FieldMapping::new();

        for key in FieldKey::ALL {
            if let Some(value) = Self::find_value(listing_patterns(key), &lines) {
                log::debug!("{} matched by pattern: {:?}", key.as_str(), value);
                result.insert(key, value);
            }
        }

        if !result.contains_key(&FieldKey::Token) {
            if let Some(token) = Self::extract_trading_pair_token(&lines) {
                log::debug!("token taken from trading pair: {}", token);
                result.insert(FieldKey::Token, token);
            }
        }

        if let Some(address) = Self::extract_registered_address(&lines) {
            result.insert(FieldKey::Address, address);
        } else if !result.contains_key(&FieldKey::Address) {
            if let Some(address) = Self::extract_address_after_company(&lines) {
                log::debug!("address collected after company line");
                result.insert(FieldKey::Address, address);
            }
        }

        if let Some(name) = result.get_mut(&FieldKey::Name1) {
            *name = FieldCorrection::clean_signer_name(name);
        } else if let Some(signer) = Self::extract_signer_name(&lines) {
            result.insert(FieldKey::Name1, signer);
        }

        let (amount, words) = Self::extract_amount_and_words(&lines);
        if !amount.is_empty() {
            result.insert(FieldKey::Amount, amount);
        }
        if !words.is_empty() {
            result.insert(FieldKey::AmountInWords, words);
        }

        for key in [FieldKey::Date, FieldKey::Listing] {
            if let Some(value) = result.get_mut(&key) {
                *value = parse_date_string(value);
            }
        }

        if result.get(&FieldKey::Jurisdiction).map_or(true, |v| v.is_empty()) {
            let address = result.get(&FieldKey::Address).map(String::as_str).unwrap_or("");
            if let Some(jurisdiction) = Self::infer_jurisdiction(address, &lines) {
                log::debug!("Jurisdiction inferred: {}", jurisdiction);
                result.insert(FieldKey::Jurisdiction, jurisdiction.to_string());
            }
        }

        result
    }

    /// Value from the first line any pattern matches, patterns tried in
    /// priority order. A blank capture on that line gives nothing.
    pub fn find_value(patterns: &[Regex], lines: &[String]) -> Option<String> {
        for line in lines {
            for pattern in patterns {
                if let Some(captures) = pattern.captures(line) {
                    let value = captures.get(1).map_or("", |m| m.as_str()).trim();
                    if value.is_empty() {
                        return None;
                    }
                    return Some(value.to_string());
                }
            }
        }
        None
    }

    /// Base asset of a "pair: XXX/YYY" construct, upper-cased.
    pub fn extract_trading_pair_token(lines: &[String]) -> Option<String> {
        lines.iter().find_map(|line| {
            TRADING_PAIR
                .captures(line)
                .map(|captures| captures[1].to_uppercase())
        })
    }

    /// Address from an address label, including continuation lines up to
    /// the next known label or any "label: value" line.
    pub fn extract_registered_address(lines: &[String]) -> Option<String> {
        for (idx, line) in lines.iter().enumerate() {
            let Some(captures) = ADDRESS_LABEL.captures(line) else {
                continue;
            };
            let mut parts = Vec::new();
            let inline = captures[1].trim();
            if !inline.is_empty() {
                parts.push(inline);
            }
            for next in &lines[idx + 1..] {
                let next = next.trim();
                if next.is_empty() {
                    continue;
                }
                if ADDRESS_STOP_LABEL.is_match(next) || LABELED_LINE.is_match(next) {
                    break;
                }
                parts.push(next);
            }
            let address = parts.join(" ").trim().to_string();
            return if address.is_empty() { None } else { Some(address) };
        }
        None
    }

    /// Unlabeled lines right after the company-name line, used when the
    /// email gives the address without a label.
    pub fn extract_address_after_company(lines: &[String]) -> Option<String> {
        for (idx, line) in lines.iter().enumerate() {
            if !COMPANY_LINE.is_match(line) {
                continue;
            }
            let mut parts = Vec::new();
            for next in &lines[idx + 1..] {
                let next = next.trim();
                if next.is_empty() {
                    continue;
                }
                if LABELED_LINE.is_match(next) || AFTER_COMPANY_STOP_LABEL.is_match(next) {
                    break;
                }
                parts.push(next);
            }
            if !parts.is_empty() {
                return Some(parts.join(" ").trim().to_string());
            }
        }
        None
    }

    /// Signer from a signer label; an empty label line takes the next line.
    pub fn extract_signer_name(lines: &[String]) -> Option<String> {
        for (idx, line) in lines.iter().enumerate() {
            let Some(captures) = SIGNER_LABEL.captures(line) else {
                continue;
            };
            let raw = captures[1].trim();
            let raw = if raw.is_empty() {
                match lines[idx + 1..].iter().map(|l| l.trim()).find(|l| !l.is_empty()) {
                    Some(next) => next,
                    None => continue,
                }
            } else {
                raw
            };
            return Some(FieldCorrection::clean_signer_name(raw));
        }
        None
    }

    /// Amount and amount-in-words scanned together over every line.
    ///
    /// Labeled lines overwrite earlier candidates. Currency mentions only
    /// fill a slot that is still empty, first match wins.
    pub fn extract_amount_and_words(lines: &[String]) -> (String, String) {
        let mut amount = String::new();
        let mut words = String::new();
        for line in lines {
            let upper = line.to_uppercase();
            if AMOUNT_LABEL.is_match(line) {
                let candidate = find_amount_candidate(line);
                if !candidate.is_empty() {
                    amount = candidate;
                }
            }
            if WORDS_LABEL.is_match(line) {
                let separator = if line.contains(':') { ':' } else { '：' };
                let tail = line.split_once(separator).map_or("", |(_, tail)| tail).trim();
                if !tail.is_empty() {
                    words = tail.to_string();
                }
            }
            let mentions_fee = upper.contains("USD") || upper.contains("FEE");
            if amount.is_empty() && (mentions_fee || line.contains('$')) {
                amount = find_amount_candidate(line);
            }
            if words.is_empty() && mentions_fee {
                if let Some(captures) = PARENTHESIZED_WORDS.captures(line) {
                    words = captures[1].trim().to_string();
                }
            }
        }
        (amount, words)
    }

    /// Country named in the address, else anywhere in the document.
    pub fn infer_jurisdiction(address: &str, lines: &[String]) -> Option<&'static str> {
        let find = |text: &str| {
            COUNTRY_KEYWORDS
                .iter()
                .find(|(keyword, _)| keyword.is_match(text))
                .map(|(_, display)| *display)
        };
        if !address.is_empty() {
            if let Some(country) = find(address) {
                return Some(country);
            }
        }
        lines.iter().find_map(|line| find(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        normalize_lines(text)
    }

    #[test]
    fn test_company_with_unlabeled_address_infers_jurisdiction() {
        let fields = ListingExtractor::extract_fields(
            "Company Name: Acme Pte Ltd\n\nSingapore, 1 Raffles Place",
        );
        assert_eq!(fields.get(&FieldKey::Company).map(String::as_str), Some("Acme Pte Ltd"));
        assert_eq!(
            fields.get(&FieldKey::Address).map(String::as_str),
            Some("Singapore, 1 Raffles Place")
        );
        assert_eq!(fields.get(&FieldKey::Jurisdiction).map(String::as_str), Some("Singapore"));
    }

    #[test]
    fn test_full_listing_email() {
        let email = "\
- Company Name: Nova Labs Ltd
- Jurisdiction: British Virgin Islands
- Registered Address: Craigmuir Chambers,
  Road Town, Tortola
- Token: NOVA
- Listing date: before Nov 2nd, 2025
- Listing fee: 30,000 USDT (THIRTY THOUSAND USDT)
- Signer Name: Jane Doe CEO
- Email: jane@nova.io";
        let fields = ListingExtractor::extract_fields(email);
        let get = |key| fields.get(&key).map(String::as_str);
        assert_eq!(get(FieldKey::Company), Some("Nova Labs Ltd"));
        assert_eq!(get(FieldKey::Jurisdiction), Some("British Virgin Islands"));
        assert_eq!(get(FieldKey::Address), Some("Craigmuir Chambers, Road Town, Tortola"));
        assert_eq!(get(FieldKey::Token), Some("NOVA"));
        assert_eq!(get(FieldKey::Listing), Some("November 2, 2025"));
        assert_eq!(get(FieldKey::Amount), Some("30,000"));
        assert_eq!(get(FieldKey::AmountInWords), Some("THIRTY THOUSAND USDT"));
        assert_eq!(get(FieldKey::Name1), Some("Jane Doe"));
    }

    #[test]
    fn test_token_from_trading_pair() {
        let fields = ListingExtractor::extract_fields("Open trading pair: abc/USDT");
        assert_eq!(fields.get(&FieldKey::Token).map(String::as_str), Some("ABC"));
    }

    #[test]
    fn test_address_stops_at_next_label() {
        let address = ListingExtractor::extract_registered_address(&lines(
            "Address:\n10 Main Street\nSuite 5\nToken: XYZ",
        ));
        assert_eq!(address.as_deref(), Some("10 Main Street Suite 5"));
        assert_eq!(ListingExtractor::extract_registered_address(&lines("Token: XYZ")), None);
    }

    #[test]
    fn test_signer_on_next_line() {
        let signer = ListingExtractor::extract_signer_name(&lines(
            "Signer:\n\nJohn   Smith Managing Director",
        ));
        assert_eq!(signer.as_deref(), Some("John Smith"));
        assert_eq!(ListingExtractor::extract_signer_name(&lines("Signer:")), None);
    }

    #[test]
    fn test_amount_words_label_and_compact_fee() {
        let (amount, words) = ListingExtractor::extract_amount_and_words(&lines(
            "Listing fee: 25k USDT\nAmountInWords: twenty five thousand",
        ));
        assert_eq!(amount, "25000");
        assert_eq!(words, "twenty five thousand");
    }

    #[test]
    fn test_currency_fallback_keeps_first_match() {
        let (amount, words) = ListingExtractor::extract_amount_and_words(&lines(
            "We propose 10,000 USDT (TEN THOUSAND USDT)\nBudget 20,000 USDT (TWENTY THOUSAND)",
        ));
        assert_eq!(amount, "10,000");
        assert_eq!(words, "TEN THOUSAND USDT");
    }

    #[test]
    fn test_jurisdiction_prefers_address() {
        let lines = lines("We are based in Hong Kong");
        assert_eq!(
            ListingExtractor::infer_jurisdiction("1 Main St, Victoria, Seychelles", &lines),
            Some("Seychelles")
        );
        assert_eq!(ListingExtractor::infer_jurisdiction("", &lines), Some("Hong Kong"));
        assert_eq!(ListingExtractor::infer_jurisdiction("", &[]), None);
    }

    #[test]
    fn test_empty_and_irrelevant_input() {
        assert!(ListingExtractor::extract_fields("").is_empty());
        assert!(ListingExtractor::extract_fields("  \n\t").is_empty());
        assert!(ListingExtractor::extract_fields("hello there, nothing to see").is_empty());
    }

    #[test]
    fn test_canonical_dates_are_stable() {
        let fields = ListingExtractor::extract_fields("Listing date: October 30, 2024");
        assert_eq!(fields.get(&FieldKey::Listing).map(String::as_str), Some("October 30, 2024"));
    }
}
