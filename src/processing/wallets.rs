use crate::models::{Chain, WalletSet};
use crate::processing::lines::normalize_lines;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ETH_ADDRESS: Regex = Regex::new(r"\b0x[a-fA-F0-9]{40}\b").unwrap();
    static ref TRON_ADDRESS: Regex = Regex::new(r"\bT[1-9A-HJ-NP-Za-km-z]{33}\b").unwrap();
    static ref SOL_ADDRESS: Regex = Regex::new(r"\b[1-9A-HJ-NP-Za-km-z]{32,44}\b").unwrap();
}

fn all_matches<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.find_iter(text).map(|m| m.as_str()).collect()
}

/// Base58 candidates that are not Tron addresses.
fn solana_candidates<'t>(text: &'t str, tron: &[&str]) -> Vec<&'t str> {
    all_matches(&SOL_ADDRESS, text)
        .into_iter()
        .filter(|addr| !tron.contains(addr))
        .collect()
}

/// WalletExtractor finds receiving addresses per chain.
pub struct WalletExtractor;

impl WalletExtractor {
    /// Keyword-guided line scan, then a whole-text pass for any slot still empty.
    pub fn extract(text: &str) -> WalletSet {
        let mut wallets = WalletSet::default();

        for line in &normalize_lines(text) {
            let lower = line.to_lowercase();
            let eth = all_matches(&ETH_ADDRESS, line);
            let tron = all_matches(&TRON_ADDRESS, line);
            let sol = solana_candidates(line, &tron);

            let hits = [
                (Chain::Erc20, lower.contains("erc20") || lower.contains("eth"), eth.first()),
                (Chain::Bsc, lower.contains("bsc") || lower.contains("bep20"), eth.first()),
                (Chain::Trc20, lower.contains("trc20"), tron.first()),
                (Chain::Solana, lower.contains("sol"), sol.first()),
            ];
            for (chain, keyword, address) in hits {
                if let (true, Some(address)) = (keyword, address) {
                    let slot = wallets.slot_mut(chain);
                    if slot.is_empty() {
                        *slot = address.to_string();
                    }
                }
            }
        }

        if !wallets.is_complete() {
            log::debug!("Wallet line scan left empty slots, scanning whole text");
            Self::fill_unclaimed(&mut wallets, text);
        }
        wallets
    }

    fn fill_unclaimed(wallets: &mut WalletSet, text: &str) {
        let tron = all_matches(&TRON_ADDRESS, text);

        if wallets.trc20.is_empty() {
            if let Some(address) = tron.iter().find(|addr| !wallets.holds(addr)) {
                wallets.trc20 = address.to_string();
            }
        }

        for address in all_matches(&ETH_ADDRESS, text) {
            if wallets.holds(address) {
                continue;
            }
            if wallets.erc20.is_empty() {
                wallets.erc20 = address.to_string();
            } else if wallets.bsc.is_empty() {
                wallets.bsc = address.to_string();
            }
        }

        if wallets.solana.is_empty() {
            if let Some(address) = solana_candidates(text, &tron)
                .into_iter()
                .find(|addr| !wallets.holds(addr))
            {
                wallets.solana = address.to_string();
            }
        }
    }

    /// Wallets from the dedicated wallet text, falling back to the email
    /// when that text is blank or holds no address.
    pub fn from_input(wallet_text: &str, fallback_text: &str) -> WalletSet {
        if !wallet_text.trim().is_empty() {
            let wallets = Self::extract(wallet_text);
            if !wallets.is_empty() {
                return wallets;
            }
            log::debug!("No wallet in wallet text, falling back to email");
        }
        Self::extract(fallback_text)
    }

    /// True when `text` holds any recognizable wallet address.
    pub fn contains_address(text: &str) -> bool {
        ETH_ADDRESS.is_match(text) || TRON_ADDRESS.is_match(text) || SOL_ADDRESS.is_match(text)
    }
}
