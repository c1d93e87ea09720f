use crate::merge::{apply_agreement_clauses, fill_kyc_document, MergeMapping, TextDocument};
use crate::models::*;
use crate::processing::dates::{parse_date_string, today};
use crate::processing::*;
use crate::utils::{agreement_file_name, kyc_file_name, GeneratorConfig};

const NOT_APPLICABLE: &str = "N/A";

pub struct DocumentGenerator {
    config: GeneratorConfig,
}

impl Default for DocumentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        DocumentGenerator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // Main listing analysis that orchestrates every extractor
    pub fn analyze_listing(&self, email: &str, wallet_text: &str) -> ListingAnalysis {
        // Step 1: Extract labeled fields
        let mut fields = ListingExtractor::extract_fields(email);
        let recognized = !fields.is_empty();
        if !recognized {
            log::warn!("No listing fields recognized, fill them in manually");
        }

        // Step 2: The agreement is dated on signing, not on the email's date
        fields.insert(FieldKey::Date, self.signing_date());

        // Step 3: Decide on the technical fee clause
        let include_technical_fee = self.include_technical_fee(email);

        // Step 4: Canonical amount and spelled amount
        self.normalize_amounts(&mut fields, include_technical_fee);

        // Step 5: Wallets from the wallet text, or from the email
        let wallets = WalletExtractor::from_input(wallet_text, email);
        let wallet_text = wallets.to_text();

        log::info!(
            "Listing analysis: {} fields, {} wallet lines, technical fee {}",
            fields.len(),
            wallet_text.lines().count(),
            if include_technical_fee { "included" } else { "excluded" }
        );

        ListingAnalysis {
            fields,
            wallets,
            wallet_text,
            include_technical_fee,
            recognized,
        }
    }

    pub fn analyze_kyc(&self, text: &str) -> KycAnalysis {
        let mut fields = KycExtractor::extract_fields(text);
        let recognized = !fields.is_empty();
        if !recognized {
            log::warn!("No KYC fields recognized, fill them in manually");
        }
        let account_id = fields
            .remove(&KycField::AccountId)
            .filter(|id| !id.trim().is_empty());
        log::info!("KYC analysis: {} fields", fields.len());
        KycAnalysis {
            fields,
            account_id,
            recognized,
        }
    }

    fn signing_date(&self) -> String {
        match self.config.signing_date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => parse_date_string(date),
            _ => today(),
        }
    }

    /// The company template always keeps the fee clause. The waive template
    /// follows the configured choice, else what the email says.
    fn include_technical_fee(&self, email: &str) -> bool {
        match self.config.template {
            TemplateKind::Company => true,
            TemplateKind::CompanyWaive => self
                .config
                .include_technical_fee
                .unwrap_or_else(|| detect_technical_fee(email)),
        }
    }

    fn normalize_amounts(&self, fields: &mut FieldMapping, include_technical_fee: bool) {
        if self.config.template == TemplateKind::CompanyWaive && !include_technical_fee {
            fields.insert(FieldKey::Amount, NOT_APPLICABLE.to_string());
            fields.insert(FieldKey::AmountInWords, NOT_APPLICABLE.to_string());
            return;
        }
        let amount = fields.get(&FieldKey::Amount).cloned().unwrap_or_default();
        let words = fields.get(&FieldKey::AmountInWords).cloned().unwrap_or_default();
        if amount.is_empty() && words.is_empty() {
            return;
        }
        let (amount, words) = FieldCorrection::normalize_amount_fields(&amount, &words);
        if !amount.is_empty() {
            fields.insert(FieldKey::Amount, amount);
        }
        if !words.is_empty() {
            fields.insert(FieldKey::AmountInWords, words);
        }
    }

    /// Placeholder mapping for the agreement: every listing field (empty
    /// when missing) plus the rendered wallet block under `Wallets`.
    pub fn listing_merge_mapping(&self, analysis: &ListingAnalysis) -> MergeMapping {
        let mut mapping: MergeMapping = FieldKey::ALL
            .iter()
            .map(|key| {
                let value = analysis.fields.get(key).map_or("", |v| v.trim());
                (key.as_str().to_string(), value.to_string())
            })
            .collect();
        let wallets = if analysis.wallets.is_empty() {
            String::new()
        } else {
            analysis.wallet_text.clone()
        };
        mapping.insert("Wallets".to_string(), wallets);
        mapping
    }

    pub fn fill_agreement(&self, doc: &mut TextDocument, analysis: &ListingAnalysis) {
        let mapping = self.listing_merge_mapping(analysis);
        apply_agreement_clauses(doc, &mapping, &analysis.wallets, analysis.include_technical_fee);
    }

    pub fn fill_kyc(&self, doc: &mut TextDocument, analysis: &KycAnalysis) {
        fill_kyc_document(doc, &analysis.fields, analysis.account_id.as_deref().unwrap_or(""));
    }

    pub fn agreement_file_name(&self, analysis: &ListingAnalysis) -> String {
        let field = |key| analysis.fields.get(&key).map_or("", String::as_str);
        agreement_file_name(field(FieldKey::Company), field(FieldKey::Token))
    }

    pub fn kyc_file_name(&self, analysis: &KycAnalysis) -> String {
        kyc_file_name(analysis.fields.get(&KycField::Name).map_or("", String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "\
Company Name: Acme Pte Ltd
Token: ACM
Listing date: 2025-01-15
Listing fee: 50k USDT
Signer: Jane Doe Director
Our ERC20 wallet: 0x1111111111111111111111111111111111111111
There is no technical fee.";

    fn fixed_date(template: TemplateKind) -> DocumentGenerator {
        DocumentGenerator::with_config(GeneratorConfig {
            template,
            signing_date: Some("2025-02-01".to_string()),
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn test_listing_analysis() {
        let analysis = fixed_date(TemplateKind::Company).analyze_listing(EMAIL, "");
        let get = |key| analysis.fields.get(&key).map(String::as_str);
        assert!(analysis.recognized);
        assert_eq!(get(FieldKey::Date), Some("February 1, 2025"));
        assert_eq!(get(FieldKey::Listing), Some("January 15, 2025"));
        assert_eq!(get(FieldKey::Amount), Some("50,000"));
        assert_eq!(get(FieldKey::AmountInWords), Some("FIFTY THOUSAND"));
        assert_eq!(get(FieldKey::Name1), Some("Jane Doe"));
        assert!(analysis.include_technical_fee);
        assert_eq!(
            analysis.wallet_text,
            "USDT-ERC20: 0x1111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_waive_template_without_fee_forces_na() {
        let analysis = fixed_date(TemplateKind::CompanyWaive).analyze_listing(EMAIL, "");
        assert!(!analysis.include_technical_fee);
        assert_eq!(analysis.fields.get(&FieldKey::Amount).map(String::as_str), Some("N/A"));
        assert_eq!(
            analysis.fields.get(&FieldKey::AmountInWords).map(String::as_str),
            Some("N/A")
        );
    }

    #[test]
    fn test_configured_fee_overrides_detection() {
        let generator = DocumentGenerator::with_config(GeneratorConfig {
            template: TemplateKind::CompanyWaive,
            include_technical_fee: Some(true),
            ..GeneratorConfig::default()
        });
        assert!(generator.analyze_listing(EMAIL, "").include_technical_fee);
    }

    #[test]
    fn test_unrecognized_email_still_gets_signing_date() {
        let analysis = DocumentGenerator::new().analyze_listing("nothing useful", "");
        assert!(!analysis.recognized);
        assert_eq!(analysis.fields.get(&FieldKey::Date), Some(&today()));
        assert!(analysis.wallets.is_empty());
    }

    #[test]
    fn test_merge_mapping_has_every_key() {
        let generator = fixed_date(TemplateKind::Company);
        let analysis = generator.analyze_listing("Token: ACM", "");
        let mapping = generator.listing_merge_mapping(&analysis);
        assert_eq!(mapping.len(), FieldKey::ALL.len() + 1);
        assert_eq!(mapping.get("token").map(String::as_str), Some("ACM"));
        assert_eq!(mapping.get("company").map(String::as_str), Some(""));
        assert_eq!(mapping.get("Wallets").map(String::as_str), Some(""));
    }

    #[test]
    fn test_kyc_analysis_separates_account_id() {
        let analysis = DocumentGenerator::new().analyze_kyc("CID: 889900\n姓名: 李四");
        assert_eq!(analysis.account_id.as_deref(), Some("889900"));
        assert!(!analysis.fields.contains_key(&KycField::AccountId));
        assert_eq!(DocumentGenerator::new().kyc_file_name(&analysis), "李四 - KYC.docx");
    }

    #[test]
    fn test_agreement_file_name() {
        let generator = fixed_date(TemplateKind::Company);
        let analysis = generator.analyze_listing(EMAIL, "");
        assert_eq!(
            generator.agreement_file_name(&analysis),
            "ACM-Acme Pte Ltd - Agreement.docx"
        );
    }
}
