use docfill::merge::{kyc_template, MergeMapping};
use docfill::models::{FieldKey, KycField, TemplateKind};
use docfill::processing::{detect_technical_fee, KycExtractor, ListingExtractor, WalletExtractor};
use docfill::{DocumentGenerator, GeneratorConfig, MergeTarget, TextDocument};

const ETH: &str = "0x2222222222222222222222222222222222222222";
const TRON: &str = "TLa2f6VPqDgRE67v1736s7bJ8Ray5wYjU7";
const SOL: &str = "7EcDhSYGxXyscszYEp35KHN8vvw3svAuLKTzXwCFLtV";

const EMAIL: &str = "\
Hi BitMart team,

• Company Name: Acme Pte Ltd
• Registered Address:
  80 Robinson Road, #10-01
  Singapore 068898
• Token ticker: ACM
• Open Trading Pair: ACM/USDT
• Listing date: by Nov 2nd, 2025
• Listing fee: 30,000 USDT (THIRTY THOUSAND USDT)
• Signer name: Tan Wei Ming CEO

Payment addresses:
USDT-ERC20: 0x2222222222222222222222222222222222222222
USDT-TRC20: TLa2f6VPqDgRE67v1736s7bJ8Ray5wYjU7";

const AGREEMENT: &str = "\
TOKEN LISTING AGREEMENT
This agreement is dated {{date}} between BitMart and {{company}}, a company incorporated in {{ Jurisdiction }} with its address at {{address}}.
The Token {{token}} will be listed on {{listing}}.
c. A Technical Fee of {{amount}} USDT ({{amountInWords}}) shall be paid.
{{Wallets}}
The Exchange will acknowledge receipt of the Technical Fee.
d. Developer agrees to coordinate such promotional activities and to sponsor listing related campaigns, promotional events in communities, with a budget of {{amount}} USDT. The Developer agrees to make such budget available before the listing date of the Token.
IV. Signatures
| Signed by | {{name1}} |";

fn generator(template: TemplateKind) -> DocumentGenerator {
    DocumentGenerator::with_config(GeneratorConfig {
        template,
        signing_date: Some("March 1, 2025".to_string()),
        ..GeneratorConfig::default()
    })
}

#[test]
fn listing_email_to_filled_agreement() {
    let generator = generator(TemplateKind::Company);
    let analysis = generator.analyze_listing(EMAIL, "");
    let field = |key| analysis.fields.get(&key).map(String::as_str).unwrap_or("");

    assert_eq!(field(FieldKey::Company), "Acme Pte Ltd");
    assert_eq!(field(FieldKey::Address), "80 Robinson Road, #10-01 Singapore 068898");
    assert_eq!(field(FieldKey::Jurisdiction), "Singapore");
    assert_eq!(field(FieldKey::Token), "ACM");
    assert_eq!(field(FieldKey::Listing), "November 2, 2025");
    assert_eq!(field(FieldKey::Date), "March 1, 2025");
    assert_eq!(field(FieldKey::Amount), "30,000");
    assert_eq!(field(FieldKey::AmountInWords), "THIRTY THOUSAND USDT");
    assert_eq!(field(FieldKey::Name1), "Tan Wei Ming");
    assert_eq!(analysis.wallets.erc20, ETH);
    assert_eq!(analysis.wallets.trc20, TRON);

    let mut doc = TextDocument::parse(AGREEMENT);
    generator.fill_agreement(&mut doc, &analysis);
    let rendered = doc.render();

    assert!(rendered.contains("dated March 1, 2025 between BitMart and Acme Pte Ltd"));
    assert!(rendered.contains("incorporated in Singapore"));
    assert!(rendered.contains("A Technical Fee of 30,000 USDT (THIRTY THOUSAND USDT) shall be paid. BitMart confirms the wallet addresses as below:"));
    assert!(rendered.contains(&format!("USDT-ERC20: {}\nUSDT-TRC20: {}\nThe Exchange", ETH, TRON)));
    assert!(rendered.contains("| Signed by | Tan Wei Ming |"));
    assert!(!rendered.contains("{{"));
    assert_eq!(
        generator.agreement_file_name(&analysis),
        "ACM-Acme Pte Ltd - Agreement.docx"
    );
}

#[test]
fn waived_fee_removes_clause_and_budget() {
    let email = format!("{}\nThe technical fee is waived for this project.", EMAIL);
    let generator = generator(TemplateKind::CompanyWaive);
    let analysis = generator.analyze_listing(&email, "");
    assert!(!analysis.include_technical_fee);

    let mut doc = TextDocument::parse(AGREEMENT);
    generator.fill_agreement(&mut doc, &analysis);
    let rendered = doc.render();

    assert!(!rendered.contains("A Technical Fee"));
    assert!(!rendered.contains("USDT-ERC20"));
    assert!(!rendered.contains("with a budget of"));
    assert!(rendered.contains("promotional events in communities. The Developer agrees"));
    assert!(rendered.contains("IV. Signatures"));
}

#[test]
fn separate_wallet_text_takes_priority() {
    let analysis = generator(TemplateKind::Company)
        .analyze_listing(EMAIL, &format!("Solana: {}", SOL));
    assert_eq!(analysis.wallets.solana, SOL);
    assert!(analysis.wallets.erc20.is_empty());
    assert_eq!(analysis.wallet_text, format!("USDT/USDC-Solana: {}", SOL));
}

#[test]
fn tron_and_unlabeled_solana() {
    let wallets = WalletExtractor::extract(&format!("USDT-TRC20: {}\n{}", TRON, SOL));
    assert_eq!(wallets.trc20, TRON);
    assert_eq!(wallets.solana, SOL);
}

#[test]
fn technical_fee_defaults() {
    assert!(detect_technical_fee("Listing fee: 30,000 USDT"));
    assert!(!detect_technical_fee("We agreed on no technical fee."));
}

#[test]
fn kyc_text_to_dossier() {
    let text = "\
Account ID: 100200300
姓名: 张三 性别: 女
国家
中国
证件类型
居民身份证
证件号码: 110101199001011234
出生日期: 1990-01-01
证件是否过期: 未过期
提交时间: 2024-05-06 10:11:12
设备ID: ID: ABC-123
认证渠道: Sumsub";
    let generator = DocumentGenerator::new();
    let analysis = generator.analyze_kyc(text);
    let field = |key| analysis.fields.get(&key).map(String::as_str).unwrap_or("");

    assert_eq!(analysis.account_id.as_deref(), Some("100200300"));
    assert_eq!(field(KycField::Name), "张三");
    assert_eq!(field(KycField::Gender), "Female");
    assert_eq!(field(KycField::Country), "中国");
    assert_eq!(field(KycField::IdType), "ID Card");
    assert_eq!(field(KycField::IdNumber), "110101199001011234");
    assert_eq!(field(KycField::Dob), "January 1, 1990");
    assert_eq!(field(KycField::IdExpired), "No");
    assert_eq!(field(KycField::SubmitTime), "2024-05-06 10:11:12");
    assert_eq!(field(KycField::DeviceId), "ABC-123");

    let mut doc = kyc_template();
    generator.fill_kyc(&mut doc, &analysis);
    let rendered = doc.render();
    assert!(rendered.starts_with("Account ID with BitMart: 100200300\n"));
    assert!(rendered.contains("| Gender | Female |"));
    assert!(rendered.contains("| Submit Device ID | ABC-123 |"));
    assert!(!rendered.contains("Sumsub"));
    assert_eq!(generator.kyc_file_name(&analysis), "张三 - KYC.docx");
}

#[test]
fn extraction_never_fails_on_noise() {
    for input in ["", "   \n\t", "-", "：：：", "{{company}}", "名称: \n: value"] {
        let _ = ListingExtractor::extract_fields(input);
        let _ = KycExtractor::extract_fields(input);
        let _ = WalletExtractor::extract(input);
    }
}

#[test]
fn canonical_email_is_stable_under_reextraction() {
    let first = ListingExtractor::extract_fields(EMAIL);
    let rewritten: String = first
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key.form_label(), value))
        .collect();
    let second = ListingExtractor::extract_fields(&rewritten);
    for key in [FieldKey::Company, FieldKey::Token, FieldKey::Listing, FieldKey::Amount] {
        assert_eq!(first.get(&key), second.get(&key), "{:?}", key);
    }
}

#[test]
fn merge_with_plain_mapping() {
    let mut doc = TextDocument::parse("Dear {{ name }},\n| Token | {{token}} |");
    let mapping: MergeMapping = [("name", "Jane"), ("token", "ACM")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    doc.apply(&mapping);
    assert_eq!(doc.render(), "Dear Jane,\n| Token | ACM |\n");
}
