// Listing agreement and KYC dossier generator

use clap::{Parser, Subcommand};
use docfill::{
    merge::{kyc_template, mapping_from_json},
    models::{FieldKey, KycAnalysis, KycField, ListingAnalysis},
    utils::DocfillError,
    DocumentGenerator, GeneratorConfig, MergeTarget, TextDocument,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "docfill",
    version,
    about = "Extract listing and KYC fields from pasted text and fill document templates"
)]
struct Cli {
    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a listing email
    Listing {
        /// Pasted email text
        email: PathBuf,
        /// Wallet addresses, when sent separately from the email
        #[arg(long, value_name = "FILE")]
        wallets: Option<PathBuf>,
        /// JSON generator settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Agreement template to fill
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
        /// Where to write the filled agreement (default: suggested file name)
        #[arg(long, value_name = "FILE", requires = "template")]
        output: Option<PathBuf>,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze pasted KYC review text
    Kyc {
        kyc: PathBuf,
        /// KYC dossier template (default: built-in ordered dossier)
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
        /// Write the filled dossier here
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Fill a template with a JSON field mapping
    Merge {
        template: PathBuf,
        fields: PathBuf,
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn read_text(path: &Path) -> Result<String, DocfillError> {
    fs::read_to_string(path).map_err(|e| DocfillError::io(path, e))
}

fn print_listing_report(analysis: &ListingAnalysis, file_name: &str) {
    println!("\n===============================================");
    println!("          LISTING AGREEMENT FIELDS");
    println!("===============================================\n");

    for key in FieldKey::ALL {
        let value = analysis.fields.get(&key).map_or("", String::as_str);
        println!("  {}: {}", key.form_label(), value);
    }

    println!("\nWALLETS:");
    if analysis.wallet_text.is_empty() {
        println!("  (none found)");
    }
    for line in analysis.wallet_text.lines() {
        println!("  {}", line);
    }

    println!(
        "\nTechnical Fee clause: {}",
        if analysis.include_technical_fee { "KEEP" } else { "REMOVE" }
    );
    println!("Suggested file name: {}", file_name);
    if !analysis.recognized {
        println!("\nNo fields were recognized. Please fill them in manually.");
    }
}

fn print_kyc_report(analysis: &KycAnalysis, file_name: &str) {
    println!("\n===============================================");
    println!("                 KYC FIELDS");
    println!("===============================================\n");

    println!(
        "  Account ID with BitMart: {}",
        analysis.account_id.as_deref().unwrap_or("")
    );
    for field in KycField::ALL {
        if let Some(label) = field.display_label() {
            let value = analysis.fields.get(&field).map_or("", String::as_str);
            println!("  {}: {}", label, value);
        }
    }
    println!("\nSuggested file name: {}", file_name);
    if !analysis.recognized {
        println!("\nNo fields were recognized. Please fill them in manually.");
    }
}

fn run_listing(
    email: &Path,
    wallets: Option<&Path>,
    config: Option<&Path>,
    template: Option<&Path>,
    output: Option<&Path>,
    as_json: bool,
) -> Result<(), DocfillError> {
    let generator = DocumentGenerator::with_config(GeneratorConfig::load(config)?);
    let email = read_text(email)?;
    let wallet_text = match wallets {
        Some(path) => read_text(path)?,
        None => String::new(),
    };

    let analysis = generator.analyze_listing(&email, &wallet_text);
    let file_name = generator.agreement_file_name(&analysis);

    if as_json {
        let report = json!({
            "fields": analysis.fields,
            "wallets": analysis.wallets,
            "wallet_text": analysis.wallet_text,
            "include_technical_fee": analysis.include_technical_fee,
            "recognized": analysis.recognized,
            "template": generator.config().template.file_name(),
            "file_name": file_name,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(DocfillError::Report)?
        );
    } else {
        print_listing_report(&analysis, &file_name);
    }

    if let Some(template) = template {
        let mut doc = TextDocument::from_file(template)?;
        generator.fill_agreement(&mut doc, &analysis);
        let target = output.map_or_else(|| PathBuf::from(&file_name), Path::to_path_buf);
        doc.save(&target)?;
        log::info!("Agreement written to {}", target.display());
    }
    Ok(())
}

fn run_kyc(
    kyc: &Path,
    template: Option<&Path>,
    output: Option<&Path>,
    as_json: bool,
) -> Result<(), DocfillError> {
    let generator = DocumentGenerator::new();
    let analysis = generator.analyze_kyc(&read_text(kyc)?);
    let file_name = generator.kyc_file_name(&analysis);

    if as_json {
        let report = json!({
            "fields": analysis.fields,
            "account_id": analysis.account_id,
            "recognized": analysis.recognized,
            "file_name": file_name,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(DocfillError::Report)?
        );
    } else {
        print_kyc_report(&analysis, &file_name);
    }

    if template.is_some() || output.is_some() {
        let mut doc = match template {
            Some(path) => TextDocument::from_file(path)?,
            None => kyc_template(),
        };
        generator.fill_kyc(&mut doc, &analysis);
        let target = output.map_or_else(|| PathBuf::from(&file_name), Path::to_path_buf);
        doc.save(&target)?;
        log::info!("KYC dossier written to {}", target.display());
    }
    Ok(())
}

fn run_merge(template: &Path, fields: &Path, output: Option<&Path>) -> Result<(), DocfillError> {
    let mapping = mapping_from_json(&read_text(fields)?)?;
    let mut doc = TextDocument::from_file(template)?;
    doc.apply(&mapping);
    match output {
        Some(path) => doc.save(path)?,
        None => print!("{}", doc.render()),
    }
    Ok(())
}

fn main() -> Result<(), DocfillError> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Command::Listing {
            email,
            wallets,
            config,
            template,
            output,
            json,
        } => run_listing(
            &email,
            wallets.as_deref(),
            config.as_deref(),
            template.as_deref(),
            output.as_deref(),
            json,
        ),
        Command::Kyc {
            kyc,
            template,
            output,
            json,
        } => run_kyc(&kyc, template.as_deref(), output.as_deref(), json),
        Command::Merge {
            template,
            fields,
            output,
        } => run_merge(&template, &fields, output.as_deref()),
    }
}
