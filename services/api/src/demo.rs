use crate::infra::{InMemoryFundSettingsStore, InMemorySiteRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::{json, Value};
use site_portal::config::AppConfig;
use site_portal::error::AppError;
use site_portal::evaluation::{evaluate, EvaluationResult, FundSettings, SiteInputs};
use site_portal::sites::{
    SiteCsvImporter, SitePipelineService, SiteServiceError, SiteSubmission,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON attribute bag, JSON list of sites, or CSV sheet with a `name` column
    #[arg(long)]
    pub(crate) inputs: PathBuf,
    /// JSON fund settings record (defaults to the configured fund)
    #[arg(long)]
    pub(crate) fund: Option<PathBuf>,
    /// Print every contributing risk factor
    #[arg(long)]
    pub(crate) show_factors: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date stamped on pipeline activity (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print every contributing risk factor
    #[arg(long)]
    pub(crate) show_factors: bool,
}

pub(crate) fn run_evaluation_report(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        inputs,
        fund,
        show_factors,
    } = args;

    let fund = match fund {
        Some(path) => load_fund_settings(&path)?,
        None => AppConfig::load()?.fund,
    };
    let sites = load_submissions(&inputs)?;

    if sites.is_empty() {
        println!("No sites found in {}", inputs.display());
        return Ok(());
    }

    for site in &sites {
        let result = evaluate(&site.inputs, &fund);
        render_evaluation(&site.name, &site.location, &result, &fund, show_factors);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        show_factors,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let fund = AppConfig::load()?.fund;
    let repository = Arc::new(InMemorySiteRepository::default());
    let funds = Arc::new(InMemoryFundSettingsStore::new(fund));
    let service = SitePipelineService::new(repository, funds);

    println!("Site pipeline demo ({today})");

    let mut created = Vec::new();
    for submission in demo_submissions() {
        created.push(service.create(submission, today)?);
    }

    // Walk the strongest site through screening and evaluation.
    if let Some(lead) = created.first() {
        service.advance(&lead.id, today)?;
        service.advance(&lead.id, today)?;
    }

    println!("\nPipeline");
    for record in service.list()? {
        println!(
            "- {} [{}] {}",
            record.name,
            record.stage.label(),
            if record.location.is_empty() {
                "location pending"
            } else {
                record.location.as_str()
            }
        );
        for entry in &record.activity {
            println!("    {} {:?}: {}", entry.on, entry.kind, entry.detail);
        }
    }

    let fund = service.fund_settings()?;
    for record in &created {
        let evaluation = service.evaluate_site(&record.id)?;
        render_evaluation(
            &evaluation.name,
            &record.location,
            &evaluation.result,
            &fund,
            show_factors,
        );
    }

    Ok(())
}

fn load_fund_settings(path: &Path) -> Result<FundSettings, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let settings: FundSettings = serde_json::from_str(&raw)?;
    settings.validate().map_err(SiteServiceError::from)?;
    Ok(settings)
}

pub(crate) fn load_submissions(path: &Path) -> Result<Vec<SiteSubmission>, AppError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return SiteCsvImporter::from_path(path).map_err(AppError::from);
    }

    let raw = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&raw)?;
    let fallback_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("site")
        .to_string();

    let is_submission = document.get("inputs").is_some();

    match document {
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(AppError::from))
            .collect(),
        submission if is_submission => Ok(vec![serde_json::from_value(submission)?]),
        bag => Ok(vec![SiteSubmission {
            name: fallback_name,
            location: String::new(),
            inputs: SiteInputs::from_attribute_bag(bag),
        }]),
    }
}

fn demo_submissions() -> Vec<SiteSubmission> {
    let sites = [
        (
            "Brazos Yard",
            "Freeport, TX",
            json!({
                "acreage": "42",
                "askingPrice": "$1,800,000",
                "gasVolume": 14400,
                "gasPressure": 600,
                "pipelineDistance": 1.2,
                "pipelineDiameter": 30,
                "terrain": "moderate",
                "phaseIStatus": "clean",
                "airQualityZone": "attainment",
                "airPermitPathway": "identified",
                "permitType": "minor",
                "politicalClimate": "receptive",
                "zoning": "by-right",
                "fiberType": "lit",
                "waterSource": "available"
            }),
        ),
        (
            "Caddo Works",
            "Shreveport, LA",
            json!({
                "acreage": 18,
                "gasVolume": "9,600",
                "gasPressure": 350,
                "pipelineDistance": 4,
                "pipelineDiameter": 16,
                "terrain": "difficult",
                "existingStructures": "demolish",
                "demoCost": 450000,
                "phaseIStatus": "flagged",
                "airQualityZone": "non-attainment",
                "permitType": "PSD",
                "politicalClimate": "hostile",
                "zoning": "rezoning needed",
                "communityOpposition": "organized",
                "floodZone": "yes"
            }),
        ),
        (
            "Okmulgee Compressor Yard",
            "",
            json!({ "politicalClimate": "unknown" }),
        ),
    ];

    sites
        .into_iter()
        .map(|(name, location, bag)| SiteSubmission {
            name: name.to_string(),
            location: location.to_string(),
            inputs: SiteInputs::from_attribute_bag(bag),
        })
        .collect()
}

pub(crate) fn render_evaluation(
    name: &str,
    location: &str,
    result: &EvaluationResult,
    fund: &FundSettings,
    show_factors: bool,
) {
    if location.is_empty() {
        println!("\n{name}");
    } else {
        println!("\n{name} ({location})");
    }

    println!("Estimated capacity: {:.0} MW", result.estimated_mw);
    println!(
        "Gas infrastructure: tap ${:.0} + lateral ${:.0} + meter ${:.0} = ${:.0}",
        result.tap_cost, result.lateral_cost, result.meter_cost, result.total_gas_cost
    );

    println!("De-risking budget: ${:.0}", result.de_risking_costs.total);
    for (category, amount) in result.de_risking_costs.categories() {
        println!("- {category}: ${amount:.0}");
    }

    println!(
        "Risk: {} ({} points, {} factors)",
        result.risk_level.label(),
        result.risk_score,
        result.risk_factors.len()
    );
    if show_factors {
        for factor in &result.risk_factors {
            println!("- {:?} +{}: {}", factor.factor, factor.weight, factor.notes);
        }
    }

    println!(
        "Timeline: {}-{} months (base {}, {:.1} years)",
        result.timeline.low,
        result.timeline.high,
        result.timeline.base,
        result.timeline.years()
    );

    let returns = &result.fund_returns;
    println!(
        "Exit: {:.0} MW basis, gross ${:.0}",
        returns.mw_basis, returns.gross_exit
    );
    println!(
        "Waterfall: LP pref ${:.0}, LP capital ${:.0}, remaining ${:.0}",
        returns.lp_preferred, returns.lp_first, returns.remaining
    );
    println!(
        "Split: LP ${:.0} / GP ${:.0} | total LP ${:.0} ({:.2}x)",
        returns.lp_share, returns.gp_share, returns.total_lp, returns.lp_multiple
    );
    println!("{}", fund_fee_line(fund));
}

fn fund_fee_line(fund: &FundSettings) -> String {
    format!(
        "Fund: ${:.0} committed, ${:.0} annual management fee, ${:.0} commitment fee",
        fund.fund_size,
        fund.annual_management_fee(),
        fund.commitment_fee_for(fund.fund_size)
    )
}
