//! Site evaluation engine.
//!
//! Maps a site's raw form inputs and the active fund settings to capacity, cost,
//! risk, schedule, and fund return figures. Evaluation is pure and total: any
//! input, however incomplete, produces a complete result.

mod capacity;
mod costs;
mod fund;
mod inputs;
mod risk;
mod timeline;
mod waterfall;


pub use costs::DeRiskingCosts;
pub use fund::{FundSettings, FundSettingsError};
pub use inputs::{
    AirPermitPathway, AirQualityZone, Categorical, CommunityOpposition, CompetingSites,
    ExistingStructures, FiberType, Flag, GridQueue, LaborMarket, PermitType, PhaseIStatus,
    PoliticalClimate, SiteInputs, Terrain, TitleComplexity, WaterSource, Zoning,
    DEFAULT_EXIT_PRICE_PER_MW,
};
pub use risk::{RiskFactor, RiskFactorKind, RiskLevel};
pub use timeline::Timeline;
pub use waterfall::{FundReturns, FALLBACK_MW};

use serde::Serialize;

/// Derived figures for a site. Recomputed on every read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    #[serde(rename = "estimatedMW")]
    pub estimated_mw: f64,
    pub tap_cost: f64,
    pub lateral_cost: f64,
    pub meter_cost: f64,
    pub total_gas_cost: f64,
    pub de_risking_costs: DeRiskingCosts,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub timeline: Timeline,
    pub fund_returns: FundReturns,
}

/// Evaluate a site against the supplied fund settings.
pub fn evaluate(inputs: &SiteInputs, fund: &FundSettings) -> EvaluationResult {
    let estimated_mw = capacity::estimate_mw(inputs);

    let gas = costs::gas_infrastructure(inputs);
    let total_gas_cost = gas.total();
    let de_risking_costs = costs::de_risking(inputs, total_gas_cost);

    let (risk_score, risk_factors) = risk::score_risk(inputs);
    let timeline = timeline::estimate_timeline(inputs);
    let fund_returns = waterfall::distribute(inputs, fund, estimated_mw, &timeline);

    EvaluationResult {
        estimated_mw,
        tap_cost: gas.tap,
        lateral_cost: gas.lateral,
        meter_cost: gas.meter,
        total_gas_cost,
        de_risking_costs,
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        risk_factors,
        timeline,
        fund_returns,
    }
}
