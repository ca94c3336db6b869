use super::inputs::{
    CommunityOpposition, PermitType, PhaseIStatus, PoliticalClimate, SiteInputs, Terrain,
};
use serde::Serialize;

const METER_COST: f64 = 150_000.0;

/// Placeholder fiber budget; the evaluation form never captures a fiber run length.
const FIBER_ALLOWANCE: f64 = 2_000.0;
const ENGINEERING_COST: f64 = 50_000.0;
const EXIT_COSTS: f64 = 50_000.0;

/// Cost of bringing pipeline gas onto the site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GasInfrastructureCost {
    pub tap: f64,
    pub lateral: f64,
    pub meter: f64,
}

impl GasInfrastructureCost {
    pub fn total(&self) -> f64 {
        self.tap + self.lateral + self.meter
    }
}

/// Hot-tap cost steps by pipeline diameter in inches.
pub(crate) fn tap_cost(pipeline_diameter: f64) -> f64 {
    if pipeline_diameter >= 36.0 {
        650_000.0
    } else if pipeline_diameter >= 24.0 {
        500_000.0
    } else if pipeline_diameter >= 16.0 {
        350_000.0
    } else if pipeline_diameter >= 12.0 {
        200_000.0
    } else {
        100_000.0
    }
}

/// Lateral construction cost per mile; unspecified terrain prices as easy.
pub(crate) fn lateral_cost_per_mile(terrain: Option<Terrain>) -> f64 {
    match terrain {
        Some(Terrain::Difficult) => 4_000_000.0,
        Some(Terrain::Moderate) => 2_500_000.0,
        Some(Terrain::Easy) | None => 1_500_000.0,
    }
}

pub(crate) fn gas_infrastructure(inputs: &SiteInputs) -> GasInfrastructureCost {
    GasInfrastructureCost {
        tap: tap_cost(inputs.pipeline_diameter),
        lateral: inputs.pipeline_distance * lateral_cost_per_mile(inputs.terrain),
        meter: METER_COST,
    }
}

/// Budget to retire the major acquisition risks before closing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeRiskingCosts {
    pub site_control: f64,
    pub gas_studies: f64,
    pub enviro: f64,
    pub air_permit: f64,
    pub fiber: f64,
    pub political: f64,
    pub engineering: f64,
    pub demo: f64,
    pub exit_costs: f64,
    pub total: f64,
}

impl DeRiskingCosts {
    /// The nine named categories in display order.
    pub fn categories(&self) -> [(&'static str, f64); 9] {
        [
            ("Site control", self.site_control),
            ("Gas studies", self.gas_studies),
            ("Environmental", self.enviro),
            ("Air permit", self.air_permit),
            ("Fiber", self.fiber),
            ("Political", self.political),
            ("Engineering", self.engineering),
            ("Demolition", self.demo),
            ("Exit costs", self.exit_costs),
        ]
    }
}

pub(crate) fn de_risking(inputs: &SiteInputs, total_gas_cost: f64) -> DeRiskingCosts {
    let site_control = inputs.asking_price * 0.05 + 10_000.0;

    let gas_studies = if total_gas_cost > 0.0 { 75_000.0 } else { 30_000.0 };

    let enviro = match inputs.phase_i_status {
        Some(PhaseIStatus::Flagged) => 120_000.0,
        _ => 50_000.0,
    };

    let air_permit = match inputs.permit_type {
        Some(PermitType::Psd) => 75_000.0,
        Some(PermitType::Major) => 50_000.0,
        _ => 25_000.0,
    };

    let political = if inputs.political_climate == Some(PoliticalClimate::Hostile) {
        25_000.0
    } else if inputs.community_opposition == Some(CommunityOpposition::Organized) {
        20_000.0
    } else {
        10_000.0
    };

    let demo = if inputs.structures_demolished() {
        inputs.demo_cost
    } else {
        0.0
    };

    let mut costs = DeRiskingCosts {
        site_control,
        gas_studies,
        enviro,
        air_permit,
        fiber: FIBER_ALLOWANCE,
        political,
        engineering: ENGINEERING_COST,
        demo,
        exit_costs: EXIT_COSTS,
        total: 0.0,
    };
    costs.total = costs.categories().iter().map(|(_, amount)| amount).sum();
    costs
}
