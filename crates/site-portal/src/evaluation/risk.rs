use super::inputs::{
    AirPermitPathway, AirQualityZone, CommunityOpposition, CompetingSites, FiberType, Flag,
    GridQueue, LaborMarket, PhaseIStatus, PoliticalClimate, SiteInputs, TitleComplexity,
    WaterSource, Zoning,
};
use serde::Serialize;

/// Highest score still considered low risk.
const LOW_RISK_CEILING: u32 = 5;
/// Highest score still considered medium risk.
const MEDIUM_RISK_CEILING: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn from_score(score: u32) -> Self {
        if score <= LOW_RISK_CEILING {
            Self::Low
        } else if score <= MEDIUM_RISK_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Site attributes that can add weight to the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    PipelineDistance,
    PhaseI,
    WaterSource,
    AirQuality,
    AirPermitPathway,
    PoliticalClimate,
    Zoning,
    FloodZone,
    CommunityOpposition,
    Fiber,
    TitleComplexity,
    AdjacentConflict,
    EminentDomain,
    CompetingSites,
    GridQueue,
    LaborMarket,
}

/// One adverse condition and the weight it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub factor: RiskFactorKind,
    pub weight: u32,
    pub notes: String,
}

#[derive(Default)]
struct Tally {
    score: u32,
    factors: Vec<RiskFactor>,
}

impl Tally {
    fn add(&mut self, factor: RiskFactorKind, weight: u32, notes: impl Into<String>) {
        self.score += weight;
        self.factors.push(RiskFactor {
            factor,
            weight,
            notes: notes.into(),
        });
    }
}

/// Sum the fixed weights of every adverse condition present on the site.
pub(crate) fn score_risk(inputs: &SiteInputs) -> (u32, Vec<RiskFactor>) {
    let mut tally = Tally::default();

    let distance = inputs.pipeline_distance;
    if distance > 5.0 {
        tally.add(
            RiskFactorKind::PipelineDistance,
            2,
            format!("pipeline {distance:.1} mi away exceeds 5 mi"),
        );
    } else if distance > 3.0 {
        tally.add(
            RiskFactorKind::PipelineDistance,
            1,
            format!("pipeline {distance:.1} mi away exceeds 3 mi"),
        );
    }

    if inputs.phase_i_status == Some(PhaseIStatus::Flagged) {
        tally.add(RiskFactorKind::PhaseI, 3, "Phase I ESA flagged recognized conditions");
    }

    match inputs.water_source {
        Some(WaterSource::Contested) => {
            tally.add(RiskFactorKind::WaterSource, 2, "water rights contested")
        }
        Some(WaterSource::None) => tally.add(RiskFactorKind::WaterSource, 3, "no water source"),
        _ => {}
    }

    match inputs.air_quality_zone {
        Some(AirQualityZone::NonAttainment) => {
            tally.add(RiskFactorKind::AirQuality, 3, "non-attainment air quality zone")
        }
        Some(AirQualityZone::Marginal) => {
            tally.add(RiskFactorKind::AirQuality, 1, "marginal air quality zone")
        }
        _ => {}
    }

    match inputs.air_permit_pathway {
        Some(AirPermitPathway::NotIdentified) => tally.add(
            RiskFactorKind::AirPermitPathway,
            2,
            "no air permit pathway identified",
        ),
        Some(AirPermitPathway::Denied) => {
            tally.add(RiskFactorKind::AirPermitPathway, 4, "air permit denied")
        }
        _ => {}
    }

    match inputs.political_climate {
        Some(PoliticalClimate::Hostile) => {
            tally.add(RiskFactorKind::PoliticalClimate, 4, "hostile local politics")
        }
        Some(PoliticalClimate::Unknown) => {
            tally.add(RiskFactorKind::PoliticalClimate, 1, "political climate unknown")
        }
        _ => {}
    }

    match inputs.zoning {
        Some(Zoning::RezoningNeeded) => tally.add(RiskFactorKind::Zoning, 3, "rezoning required"),
        Some(Zoning::VarianceNeeded) => tally.add(RiskFactorKind::Zoning, 2, "variance required"),
        _ => {}
    }

    if inputs.flood_zone == Some(Flag::Yes) {
        tally.add(RiskFactorKind::FloodZone, 2, "parcel sits in a flood zone");
    }

    match inputs.community_opposition {
        Some(CommunityOpposition::Organized) => tally.add(
            RiskFactorKind::CommunityOpposition,
            2,
            "organized community opposition",
        ),
        Some(CommunityOpposition::Some) => tally.add(
            RiskFactorKind::CommunityOpposition,
            1,
            "some community opposition",
        ),
        _ => {}
    }

    if inputs.fiber_type == Some(FiberType::None) {
        tally.add(RiskFactorKind::Fiber, 2, "no fiber at the site");
    }

    if inputs.title_complexity == Some(TitleComplexity::Complex) {
        tally.add(RiskFactorKind::TitleComplexity, 3, "complex title");
    }

    if inputs.adjacent_conflict == Some(Flag::Yes) {
        tally.add(RiskFactorKind::AdjacentConflict, 2, "conflicting adjacent land use");
    }

    if inputs.eminent_domain_risk == Some(Flag::Yes) {
        tally.add(RiskFactorKind::EminentDomain, 3, "eminent domain exposure");
    }

    if inputs.competing_sites == Some(CompetingSites::Many) {
        tally.add(RiskFactorKind::CompetingSites, 2, "many competing sites");
    }

    if inputs.grid_queue == Some(GridQueue::Congested) {
        tally.add(RiskFactorKind::GridQueue, 2, "congested interconnection queue");
    }

    if inputs.labor_market == Some(LaborMarket::Tight) {
        tally.add(RiskFactorKind::LaborMarket, 1, "tight construction labor market");
    }

    (tally.score, tally.factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands_split_at_five_and_twelve() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(12), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(13), RiskLevel::High);
    }

    #[test]
    fn pipeline_distance_tiers() {
        let near = SiteInputs {
            pipeline_distance: 3.0,
            ..SiteInputs::default()
        };
        let mid = SiteInputs {
            pipeline_distance: 4.0,
            ..SiteInputs::default()
        };
        let far = SiteInputs {
            pipeline_distance: 5.5,
            ..SiteInputs::default()
        };

        assert_eq!(score_risk(&near).0, 0);
        assert_eq!(score_risk(&mid).0, 1);
        assert_eq!(score_risk(&far).0, 2);
    }

    #[test]
    fn every_factor_is_reported_with_its_weight() {
        let inputs = SiteInputs {
            water_source: Some(WaterSource::None),
            air_permit_pathway: Some(AirPermitPathway::Denied),
            eminent_domain_risk: Some(Flag::Yes),
            ..SiteInputs::default()
        };

        let (score, factors) = score_risk(&inputs);

        assert_eq!(score, 10);
        assert_eq!(factors.len(), 3);
        assert_eq!(factors.iter().map(|factor| factor.weight).sum::<u32>(), score);
        assert!(factors
            .iter()
            .any(|factor| factor.factor == RiskFactorKind::AirPermitPathway && factor.weight == 4));
    }

    #[test]
    fn worst_case_site_scores_high() {
        let inputs = SiteInputs {
            pipeline_distance: 10.0,
            phase_i_status: Some(PhaseIStatus::Flagged),
            water_source: Some(WaterSource::None),
            air_quality_zone: Some(AirQualityZone::NonAttainment),
            air_permit_pathway: Some(AirPermitPathway::Denied),
            political_climate: Some(PoliticalClimate::Hostile),
            zoning: Some(Zoning::RezoningNeeded),
            flood_zone: Some(Flag::Yes),
            community_opposition: Some(CommunityOpposition::Organized),
            fiber_type: Some(FiberType::None),
            title_complexity: Some(TitleComplexity::Complex),
            adjacent_conflict: Some(Flag::Yes),
            eminent_domain_risk: Some(Flag::Yes),
            competing_sites: Some(CompetingSites::Many),
            grid_queue: Some(GridQueue::Congested),
            labor_market: Some(LaborMarket::Tight),
            ..SiteInputs::default()
        };

        let (score, factors) = score_risk(&inputs);

        assert_eq!(score, 41);
        assert_eq!(factors.len(), 16);
        assert_eq!(RiskLevel::from_score(score), RiskLevel::High);
    }
}
