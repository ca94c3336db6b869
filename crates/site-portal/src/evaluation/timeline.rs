use super::inputs::{
    AirPermitPathway, AirQualityZone, PermitType, PhaseIStatus, PoliticalClimate, SiteInputs,
    WaterSource, Zoning,
};
use serde::Serialize;

const BASE_MONTHS: u32 = 8;
const MIN_MONTHS: u32 = 6;
const MAX_MONTHS: u32 = 30;

/// Months from site control to a de-risked, marketable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub low: u32,
    pub high: u32,
    pub base: u32,
}

impl Timeline {
    pub fn years(&self) -> f64 {
        f64::from(self.high) / 12.0
    }
}

/// Base schedule plus the delay each adverse finding adds.
///
/// The band opens two months before the expected schedule and closes on it,
/// bounded to `[6, 30]` months.
pub(crate) fn estimate_timeline(inputs: &SiteInputs) -> Timeline {
    let mut months = BASE_MONTHS;

    if inputs.pipeline_distance > 3.0 {
        months += 2;
    }
    if inputs.phase_i_status == Some(PhaseIStatus::Flagged) {
        months += 3;
    }
    if inputs.water_source == Some(WaterSource::Contested) {
        months += 2;
    }
    if inputs.air_quality_zone == Some(AirQualityZone::NonAttainment) {
        months += 3;
    }
    if inputs.air_permit_pathway == Some(AirPermitPathway::NotIdentified) {
        months += 2;
    }
    months += match inputs.permit_type {
        Some(PermitType::Psd) => 4,
        Some(PermitType::Major) => 2,
        _ => 0,
    };
    months += match inputs.political_climate {
        Some(PoliticalClimate::Hostile) => 4,
        Some(PoliticalClimate::Unknown) => 1,
        _ => 0,
    };
    months += match inputs.zoning {
        Some(Zoning::RezoningNeeded) => 4,
        Some(Zoning::VarianceNeeded) => 2,
        _ => 0,
    };

    let base = months.min(MAX_MONTHS);
    Timeline {
        low: base.saturating_sub(2).max(MIN_MONTHS),
        high: base,
        base,
    }
}
