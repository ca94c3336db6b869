use super::fund::FundSettings;
use super::inputs::SiteInputs;
use super::timeline::Timeline;
use serde::Serialize;

/// Capacity assumed for exit pricing when no gas volume has been captured.
pub const FALLBACK_MW: f64 = 75.0;

/// LP/GP distribution of the projected exit under a simple preferred return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundReturns {
    pub mw_basis: f64,
    pub gross_exit: f64,
    pub lp_preferred: f64,
    pub lp_first: f64,
    pub remaining: f64,
    pub lp_share: f64,
    pub gp_share: f64,
    #[serde(rename = "totalLP")]
    pub total_lp: f64,
    pub lp_multiple: f64,
}

pub(crate) fn distribute(
    inputs: &SiteInputs,
    fund: &FundSettings,
    estimated_mw: f64,
    timeline: &Timeline,
) -> FundReturns {
    let mw_basis = if estimated_mw == 0.0 {
        FALLBACK_MW
    } else {
        estimated_mw
    };

    let salvage = if inputs.structures_usable() {
        inputs.structure_value
    } else {
        0.0
    };
    let gross_exit = mw_basis * inputs.exit_price_per_mw() * 1_000_000.0 + salvage;

    // Preferred return accrues simply, not compounded.
    let lp_preferred = fund.fund_size * fund.pref_return * timeline.years();
    let lp_first = fund.fund_size + lp_preferred;
    let remaining = (gross_exit - lp_first).max(0.0);
    let lp_share = remaining * fund.lp_split;
    let gp_share = remaining * fund.gp_split;
    let total_lp = lp_first + lp_share;
    let lp_multiple = if fund.fund_size == 0.0 {
        0.0
    } else {
        total_lp / fund.fund_size
    };

    FundReturns {
        mw_basis,
        gross_exit,
        lp_preferred,
        lp_first,
        remaining,
        lp_share,
        gp_share,
        total_lp,
        lp_multiple,
    }
}
