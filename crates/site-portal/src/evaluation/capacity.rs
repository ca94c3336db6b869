use super::inputs::SiteInputs;

/// Daily gas volume (MCFD) that supports one MW before the pressure bonus.
const MCFD_PER_MW: f64 = 192.0;

/// Conversion efficiency bonus granted by pipeline pressure.
pub(crate) fn pressure_multiplier(gas_pressure: f64) -> f64 {
    if gas_pressure > 500.0 {
        10.0 / 7.0
    } else if gas_pressure > 300.0 {
        10.0 / 8.5
    } else {
        1.0
    }
}

/// Estimated generating capacity in whole MW.
pub(crate) fn estimate_mw(inputs: &SiteInputs) -> f64 {
    if inputs.gas_volume <= 0.0 {
        return 0.0;
    }

    (inputs.gas_volume / MCFD_PER_MW * pressure_multiplier(inputs.gas_pressure)).round()
}
