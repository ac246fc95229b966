//! First-order separation kinetics of a single unit.

use crate::config::SimulationConfig;

/// Smallest total mass flow used when computing residence time.
pub const MIN_MASS_FLOW: f64 = 1e-10;

/// Residence time of material in a unit receiving `flow_g + flow_w` kg/s.
///
/// `tau = phi * V / (F / rho)`, with `F` floored at [`MIN_MASS_FLOW`].
pub fn residence_time(config: &SimulationConfig, flow_g: f64, flow_w: f64) -> f64 {
    let total_mass_flow = (flow_g + flow_w).max(MIN_MASS_FLOW);
    let volumetric_flow = total_mass_flow / config.density;
    config.solids_fraction * config.volume / volumetric_flow
}

/// Fraction of each material reporting to the concentrate and intermediate
/// streams. The remainder goes to tailings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryFractions {
    pub conc_gerardium: f64,
    pub conc_waste: f64,
    pub inter_gerardium: f64,
    pub inter_waste: f64,
}

pub fn recovery_fractions(config: &SimulationConfig, tau: f64) -> RecoveryFractions {
    let gerardium_denom = 1.0 + (config.k_conc_gerardium + config.k_inter_gerardium) * tau;
    let waste_denom = 1.0 + (config.k_conc_waste + config.k_inter_waste) * tau;

    RecoveryFractions {
        conc_gerardium: (config.k_conc_gerardium * tau) / gerardium_denom,
        conc_waste: (config.k_conc_waste * tau) / waste_denom,
        inter_gerardium: (config.k_inter_gerardium * tau) / gerardium_denom,
        inter_waste: (config.k_inter_waste * tau) / waste_denom,
    }
}

/// A unit's feed split into its six product flows (kg/s).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreamFlows {
    pub conc_g: f64,
    pub conc_w: f64,
    pub inter_g: f64,
    pub inter_w: f64,
    pub tails_g: f64,
    pub tails_w: f64,
}

pub fn split_flows(recovery: &RecoveryFractions, flow_g: f64, flow_w: f64) -> StreamFlows {
    let conc_g = flow_g * recovery.conc_gerardium;
    let conc_w = flow_w * recovery.conc_waste;
    let inter_g = flow_g * recovery.inter_gerardium;
    let inter_w = flow_w * recovery.inter_waste;

    StreamFlows {
        conc_g,
        conc_w,
        inter_g,
        inter_w,
        tails_g: flow_g - conc_g - inter_g,
        tails_w: flow_w - conc_w - inter_w,
    }
}

/// Residence time, recoveries and split for one unit in a single step.
pub fn unit_streams(config: &SimulationConfig, flow_g: f64, flow_w: f64) -> StreamFlows {
    let tau = residence_time(config, flow_g, flow_w);
    let recovery = recovery_fractions(config, tau);
    split_flows(&recovery, flow_g, flow_w)
}

/// Economic value of a concentrate stream.
pub fn performance(config: &SimulationConfig, conc_g: f64, conc_w: f64) -> f64 {
    conc_g * config.price + conc_w * config.penalty
}
