//! Built-in host catalog for the closed organism set. Each entry bundles the
//! strain's temperature tolerance, growth profile, and a reduced exchange
//! model with uptake kinetics for the common carbon sources.

use crate::host::{metabolism::Metabolism, Host};
use diglab_schemas::{
    model::{ExchangeReaction, Metabolite, MetabolicModel, UptakeKinetics},
    organism::{GrowthProfile, HostDefinition, Organism, TemperatureTolerance, ToleranceRange},
};

/// The catalog definition for one organism.
struct CatalogEntry {
    model_id: &'static str,
    optimal_temp: f64,
    temp_range: (f64, f64),
    max_growth_rate_per_hr: f64,
    od2x: f64,
    /// Glucose biomass yield, gCDW/mmol. Yeast respiro-fermentative growth is
    /// slightly less efficient than E. coli aerobic growth on glucose.
    glucose_yield: f64,
}

fn entry(organism: Organism) -> CatalogEntry {
    match organism {
        Organism::EColiCore => CatalogEntry {
            model_id: "e_coli_core",
            optimal_temp: 37.0,
            temp_range: (15.0, 45.0),
            max_growth_rate_per_hr: 0.90,
            od2x: 0.33,
            glucose_yield: 0.090,
        },
        Organism::EColi => CatalogEntry {
            model_id: "iML1515",
            optimal_temp: 37.0,
            temp_range: (15.0, 45.0),
            max_growth_rate_per_hr: 0.95,
            od2x: 0.33,
            glucose_yield: 0.095,
        },
        Organism::SCerevisiae => CatalogEntry {
            model_id: "iMM904",
            optimal_temp: 30.0,
            temp_range: (10.0, 40.0),
            max_growth_rate_per_hr: 0.45,
            od2x: 0.50,
            glucose_yield: 0.080,
        },
        Organism::BSubtilis => CatalogEntry {
            model_id: "iYO844",
            optimal_temp: 37.0,
            temp_range: (12.0, 50.0),
            max_growth_rate_per_hr: 0.70,
            od2x: 0.35,
            glucose_yield: 0.085,
        },
    }
}

/// The reduced exchange model shipped for an organism.
pub fn model_for(organism: Organism) -> MetabolicModel {
    let entry = entry(organism);
    MetabolicModel {
        id: entry.model_id.to_string(),
        metabolites: vec![
            Metabolite {
                id: "glc__D_e".to_string(),
                name: "D-Glucose".to_string(),
                formula_weight: 180.16,
            },
            Metabolite {
                id: "ac_e".to_string(),
                name: "Acetate".to_string(),
                formula_weight: 60.05,
            },
            Metabolite {
                id: "lac__D_e".to_string(),
                name: "D-Lactate".to_string(),
                formula_weight: 90.08,
            },
            Metabolite {
                id: "o2_e".to_string(),
                name: "O2".to_string(),
                formula_weight: 32.00,
            },
            Metabolite {
                id: "nh4_e".to_string(),
                name: "Ammonium".to_string(),
                formula_weight: 18.04,
            },
        ],
        exchanges: vec![
            ExchangeReaction {
                id: "EX_glc__D_e".to_string(),
                reaction: "glc__D_e <=>".to_string(),
                lower_bound: -10.0,
                upper_bound: 1000.0,
                kinetics: Some(UptakeKinetics {
                    vmax: 10.0,
                    km: 0.5,
                    yield_gdw_per_mmol: entry.glucose_yield,
                }),
            },
            ExchangeReaction {
                id: "EX_ac_e".to_string(),
                reaction: "ac_e <=>".to_string(),
                lower_bound: 0.0,
                upper_bound: 1000.0,
                kinetics: Some(UptakeKinetics {
                    vmax: 6.0,
                    km: 1.0,
                    yield_gdw_per_mmol: entry.glucose_yield * 0.30,
                }),
            },
            ExchangeReaction {
                id: "EX_lac__D_e".to_string(),
                reaction: "lac__D_e <=>".to_string(),
                lower_bound: 0.0,
                upper_bound: 1000.0,
                kinetics: Some(UptakeKinetics {
                    vmax: 8.0,
                    km: 1.0,
                    yield_gdw_per_mmol: entry.glucose_yield * 0.40,
                }),
            },
            ExchangeReaction {
                id: "EX_o2_e".to_string(),
                reaction: "o2_e <=>".to_string(),
                lower_bound: -1000.0,
                upper_bound: 1000.0,
                kinetics: None,
            },
            ExchangeReaction {
                id: "EX_nh4_e".to_string(),
                reaction: "nh4_e <=>".to_string(),
                lower_bound: -1000.0,
                upper_bound: 1000.0,
                kinetics: None,
            },
        ],
        biomass_reaction: format!("BIOMASS_{}", entry.model_id),
    }
}

/// The catalog host definition for an organism.
pub fn definition_for(organism: Organism) -> HostDefinition {
    let entry = entry(organism);
    HostDefinition {
        organism,
        temperature: TemperatureTolerance {
            optimal: entry.optimal_temp,
            range: ToleranceRange {
                min: entry.temp_range.0,
                max: entry.temp_range.1,
            },
        },
        growth: GrowthProfile {
            max_growth_rate_per_hr: entry.max_growth_rate_per_hr,
            od2x: entry.od2x,
        },
    }
}

/// Builds a host for the organism, seeded for deterministic generators.
pub fn create_host(organism: Organism, seed: u64) -> Host {
    let metabolism = Metabolism::new(model_for(organism));
    Host::new(definition_for(organism), metabolism, seed)
}
