//! Defines the schema for a (reduced) genome-scale metabolic model: the
//! metabolite index, the exchange reactions crossing the system boundary, and
//! the uptake kinetics consumed by the FBA surrogate in `diglab-core`.

use serde::{Deserialize, Serialize};

/// A metabolite entry in the model's name/id index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metabolite {
    /// Model identifier, e.g. `glc__D_e`.
    pub id: String,
    /// Human-readable name, e.g. `D-Glucose`.
    pub name: String,
    /// Molar mass in g/mol, used for g/L to mM conversion.
    pub formula_weight: f64,
}

/// Uptake kinetics and biomass yield attached to a carbon exchange reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptakeKinetics {
    /// Maximum uptake rate, mmol/gCDW/h.
    pub vmax: f64,
    /// Half-saturation concentration, mM.
    pub km: f64,
    /// Biomass yield on this substrate, gCDW/mmol.
    pub yield_gdw_per_mmol: f64,
}

/// An exchange reaction across the system boundary. Negative flux is uptake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeReaction {
    /// Reaction identifier, e.g. `EX_glc__D_e`.
    pub id: String,
    /// Defining expression, referencing the exchanged metabolite id,
    /// e.g. `glc__D_e <=>`.
    pub reaction: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Present only on carbon-source exchanges the host can feed on.
    pub kinetics: Option<UptakeKinetics>,
}

impl ExchangeReaction {
    /// Whether the defining expression references the given metabolite.
    pub fn references(&self, metabolite_id: &str) -> bool {
        self.reaction.contains(metabolite_id)
    }
}

/// A reduced GSMM: enough structure to resolve carbon sources and drive the
/// exchange-bound / optimize cycle. Solver internals live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicModel {
    pub id: String,
    pub metabolites: Vec<Metabolite>,
    pub exchanges: Vec<ExchangeReaction>,
    /// Identifier of the biomass (objective) reaction.
    pub biomass_reaction: String,
}

impl MetabolicModel {
    /// Case-sensitive substring query over metabolite names.
    pub fn query_name(&self, filter: &str) -> Vec<&Metabolite> {
        self.metabolites
            .iter()
            .filter(|m| m.name.contains(filter))
            .collect()
    }

    /// Case-sensitive substring query over metabolite ids.
    pub fn query_id(&self, filter: &str) -> Vec<&Metabolite> {
        self.metabolites
            .iter()
            .filter(|m| m.id.contains(filter))
            .collect()
    }

    pub fn metabolite(&self, id: &str) -> Option<&Metabolite> {
        self.metabolites.iter().find(|m| m.id == id)
    }

    /// The exchange reaction whose defining expression references the
    /// metabolite, if any.
    pub fn exchange_for(&self, metabolite_id: &str) -> Option<&ExchangeReaction> {
        self.exchanges.iter().find(|r| r.references(metabolite_id))
    }

    pub fn exchange(&self, reaction_id: &str) -> Option<&ExchangeReaction> {
        self.exchanges.iter().find(|r| r.id == reaction_id)
    }

    pub fn exchange_mut(&mut self, reaction_id: &str) -> Option<&mut ExchangeReaction> {
        self.exchanges.iter_mut().find(|r| r.id == reaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> MetabolicModel {
        MetabolicModel {
            id: "toy_core".to_string(),
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
            ],
            exchanges: vec![ExchangeReaction {
                id: "EX_glc__D_e".to_string(),
                reaction: "glc__D_e <=>".to_string(),
                lower_bound: -10.0,
                upper_bound: 1000.0,
                kinetics: None,
            }],
            biomass_reaction: "BIOMASS_core".to_string(),
        }
    }

    #[test]
    fn name_query_is_case_sensitive_substring() {
        let model = toy_model();
        assert_eq!(model.query_name("Gluc").len(), 1);
        assert!(model.query_name("gluc").is_empty());
    }

    #[test]
    fn exchange_lookup_by_metabolite_reference() {
        let model = toy_model();
        assert_eq!(model.exchange_for("glc__D_e").unwrap().id, "EX_glc__D_e");
        assert!(model.exchange_for("ac_e").is_none());
    }
}
