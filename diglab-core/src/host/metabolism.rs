//! The metabolism collaborator: an exchange-bound / optimize interface over a
//! reduced GSMM. The bundled implementation is a linear FBA surrogate; the
//! trait exists so the orchestrator can be exercised against a mock solver.

use diglab_schemas::model::MetabolicModel;
use std::collections::HashMap;

/// Objective value below which a model is considered non-functional.
pub const FUNCTIONAL_OBJECTIVE_THRESHOLD: f64 = 1e-6;

/// Capability interface of a metabolism solver.
///
/// Implementations keep two copies of the model: the pristine one answers
/// queries and the baseline check, the working one carries the carbon-exchange
/// bounds of the current run.
pub trait MetabolismEngine {
    /// The pristine model, for metabolite queries and exchange resolution.
    fn model(&self) -> &MetabolicModel;

    /// Resets every carbon exchange of the working model to closed, then opens
    /// the given ones. Keys are exchange-reaction ids, values are substrate
    /// concentrations in mM; the uptake bound is derived from the exchange's
    /// kinetics.
    fn set_reset_carbon_exchanges(&mut self, concentrations: &HashMap<String, f64>);

    /// Baseline objective of the pristine model, used for the functional check.
    fn slim_optimize(&self) -> f64;

    /// Optimizes the working model and reports the growth rate together with
    /// the flux of every carbon exchange (negative flux means uptake).
    fn optimize_report_exchanges(&self) -> (f64, HashMap<String, f64>);
}

/// Linear FBA surrogate over the reduced exchange model.
///
/// Uptake on an open carbon exchange is capped by Monod kinetics,
/// `vmax * c / (km + c)`, and growth is the yield-weighted sum of uptakes.
/// This reproduces the qualitative behavior the orchestrator depends on
/// (bounded uptake, zero growth on closed exchanges) without a solver stack.
pub struct Metabolism {
    model: MetabolicModel,
    model_tmp: MetabolicModel,
}

impl Metabolism {
    pub fn new(model: MetabolicModel) -> Self {
        let model_tmp = model.clone();
        Self { model, model_tmp }
    }

    /// The working model carrying the current run's exchange bounds.
    pub fn working_model(&self) -> &MetabolicModel {
        &self.model_tmp
    }

    fn objective_of(model: &MetabolicModel) -> f64 {
        let mut growth = 0.0;
        for exchange in &model.exchanges {
            if let Some(kinetics) = &exchange.kinetics {
                if exchange.lower_bound < 0.0 {
                    growth += -exchange.lower_bound * kinetics.yield_gdw_per_mmol;
                }
            }
        }
        growth
    }
}

impl MetabolismEngine for Metabolism {
    fn model(&self) -> &MetabolicModel {
        &self.model
    }

    fn set_reset_carbon_exchanges(&mut self, concentrations: &HashMap<String, f64>) {
        self.model_tmp = self.model.clone();
        for exchange in &mut self.model_tmp.exchanges {
            if exchange.kinetics.is_some() {
                exchange.lower_bound = 0.0;
            }
        }
        for (reaction_id, conc_mm) in concentrations {
            if let Some(exchange) = self.model_tmp.exchange_mut(reaction_id) {
                if let Some(kinetics) = &exchange.kinetics {
                    let uptake = if *conc_mm > 0.0 {
                        kinetics.vmax * conc_mm / (kinetics.km + conc_mm)
                    } else {
                        0.0
                    };
                    exchange.lower_bound = -uptake;
                }
            }
        }
    }

    fn slim_optimize(&self) -> f64 {
        Self::objective_of(&self.model)
    }

    fn optimize_report_exchanges(&self) -> (f64, HashMap<String, f64>) {
        let growth = Self::objective_of(&self.model_tmp);
        let mut fluxes = HashMap::new();
        for exchange in &self.model_tmp.exchanges {
            if exchange.kinetics.is_some() {
                // Uptake runs at the bound in the linear surrogate.
                fluxes.insert(exchange.id.clone(), exchange.lower_bound.min(0.0));
            }
        }
        fluxes.insert(self.model_tmp.biomass_reaction.clone(), growth);
        (growth, fluxes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use diglab_schemas::organism::Organism;

    fn glucose_metabolism() -> Metabolism {
        Metabolism::new(catalog::model_for(Organism::EColiCore))
    }

    #[test]
    fn baseline_objective_is_functional() {
        let metabolism = glucose_metabolism();
        assert!(metabolism.slim_optimize() > FUNCTIONAL_OBJECTIVE_THRESHOLD);
    }

    #[test]
    fn set_reset_closes_unlisted_carbon_exchanges() {
        let mut metabolism = glucose_metabolism();
        let mut conc = HashMap::new();
        conc.insert("EX_glc__D_e".to_string(), 5.56);
        metabolism.set_reset_carbon_exchanges(&conc);

        let glc = metabolism.working_model().exchange("EX_glc__D_e").unwrap();
        assert!(glc.lower_bound < 0.0);
        let ac = metabolism.working_model().exchange("EX_ac_e").unwrap();
        assert_eq!(ac.lower_bound, 0.0);
    }

    #[test]
    fn uptake_bound_follows_monod_kinetics() {
        let mut metabolism = glucose_metabolism();
        let kinetics = metabolism
            .model()
            .exchange("EX_glc__D_e")
            .unwrap()
            .kinetics
            .clone()
            .unwrap();

        let mut conc = HashMap::new();
        conc.insert("EX_glc__D_e".to_string(), 5.56);
        metabolism.set_reset_carbon_exchanges(&conc);

        let expected = kinetics.vmax * 5.56 / (kinetics.km + 5.56);
        let glc = metabolism.working_model().exchange("EX_glc__D_e").unwrap();
        assert!((glc.lower_bound + expected).abs() < 1e-12);
    }

    #[test]
    fn optimize_reports_growth_and_uptake() {
        let mut metabolism = glucose_metabolism();
        let mut conc = HashMap::new();
        conc.insert("EX_glc__D_e".to_string(), 5.56);
        metabolism.set_reset_carbon_exchanges(&conc);

        let (growth, fluxes) = metabolism.optimize_report_exchanges();
        assert!(growth > 0.0);
        let uptake = -fluxes["EX_glc__D_e"];
        assert!(uptake > 0.0);
        // Growth equals yield times uptake in the linear surrogate.
        let yield_coeff = growth / uptake;
        assert!(yield_coeff > 0.0 && yield_coeff < 1.0);
    }

    #[test]
    fn closed_exchanges_give_zero_growth() {
        let mut metabolism = glucose_metabolism();
        metabolism.set_reset_carbon_exchanges(&HashMap::new());
        let (growth, fluxes) = metabolism.optimize_report_exchanges();
        assert_eq!(growth, 0.0);
        assert_eq!(fluxes["EX_glc__D_e"], 0.0);
    }

    #[test]
    fn zero_concentration_keeps_exchange_closed() {
        let mut metabolism = glucose_metabolism();
        let mut conc = HashMap::new();
        conc.insert("EX_glc__D_e".to_string(), 0.0);
        metabolism.set_reset_carbon_exchanges(&conc);
        let glc = metabolism.working_model().exchange("EX_glc__D_e").unwrap();
        assert_eq!(glc.lower_bound, 0.0);
    }
}
