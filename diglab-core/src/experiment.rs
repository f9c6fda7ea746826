//! The experiment orchestrator. Owns the lab budget and the run history,
//! creates hosts from the catalog, and turns one `ExperimentSettings` into a
//! batch shake-flask simulation result.

use crate::{
    catalog,
    error::DigLabError,
    host::{
        metabolism::{MetabolismEngine, FUNCTIONAL_OBJECTIVE_THRESHOLD},
        Host,
    },
};
use diglab_schemas::{organism::Organism, settings::ExperimentSettings};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Simulated OD600 readings at one cultivation temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSeries {
    pub temperature_c: i32,
    pub od600: Vec<f64>,
}

/// Outcome of one batch run: the FBA-derived scalars plus an OD600 time
/// series per tested temperature, aligned with the sampling vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Specific growth rate from the optimization, per hour.
    pub growth_rate_per_hr: f64,
    /// Substrate uptake, mmol/gCDW/h. Negative exchange flux is consumption.
    pub uptake_rate: f64,
    /// Biomass yield, gCDW/mmol. Zero when nothing is taken up.
    pub yield_gdw_per_mmol: f64,
    /// Biomass the substrate can support, gCDW/L.
    pub biomass_conc_gdw_l: f64,
    /// Total biomass capacity of the flask, gCDW.
    pub capacity_gdw: f64,
    /// Flask capacity expressed as OD600.
    pub capacity_od600: f64,
    /// Sampling time points in hours, copied from the settings.
    pub sampling_hours: Vec<f64>,
    pub series: Vec<TemperatureSeries>,
}

/// One completed run as recorded in the session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub settings: ExperimentSettings,
    pub result: SimulationResult,
}

/// A lab experiment context: seed, budget, and the append-only run history.
#[derive(Debug)]
pub struct Experiment {
    seed: u64,
    total_budget: u64,
    budget: u64,
    history: IndexMap<String, ExperimentRecord>,
}

impl Experiment {
    /// Opens an experiment, debiting the equipment investment from the total
    /// budget up front. Fails if the investment exceeds the budget.
    pub fn new(seed: u64, lab_investment: u64, total_budget: u64) -> Result<Self, DigLabError> {
        if lab_investment > total_budget {
            return Err(DigLabError::InvestmentExceedsBudget {
                investment: lab_investment,
                budget: total_budget,
            });
        }
        Ok(Self {
            seed,
            total_budget,
            budget: total_budget - lab_investment,
            history: IndexMap::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Remaining budget after the equipment debit.
    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn total_budget(&self) -> u64 {
        self.total_budget
    }

    /// Builds a catalog host for the organism, seeded from this experiment.
    /// Identical seeds produce hosts with identical generator sequences.
    pub fn create_host(&self, organism: Organism) -> Host {
        catalog::create_host(organism, self.seed)
    }

    /// Verifies the host's baseline objective before a run. A model whose
    /// pristine optimum is at or below the threshold cannot grow at all and
    /// would only produce flat curves.
    pub fn assert_functional<M: MetabolismEngine>(
        &self,
        host: &Host<M>,
    ) -> Result<f64, DigLabError> {
        let objective = host.metabolism.slim_optimize();
        if objective <= FUNCTIONAL_OBJECTIVE_THRESHOLD {
            return Err(DigLabError::ModelNotFunctional(
                host.metabolism.model().id.clone(),
            ));
        }
        Ok(objective)
    }

    /// Runs one batch shake-flask simulation and appends it to the history.
    ///
    /// Requires a resolved carbon source. Sets the carbon exchange bounds from
    /// the settings, optimizes, derives the yield and capacity scalars, and
    /// simulates an OD600 curve per requested temperature over the sampling
    /// vector.
    pub fn run_batch_simulation<M: MetabolismEngine>(
        &mut self,
        host: &mut Host<M>,
        settings: &ExperimentSettings,
    ) -> Result<SimulationResult, DigLabError> {
        let carbon_id = settings
            .carbon_id
            .as_deref()
            .ok_or(DigLabError::CarbonSourceUnresolved)?;

        self.assert_functional(host)?;

        let mut concentrations = HashMap::new();
        concentrations.insert(carbon_id.to_string(), settings.carbon_conc_mm);
        host.metabolism.set_reset_carbon_exchanges(&concentrations);

        let (growth_rate, exchange_rates) = host.metabolism.optimize_report_exchanges();
        let uptake_rate = -exchange_rates.get(carbon_id).copied().unwrap_or(0.0);
        // Zero uptake means no growth, not an error.
        let yield_gdw_per_mmol = if uptake_rate != 0.0 {
            round2(growth_rate / uptake_rate)
        } else {
            0.0
        };

        let biomass_conc_gdw_l = yield_gdw_per_mmol * settings.carbon_conc_mm;
        let capacity_gdw = biomass_conc_gdw_l * (f64::from(settings.medium_volume_ml) / 1000.0);
        let capacity_od600 = if host.growth.od2x > 0.0 {
            capacity_gdw / host.growth.od2x
        } else {
            0.0
        };

        let series = self.simulate_temperature_growth(host, settings, growth_rate, capacity_od600);

        let result = SimulationResult {
            growth_rate_per_hr: growth_rate,
            uptake_rate,
            yield_gdw_per_mmol,
            biomass_conc_gdw_l,
            capacity_gdw,
            capacity_od600,
            sampling_hours: settings.sampling_vector.clone(),
            series,
        };

        self.record_experiment(settings.clone(), result.clone())?;
        Ok(result)
    }

    /// Logistic OD600 curves toward the flask capacity, one per temperature.
    ///
    /// The growth rate is damped by a temperature stress ramp (linear toward
    /// the tolerance edges, floored outside the viable range) and each reading
    /// carries a small deterministic measurement jitter from the host's
    /// generator.
    fn simulate_temperature_growth<M: MetabolismEngine>(
        &self,
        host: &Host<M>,
        settings: &ExperimentSettings,
        growth_rate: f64,
        capacity_od600: f64,
    ) -> Vec<TemperatureSeries> {
        let mut rng = host.make_generator();
        let od0 = settings.init_biomass;
        // Carrying capacity: the inoculum plus what the substrate supports.
        let k = od0 + capacity_od600.max(0.0);

        let mut series = Vec::with_capacity(settings.temperatures.len());
        for &temperature_c in &settings.temperatures {
            let stress = temperature_stress(host, f64::from(temperature_c));
            let mu = growth_rate.min(host.growth.max_growth_rate_per_hr) * stress;

            let mut od600 = Vec::with_capacity(settings.sampling_vector.len());
            for &t in &settings.sampling_vector {
                let od = if od0 > 0.0 && k > od0 {
                    k / (1.0 + ((k - od0) / od0) * (-mu * t).exp())
                } else {
                    od0
                };
                let jitter = rng.pick_uniform(-0.01, 0.01);
                od600.push((od * (1.0 + jitter)).max(0.0));
            }
            series.push(TemperatureSeries {
                temperature_c,
                od600,
            });
        }
        series
    }

    /// Appends a completed run to the history. Experiment ids are unique
    /// within a session.
    pub fn record_experiment(
        &mut self,
        settings: ExperimentSettings,
        result: SimulationResult,
    ) -> Result<(), DigLabError> {
        let id = settings.experiment_id.clone();
        if self.history.contains_key(&id) {
            return Err(DigLabError::DuplicateExperimentId(id));
        }
        self.history.insert(id, ExperimentRecord { settings, result });
        Ok(())
    }

    /// Insertion-ordered history of completed runs, keyed by experiment id.
    pub fn history(&self) -> &IndexMap<String, ExperimentRecord> {
        &self.history
    }
}

/// Growth damping from cultivation temperature: a linear ramp up to the
/// optimum, a linear ramp down to the upper tolerance, and a residual floor
/// outside the viable range.
fn temperature_stress<M: MetabolismEngine>(host: &Host<M>, temp_c: f64) -> f64 {
    let tolerance = &host.temperature;
    if temp_c < tolerance.range.min || temp_c > tolerance.range.max {
        0.1
    } else if temp_c <= tolerance.optimal {
        0.1 + 0.9 * (temp_c - tolerance.range.min) / (tolerance.optimal - tolerance.range.min)
    } else {
        1.0 - 0.9 * (temp_c - tolerance.optimal) / (tolerance.range.max - tolerance.optimal)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
