//! Translates raw user input into a validated `ExperimentSettings`. Parsing
//! failures come back as typed errors so the caller can keep its previous
//! valid value instead of aborting the workflow.

use crate::error::DigLabError;
use diglab_schemas::{
    model::{ExchangeReaction, Metabolite, MetabolicModel},
    organism::Organism,
    settings::{ExperimentSettings, ExperimentType},
    units::ConcentrationUnit,
};

/// Parses comma-separated integer temperatures, e.g. `"25,30,37"`.
///
/// Whitespace around tokens is ignored and empty tokens are skipped. Any
/// non-integer token fails the whole parse; no partial list is returned.
pub fn parse_temperatures(text: &str) -> Result<Vec<i32>, DigLabError> {
    let mut temperatures = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = token
            .parse::<i32>()
            .map_err(|_| DigLabError::InvalidTemperature(token.to_string()))?;
        temperatures.push(value);
    }
    Ok(temperatures)
}

/// Filters the model's metabolite index by a case-sensitive substring.
///
/// Name matches come first, followed by metabolites matched only by id; a
/// metabolite matching both appears once. An empty result blocks the
/// concentration step.
pub fn filter_carbon_sources<'a>(
    model: &'a MetabolicModel,
    filter: &str,
) -> Result<Vec<&'a Metabolite>, DigLabError> {
    let name_matches = model.query_name(filter);
    let id_matches = model.query_id(filter);

    let mut candidates = name_matches;
    for metabolite in id_matches {
        if !candidates.iter().any(|m| m.id == metabolite.id) {
            candidates.push(metabolite);
        }
    }

    if candidates.is_empty() {
        return Err(DigLabError::EmptyCarbonFilter(filter.to_string()));
    }
    Ok(candidates)
}

/// Locates the exchange reaction whose defining expression references the
/// chosen metabolite. Without one the substrate cannot be fed and the run is
/// blocked.
pub fn resolve_exchange<'a>(
    model: &'a MetabolicModel,
    metabolite: &Metabolite,
) -> Result<&'a ExchangeReaction, DigLabError> {
    model
        .exchange_for(&metabolite.id)
        .ok_or_else(|| DigLabError::NoExchangeReaction(metabolite.name.clone()))
}

/// A fully resolved carbon source, ready for the settings record.
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonSelection {
    pub exchange_id: String,
    pub metabolite_id: String,
    pub name: String,
    pub formula_weight: f64,
}

/// Filters, picks, and resolves a carbon source in one step.
///
/// `choice` selects a metabolite id out of the filtered candidates; `None`
/// takes the first candidate (name matches rank first).
pub fn select_carbon_source(
    model: &MetabolicModel,
    filter: &str,
    choice: Option<&str>,
) -> Result<CarbonSelection, DigLabError> {
    let candidates = filter_carbon_sources(model, filter)?;
    let metabolite = match choice {
        Some(id) => candidates
            .iter()
            .find(|m| m.id == id)
            .copied()
            .ok_or_else(|| DigLabError::SubstrateNotInFilter(id.to_string()))?,
        None => candidates[0],
    };
    let exchange = resolve_exchange(model, metabolite)?;
    Ok(CarbonSelection {
        exchange_id: exchange.id.clone(),
        metabolite_id: metabolite.id.clone(),
        name: metabolite.name.clone(),
        formula_weight: metabolite.formula_weight,
    })
}

/// Converts a stated concentration to mM, then takes the absolute value and
/// rounds to two decimals.
///
/// g/L divides by the substrate's molar mass (g/mmol); M multiplies by 1000.
pub fn convert_concentration(value: f64, unit: ConcentrationUnit, formula_weight: f64) -> f64 {
    let mm = match unit {
        ConcentrationUnit::GramsPerLitre => value / (formula_weight / 1000.0),
        ConcentrationUnit::MilliMolar => value,
        ConcentrationUnit::Molar => value * 1000.0,
    };
    (mm.abs() * 100.0).round() / 100.0
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), DigLabError> {
    if value < min || value > max {
        return Err(DigLabError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// A fluent builder assembling one batch run's `ExperimentSettings`.
///
/// Raw inputs are held as given and validated in `build()`, so a caller can
/// surface an error and retry with its previous valid configuration intact.
pub struct SettingsBuilder {
    host: Organism,
    experiment_id: String,
    temperatures_text: String,
    init_biomass: f64,
    medium_volume_ml: u32,
    cultivation_time_h: u32,
    sampling_interval_h: f64,
    carbon: Option<(CarbonSelection, f64)>,
}

impl SettingsBuilder {
    /// Starts a batch configuration for the given host with the front end's
    /// default widget values.
    pub fn new(host: Organism) -> Self {
        Self {
            host,
            experiment_id: "Batch_v1".to_string(),
            temperatures_text: "30".to_string(),
            init_biomass: 0.1,
            medium_volume_ml: 100,
            cultivation_time_h: 24,
            sampling_interval_h: 1.0,
            carbon: None,
        }
    }

    pub fn with_experiment_id(mut self, id: &str) -> Self {
        self.experiment_id = id.to_string();
        self
    }

    /// Raw comma-separated temperature text; parsed and validated at build.
    pub fn with_temperatures(mut self, text: &str) -> Self {
        self.temperatures_text = text.to_string();
        self
    }

    pub fn with_init_biomass(mut self, od600: f64) -> Self {
        self.init_biomass = od600;
        self
    }

    pub fn with_medium_volume_ml(mut self, ml: u32) -> Self {
        self.medium_volume_ml = ml;
        self
    }

    pub fn with_cultivation_time_h(mut self, hours: u32) -> Self {
        self.cultivation_time_h = hours;
        self
    }

    pub fn with_sampling_interval_h(mut self, hours: f64) -> Self {
        self.sampling_interval_h = hours;
        self
    }

    /// Attaches a resolved carbon source with its concentration in mM.
    pub fn with_carbon_source(mut self, selection: CarbonSelection, conc_mm: f64) -> Self {
        self.carbon = Some((selection, conc_mm));
        self
    }

    /// Validates all fields and assembles the settings record, computing the
    /// sampling vector.
    pub fn build(self) -> Result<ExperimentSettings, DigLabError> {
        let temperatures = parse_temperatures(&self.temperatures_text)?;
        if temperatures.is_empty() {
            return Err(DigLabError::NoTemperatures);
        }
        check_range("init_biomass", self.init_biomass, 0.0, 0.3)?;
        check_range(
            "medium_volume_ml",
            f64::from(self.medium_volume_ml),
            10.0,
            500.0,
        )?;
        check_range(
            "cultivation_time_h",
            f64::from(self.cultivation_time_h),
            1.0,
            48.0,
        )?;
        check_range("sampling_interval_h", self.sampling_interval_h, 0.5, 12.0)?;

        let (carbon_id, carbon_name, carbon_conc_mm) = match self.carbon {
            Some((selection, conc_mm)) => {
                if conc_mm < 0.0 {
                    return Err(DigLabError::OutOfRange {
                        field: "carbon_conc_mm",
                        value: conc_mm,
                        min: 0.0,
                        max: f64::INFINITY,
                    });
                }
                (Some(selection.exchange_id), selection.name, conc_mm)
            }
            None => (None, String::new(), 0.0),
        };

        let mut settings = ExperimentSettings {
            experiment_id: self.experiment_id,
            experiment_type: ExperimentType::Batch,
            host_name: self.host,
            temperatures,
            init_biomass: self.init_biomass,
            medium_volume_ml: self.medium_volume_ml,
            cultivation_time_h: self.cultivation_time_h,
            sampling_interval_h: self.sampling_interval_h,
            sampling_vector: Vec::new(),
            carbon_id,
            carbon_name,
            carbon_conc_mm,
            results: None,
        };
        settings.set_sampling_vector();
        Ok(settings)
    }
}
