use anyhow::{Context, Result};
use diglab_schemas::settings::FermentationType;
use diglab_schemas::units::{ConcentrationUnit, Currency};
use serde::Deserialize;
use std::{fs, path::Path};

/// Batch shake-flask parameters as entered by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchParameters {
    /// Comma-separated integer temperatures, e.g. `"25,30,37"`.
    pub temperatures: String,
    pub init_biomass: f64,
    pub medium_volume_ml: u32,
    pub cultivation_time_h: u32,
    pub sampling_interval_h: f64,
}

/// The carbon-source selection: a free-text filter against the model's
/// metabolite index, an optional explicit pick, and the stated concentration.
#[derive(Debug, Clone, Deserialize)]
pub struct CarbonSourceRequest {
    pub filter: String,
    /// Metabolite id to pick out of the filtered candidates; the first
    /// candidate is taken when absent.
    pub choice: Option<String>,
    pub concentration: f64,
    pub unit: ConcentrationUnit,
}

/// One complete scripted session, loaded from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    /// Canonical organism name, e.g. `E.coli-core`.
    pub organism: String,
    /// Random seed; defaults to the session date stamp when absent.
    pub seed: Option<u64>,
    pub currency: Currency,
    pub lab_investment: u64,
    pub total_budget: u64,
    pub experiment_id: String,
    /// Only `batch` is runnable; `select` is the front end's placeholder.
    #[serde(default = "default_fermentation")]
    pub fermentation: FermentationType,
    pub batch: BatchParameters,
    pub carbon_source: CarbonSourceRequest,
}

fn default_fermentation() -> FermentationType {
    FermentationType::Select
}

impl RunRequest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read run request {:?}", path))?;
        let request: RunRequest = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse run request {:?}", path))?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_from_yaml() {
        let yaml = r#"
organism: E.coli-core
seed: 240101
currency: euro
lab_investment: 5000
total_budget: 100000
experiment_id: Batch_v1
batch:
  temperatures: "25,30,37"
  init_biomass: 0.1
  medium_volume_ml: 100
  cultivation_time_h: 24
  sampling_interval_h: 1.0
carbon_source:
  filter: glc
  concentration: 1.0
  unit: grams_per_litre
"#;
        let request: RunRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.organism, "E.coli-core");
        assert_eq!(request.fermentation, FermentationType::Select);
        assert_eq!(request.seed, Some(240101));
        assert_eq!(request.currency, Currency::Euro);
        assert_eq!(request.batch.temperatures, "25,30,37");
        assert_eq!(request.carbon_source.unit, ConcentrationUnit::GramsPerLitre);
        assert!(request.carbon_source.choice.is_none());
    }
}
