//! Defines the per-run experiment configuration record. One instance describes
//! a single batch shake-flask run; the orchestrator treats it as immutable once
//! the run starts and records it verbatim into the experiment history.

use crate::organism::Organism;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of fermentation an `ExperimentSettings` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentType {
    Batch,
    Continuous,
}

/// The fermentation-type selector exposed to the front end. `Select` is the
/// neutral placeholder; only `Batch` is runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FermentationType {
    Select,
    Batch,
    Continuous,
}

/// Complete configuration of one batch shake-flask run.
///
/// Field ranges are enforced by the settings builder in `diglab-core`; the
/// schema itself stays permissive so recorded history can always round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSettings {
    /// User-assigned identifier, unique within a session's history.
    pub experiment_id: String,
    pub experiment_type: ExperimentType,
    pub host_name: Organism,
    /// Temperatures to test, degrees Celsius.
    pub temperatures: Vec<i32>,
    /// OD600 at time zero, range [0.0, 0.3].
    pub init_biomass: f64,
    /// Culture volume in mL, range [10, 500].
    pub medium_volume_ml: u32,
    /// Total cultivation time in hours, range [1, 48].
    pub cultivation_time_h: u32,
    /// Sampling interval in hours, range [0.5, 12.0].
    pub sampling_interval_h: f64,
    /// Sampling time points from 0 to cultivation time, stepped by the
    /// sampling interval. Recomputed whenever time or interval changes.
    pub sampling_vector: Vec<f64>,
    /// Exchange-reaction id of the resolved carbon source.
    pub carbon_id: Option<String>,
    /// Display name of the chosen substrate.
    pub carbon_name: String,
    /// Substrate concentration in mM, after unit conversion. Non-negative.
    pub carbon_conc_mm: f64,
    /// Path of the exported result table, populated after a run.
    pub results: Option<PathBuf>,
}

impl ExperimentSettings {
    /// Recomputes `sampling_vector` from the current cultivation time and
    /// sampling interval. Must be called after either field changes.
    pub fn set_sampling_vector(&mut self) {
        self.sampling_vector.clear();
        if self.sampling_interval_h <= 0.0 {
            return;
        }
        let end = f64::from(self.cultivation_time_h);
        let mut t = 0.0;
        // Half-interval tolerance so the end point survives float stepping.
        while t <= end + self.sampling_interval_h * 1e-9 {
            self.sampling_vector.push(t);
            t += self.sampling_interval_h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_settings() -> ExperimentSettings {
        ExperimentSettings {
            experiment_id: "Batch_v1".to_string(),
            experiment_type: ExperimentType::Batch,
            host_name: Organism::EColiCore,
            temperatures: vec![30],
            init_biomass: 0.1,
            medium_volume_ml: 100,
            cultivation_time_h: 24,
            sampling_interval_h: 1.0,
            sampling_vector: Vec::new(),
            carbon_id: Some("EX_glc__D_e".to_string()),
            carbon_name: "D-Glucose".to_string(),
            carbon_conc_mm: 5.56,
            results: None,
        }
    }

    #[test]
    fn sampling_vector_covers_full_cultivation_time() {
        let mut settings = batch_settings();
        settings.set_sampling_vector();
        assert_eq!(settings.sampling_vector.len(), 25);
        assert_eq!(settings.sampling_vector[0], 0.0);
        assert_eq!(*settings.sampling_vector.last().unwrap(), 24.0);
    }

    #[test]
    fn sampling_vector_with_fractional_interval() {
        let mut settings = batch_settings();
        settings.cultivation_time_h = 6;
        settings.sampling_interval_h = 0.5;
        settings.set_sampling_vector();
        assert_eq!(settings.sampling_vector.len(), 13);
    }

    #[test]
    fn sampling_vector_recomputes_on_change() {
        let mut settings = batch_settings();
        settings.set_sampling_vector();
        settings.cultivation_time_h = 12;
        settings.set_sampling_vector();
        assert_eq!(settings.sampling_vector.len(), 13);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut settings = batch_settings();
        settings.set_sampling_vector();
        let json = serde_json::to_string(&settings).unwrap();
        let back: ExperimentSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
