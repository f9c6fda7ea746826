//! Serializes a simulation result into the downloadable `TemperatureGrowth`
//! table: one `time_h` column and one OD600 column per tested temperature.
//! The table is written as CSV under the conventional result file name;
//! spreadsheet tooling imports it as a single `TemperatureGrowth` sheet.

use crate::{error::DigLabError, experiment::SimulationResult};
use csv::Writer;
use diglab_schemas::organism::Organism;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the exported table.
pub const SHEET_NAME: &str = "TemperatureGrowth";

/// Conventional result file name:
/// `<YYMMDD>_<organism-no-dots>_ODInit<od-dot-as-dash>_ShakeFlask.csv`.
pub fn result_file_name(date_yymmdd: &str, organism: Organism, init_biomass: f64) -> String {
    let od_tag = format!("{}", init_biomass).replace('.', "-");
    format!(
        "{}_{}_ODInit{}_ShakeFlask.csv",
        date_yymmdd,
        organism.file_tag(),
        od_tag
    )
}

pub struct ResultTableWriter {
    writer: Writer<fs::File>,
}

impl ResultTableWriter {
    pub fn create(path: &Path) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    /// Writes the full table and flushes. Rows follow the sampling vector;
    /// series are expected to be aligned with it.
    pub fn write_temperature_growth(
        &mut self,
        result: &SimulationResult,
    ) -> Result<(), anyhow::Error> {
        let mut header = vec!["time_h".to_string()];
        for series in &result.series {
            header.push(format!("od600_{}C", series.temperature_c));
        }
        self.writer.write_record(&header)?;

        for (i, t) in result.sampling_hours.iter().enumerate() {
            let mut row = vec![format!("{:.2}", t)];
            for series in &result.series {
                let od = series.od600.get(i).copied().unwrap_or(0.0);
                row.push(format!("{:.4}", od));
            }
            self.writer.write_record(&row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Convenience wrapper: writes the table to `dir/<conventional name>` and
/// returns the full path.
pub fn export_temperature_growth(
    dir: &Path,
    date_yymmdd: &str,
    organism: Organism,
    init_biomass: f64,
    result: &SimulationResult,
) -> Result<std::path::PathBuf, DigLabError> {
    let path = dir.join(result_file_name(date_yymmdd, organism, init_biomass));
    let mut writer = ResultTableWriter::create(&path)
        .map_err(|e| DigLabError::FileIO(path.display().to_string(), e))?;
    writer.write_temperature_growth(result)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::TemperatureSeries;

    fn sample_result() -> SimulationResult {
        SimulationResult {
            growth_rate_per_hr: 0.82,
            uptake_rate: 9.17,
            yield_gdw_per_mmol: 0.09,
            biomass_conc_gdw_l: 0.5,
            capacity_gdw: 0.05,
            capacity_od600: 0.15,
            sampling_hours: vec![0.0, 1.0, 2.0],
            series: vec![
                TemperatureSeries {
                    temperature_c: 30,
                    od600: vec![0.1, 0.12, 0.14],
                },
                TemperatureSeries {
                    temperature_c: 37,
                    od600: vec![0.1, 0.13, 0.16],
                },
            ],
        }
    }

    #[test]
    fn file_name_follows_the_convention() {
        assert_eq!(
            result_file_name("240101", Organism::EColiCore, 0.1),
            "240101_Ecoli-core_ODInit0-1_ShakeFlask.csv"
        );
        assert_eq!(
            result_file_name("251224", Organism::SCerevisiae, 0.25),
            "251224_Scerevisiae_ODInit0-25_ShakeFlask.csv"
        );
    }

    #[test]
    fn table_has_one_column_per_temperature() {
        let dir = std::env::temp_dir().join("diglab_export_test");
        std::fs::create_dir_all(&dir).unwrap();
        let result = sample_result();

        let path =
            export_temperature_growth(&dir, "240101", Organism::EColiCore, 0.1, &result).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "time_h,od600_30C,od600_37C");
        assert_eq!(lines.next().unwrap(), "0.00,0.1000,0.1000");
        assert_eq!(content.lines().count(), 4);

        std::fs::remove_file(&path).unwrap();
    }
}
