//! Defines the data structures for representing a host organism in the DigLab
//! catalog: the closed set of supported organisms, their temperature
//! tolerances, and the growth parameters used to interpret simulation output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of host organisms supported by the lab catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organism {
    EColiCore,
    EColi,
    SCerevisiae,
    BSubtilis,
}

impl Organism {
    pub const ALL: [Organism; 4] = [
        Organism::EColiCore,
        Organism::EColi,
        Organism::SCerevisiae,
        Organism::BSubtilis,
    ];

    /// Canonical display name, e.g. `E.coli-core`.
    pub fn name(&self) -> &'static str {
        match self {
            Organism::EColiCore => "E.coli-core",
            Organism::EColi => "E.coli",
            Organism::SCerevisiae => "S.cerevisiae",
            Organism::BSubtilis => "B.subtilis",
        }
    }

    /// Name with dots stripped, used when composing result file names.
    pub fn file_tag(&self) -> String {
        self.name().replace('.', "")
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when an organism name is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrganism(pub String);

impl fmt::Display for UnknownOrganism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported organism '{}'", self.0)
    }
}

impl std::error::Error for UnknownOrganism {}

impl FromStr for Organism {
    type Err = UnknownOrganism;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E.coli-core" => Ok(Organism::EColiCore),
            "E.coli" => Ok(Organism::EColi),
            "S.cerevisiae" => Ok(Organism::SCerevisiae),
            "B.subtilis" => Ok(Organism::BSubtilis),
            other => Err(UnknownOrganism(other.to_string())),
        }
    }
}

/// A generic struct to define a minimum and maximum tolerance range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceRange<T> {
    pub min: T,
    pub max: T,
}

/// Defines the organism's tolerance to temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTolerance {
    /// The optimal temperature for growth, in degrees Celsius.
    pub optimal: f64,
    /// The viable temperature range for the organism.
    pub range: ToleranceRange<f64>,
}

/// Growth parameters used to translate FBA output into culture observables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProfile {
    /// Maximum specific growth rate at optimal conditions, per hour.
    pub max_growth_rate_per_hr: f64,
    /// Conversion factor from biomass concentration (gCDW/L) to OD600.
    pub od2x: f64,
}

/// A complete host definition as shipped by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostDefinition {
    pub organism: Organism,
    pub temperature: TemperatureTolerance,
    pub growth: GrowthProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organism_names_round_trip() {
        for org in Organism::ALL {
            assert_eq!(org.name().parse::<Organism>().unwrap(), org);
        }
    }

    #[test]
    fn unknown_organism_is_rejected() {
        let err = "P.putida".parse::<Organism>().unwrap_err();
        assert_eq!(err, UnknownOrganism("P.putida".to_string()));
    }

    #[test]
    fn file_tag_strips_dots() {
        assert_eq!(Organism::EColiCore.file_tag(), "Ecoli-core");
        assert_eq!(Organism::SCerevisiae.file_tag(), "Scerevisiae");
    }
}
