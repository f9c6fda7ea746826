use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit in which the user states the carbon-source concentration.
/// All concentrations are normalized to mM before a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationUnit {
    GramsPerLitre,
    MilliMolar,
    Molar,
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConcentrationUnit::GramsPerLitre => "g/L",
            ConcentrationUnit::MilliMolar => "mM",
            ConcentrationUnit::Molar => "M",
        };
        write!(f, "{}", label)
    }
}

/// Display-only currency for the lab budget. No conversion logic anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    Euro,
    Dollar,
    Yuan,
    Rupee,
    Yen,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Currency::Euro => "EURO",
            Currency::Dollar => "Dollar",
            Currency::Yuan => "Yuan",
            Currency::Rupee => "Rupee",
            Currency::Yen => "Yen",
        };
        write!(f, "{}", label)
    }
}
