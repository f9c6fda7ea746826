use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigLabError {
    #[error("'{0}' is not an integer temperature")]
    InvalidTemperature(String),

    #[error("No temperatures given")]
    NoTemperatures,

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("No metabolite matches carbon-source filter '{0}'")]
    EmptyCarbonFilter(String),

    #[error("No exchange reaction found for substrate '{0}'")]
    NoExchangeReaction(String),

    #[error("Substrate '{0}' is not among the filtered carbon-source candidates")]
    SubstrateNotInFilter(String),

    #[error("No carbon source resolved; select a substrate before running")]
    CarbonSourceUnresolved,

    #[error("Model '{0}' is not functional (baseline objective below threshold)")]
    ModelNotFunctional(String),

    #[error("Experiment is not initialized; initialize it first")]
    NotInitialized,

    #[error("Experiment is not configured; set batch parameters first")]
    NotConfigured,

    #[error("Lab investment {investment} exceeds the total budget {budget}")]
    InvestmentExceedsBudget { investment: u64, budget: u64 },

    #[error("Experiment id '{0}' is already recorded in this session")]
    DuplicateExperimentId(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("An error occurred during export: {0}")]
    ExportError(#[from] anyhow::Error),
}
