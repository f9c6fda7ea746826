//! Single-user session state. Owns the experiment context, host, and current
//! settings behind an explicit lifecycle instead of ambient globals; every
//! transition is user-triggered and reset discards everything unconditionally.

use crate::{
    error::DigLabError,
    experiment::{Experiment, SimulationResult},
    host::Host,
};
use diglab_schemas::{organism::Organism, settings::ExperimentSettings, units::Currency};

/// Where the session stands in the setup-configure-run workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initialized,
    Configured,
    RanOnce,
}

pub struct Session {
    phase: SessionPhase,
    /// Session date stamp, `%y%m%d`, used in result file names.
    date: String,
    currency: Option<Currency>,
    organism: Option<Organism>,
    experiment: Option<Experiment>,
    host: Option<Host>,
    settings: Option<ExperimentSettings>,
}

impl Session {
    pub fn new(date_yymmdd: &str) -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            date: date_yymmdd.to_string(),
            currency: None,
            organism: None,
            experiment: None,
            host: None,
            settings: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn organism(&self) -> Option<Organism> {
        self.organism
    }

    /// Creates the experiment context and host. Replaces any previous context
    /// and establishes a fresh, empty history.
    pub fn initialize(
        &mut self,
        organism: Organism,
        seed: u64,
        lab_investment: u64,
        total_budget: u64,
        currency: Currency,
    ) -> Result<(), DigLabError> {
        let experiment = Experiment::new(seed, lab_investment, total_budget)?;
        let host = experiment.create_host(organism);
        self.organism = Some(organism);
        self.currency = Some(currency);
        self.experiment = Some(experiment);
        self.host = Some(host);
        self.settings = None;
        self.phase = SessionPhase::Initialized;
        Ok(())
    }

    pub fn experiment(&self) -> Result<&Experiment, DigLabError> {
        self.experiment.as_ref().ok_or(DigLabError::NotInitialized)
    }

    pub fn host(&self) -> Result<&Host, DigLabError> {
        self.host.as_ref().ok_or(DigLabError::NotInitialized)
    }

    /// Installs the batch settings for the next run.
    pub fn configure(&mut self, settings: ExperimentSettings) -> Result<(), DigLabError> {
        if self.experiment.is_none() {
            return Err(DigLabError::NotInitialized);
        }
        self.settings = Some(settings);
        self.phase = SessionPhase::Configured;
        Ok(())
    }

    pub fn settings(&self) -> Option<&ExperimentSettings> {
        self.settings.as_ref()
    }

    /// Runs the configured batch simulation and records it in the history.
    pub fn run(&mut self) -> Result<SimulationResult, DigLabError> {
        let experiment = self.experiment.as_mut().ok_or(DigLabError::NotInitialized)?;
        let host = self.host.as_mut().ok_or(DigLabError::NotInitialized)?;
        let settings = self.settings.as_ref().ok_or(DigLabError::NotConfigured)?;

        let result = experiment.run_batch_simulation(host, settings)?;
        self.phase = SessionPhase::RanOnce;
        Ok(result)
    }

    /// Discards host, experiment, settings, and history unconditionally.
    /// Only the date stamp survives.
    pub fn reset(&mut self) {
        self.currency = None;
        self.organism = None;
        self.experiment = None;
        self.host = None;
        self.settings = None;
        self.phase = SessionPhase::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::metabolism::MetabolismEngine;
    use crate::settings::{select_carbon_source, SettingsBuilder};

    fn configured_session() -> Session {
        let mut session = Session::new("240101");
        session
            .initialize(Organism::EColiCore, 240101, 5000, 100_000, Currency::Euro)
            .unwrap();
        let model = session.host().unwrap().metabolism.model().clone();
        let selection = select_carbon_source(&model, "Glucose", None).unwrap();
        let settings = SettingsBuilder::new(Organism::EColiCore)
            .with_carbon_source(selection, 5.56)
            .build()
            .unwrap();
        session.configure(settings).unwrap();
        session
    }

    #[test]
    fn phases_advance_through_the_workflow() {
        let mut session = Session::new("240101");
        assert_eq!(session.phase(), SessionPhase::Uninitialized);

        session
            .initialize(Organism::EColiCore, 240101, 5000, 100_000, Currency::Euro)
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Initialized);
        assert_eq!(session.experiment().unwrap().budget(), 95_000);

        let mut session = configured_session();
        assert_eq!(session.phase(), SessionPhase::Configured);

        session.run().unwrap();
        assert_eq!(session.phase(), SessionPhase::RanOnce);
        assert_eq!(session.experiment().unwrap().history().len(), 1);
    }

    #[test]
    fn run_before_initialize_is_a_warning_not_a_crash() {
        let mut session = Session::new("240101");
        let err = session.run().unwrap_err();
        assert!(matches!(err, DigLabError::NotInitialized));
    }

    #[test]
    fn run_before_configure_is_blocked() {
        let mut session = Session::new("240101");
        session
            .initialize(Organism::EColiCore, 240101, 5000, 100_000, Currency::Euro)
            .unwrap();
        let err = session.run().unwrap_err();
        assert!(matches!(err, DigLabError::NotConfigured));
    }

    #[test]
    fn configure_before_initialize_is_blocked() {
        let mut session = Session::new("240101");
        let settings = SettingsBuilder::new(Organism::EColiCore).build().unwrap();
        let err = session.configure(settings).unwrap_err();
        assert!(matches!(err, DigLabError::NotInitialized));
    }

    #[test]
    fn reset_discards_everything_from_any_phase() {
        let mut session = configured_session();
        session.run().unwrap();

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert!(session.organism().is_none());
        assert!(session.currency().is_none());
        assert!(session.settings().is_none());
        assert!(session.experiment().is_err());
        assert!(session.host().is_err());

        // A fresh run attempt is blocked with the initialize-first error.
        let err = session.run().unwrap_err();
        assert!(matches!(err, DigLabError::NotInitialized));
    }

    #[test]
    fn reinitializing_clears_the_history() {
        let mut session = configured_session();
        session.run().unwrap();
        assert_eq!(session.experiment().unwrap().history().len(), 1);

        session
            .initialize(Organism::EColi, 240102, 1000, 100_000, Currency::Dollar)
            .unwrap();
        assert!(session.experiment().unwrap().history().is_empty());
        assert_eq!(session.organism(), Some(Organism::EColi));
    }
}
