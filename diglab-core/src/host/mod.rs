//! The simulated host organism: a metabolism collaborator, the growth profile
//! used to interpret its output, and a deterministic generator factory.

pub mod metabolism;
pub mod rng;

use diglab_schemas::organism::{GrowthProfile, HostDefinition, Organism, TemperatureTolerance};
use metabolism::{Metabolism, MetabolismEngine};
use rng::LabRandom;

pub struct Host<M: MetabolismEngine = Metabolism> {
    pub organism: Organism,
    pub temperature: TemperatureTolerance,
    pub growth: GrowthProfile,
    pub metabolism: M,
    seed: u64,
}

impl<M: MetabolismEngine> Host<M> {
    pub fn new(definition: HostDefinition, metabolism: M, seed: u64) -> Self {
        Self {
            organism: definition.organism,
            temperature: definition.temperature,
            growth: definition.growth,
            metabolism,
            seed,
        }
    }

    /// Optimal growth temperature in degrees Celsius.
    pub fn opt_growth_temp(&self) -> f64 {
        self.temperature.optimal
    }

    /// A fresh deterministic generator. Hosts created from the same seed hand
    /// out generators with identical draw sequences.
    pub fn make_generator(&self) -> LabRandom {
        LabRandom::from_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog;
    use diglab_schemas::organism::Organism;

    #[test]
    fn generators_from_same_host_repeat() {
        let host = catalog::create_host(Organism::EColiCore, 240101);
        let mut a = host.make_generator();
        let mut b = host.make_generator();
        for _ in 0..16 {
            assert_eq!(a.pick_uniform(0.0, 1.0), b.pick_uniform(0.0, 1.0));
        }
    }

    #[test]
    fn host_reports_catalog_temperature() {
        let host = catalog::create_host(Organism::SCerevisiae, 1);
        assert_eq!(host.opt_growth_temp(), 30.0);
    }
}
