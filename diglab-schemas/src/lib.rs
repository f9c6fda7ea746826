pub mod model;
pub mod organism;
pub mod settings;
pub mod units;
