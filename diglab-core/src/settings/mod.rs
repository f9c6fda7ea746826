pub mod builder;

pub use builder::{
    convert_concentration, filter_carbon_sources, parse_temperatures, resolve_exchange,
    select_carbon_source, CarbonSelection, SettingsBuilder,
};
