pub mod catalog;
pub mod error;
pub mod experiment;
pub mod export;
pub mod host;
pub mod session;
pub mod settings;
