mod deploy;
mod env;
mod error;
mod manifest;
mod orchestrator;
mod settings;
pub mod steps;

pub use {deploy::*, env::*, error::*, manifest::*, orchestrator::*, settings::*};
