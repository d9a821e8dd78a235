pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{LocalStorage, PngRasterizer, PokeApiClient};
pub use crate::config::AppConfig;
pub use crate::core::{
    engine::{CardEngine, CardOutcome, CardRequest},
    export::ExportFormat,
    session::CardSession,
};
pub use crate::utils::error::{CardError, Result};
