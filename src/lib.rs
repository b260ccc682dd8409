pub mod account;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod driver;
pub mod error;
pub mod ir;
pub mod lower;
pub mod manifest;

pub use config::GeneratorConfig;
pub use driver::{ModuleDescriptor, RunReport, run};
pub use error::GenError;
