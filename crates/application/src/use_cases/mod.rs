//! Use cases (application services)

mod run_conformance;

pub use run_conformance::{RunConformance, evaluate};
