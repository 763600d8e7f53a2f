mod operations;
mod pipelines;
pub mod pure;
#[cfg(test)]
mod tests;
mod types;

// Re-export the provisioning surface
pub use pipelines::{provision_asin, run};
pub use pure::{build_image_set, parse_asins};
pub use types::{ClientRootError, ImageRef, ProvisionFailure, RunOutcome, ValidationError};
