// Adapters layer: concrete implementations for the external collaborators
// (generation service, plan stores).

pub mod generation;
pub mod store;

pub use generation::HttpGenerator;
pub use store::{HttpPlanStore, LocalPlanStore};
