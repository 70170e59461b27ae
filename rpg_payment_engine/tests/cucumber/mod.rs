
pub use world::{ReconciliationSystem, ReconciliationWorld};
