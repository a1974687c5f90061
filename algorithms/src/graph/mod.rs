pub mod bridges;
pub mod cycle_detection;
