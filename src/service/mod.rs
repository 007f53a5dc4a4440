pub mod generator;
pub mod random;
pub mod report;
