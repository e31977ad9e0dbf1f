pub mod clearance;
pub mod dog;
