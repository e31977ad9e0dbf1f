pub mod clearance;
pub mod dog;
pub mod enums;

pub use clearance::HealthClearance;
pub use dog::Dog;
