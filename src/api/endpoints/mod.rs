pub mod dogs;
pub mod health;
pub mod verification;
