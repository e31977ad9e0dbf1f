pub mod api;
pub mod clearances; // Submission upsert + public verification
pub mod config;
pub mod db;
pub mod models;
pub mod rules; // Status classifier + expiry calculator
