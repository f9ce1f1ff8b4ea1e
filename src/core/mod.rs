pub mod aggregate;
pub mod engine;
pub mod logging;
pub mod rules;
pub mod score;
