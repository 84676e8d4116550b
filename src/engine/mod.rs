pub mod models;
pub mod row;
pub mod bot_strategy;
pub mod evaluator;
pub mod simulator;
pub mod generator;
pub mod reporter;
pub mod arena;
pub mod harness_profiles;
pub mod error;
