//! loyalty-core: financial modeling for points-based loyalty programs and
//! the marketing campaigns layered on top of them.

pub mod aggregation;
pub mod base_program;
pub mod benchmark;
pub mod campaign;
pub mod campaign_book;
pub mod campaign_model;
pub mod command;
pub mod config;
pub mod earning_rate;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod normalize;
pub mod optimizer;
pub mod scenario;
pub mod templates;
pub mod types;
