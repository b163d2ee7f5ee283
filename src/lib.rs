pub mod chart;
pub mod config;
pub mod context;
pub mod input;
pub mod logistic_regression;
pub mod metrics;
pub mod page;
pub mod parse;
pub mod predict;
pub mod preset;
pub mod server;
pub mod signature;
pub mod split;
pub mod trainer;
pub mod view;

#[cfg(test)]
mod fixtures;
