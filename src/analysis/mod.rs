pub mod bucket;
pub mod events;
pub mod expectation;
pub mod features;
pub mod impact;
pub mod logistic;
pub mod luck;
pub mod player_table;
pub mod rank;
pub mod report;
pub mod scoring;
pub mod snapshot;
pub mod team;

#[cfg(test)]
pub(crate) mod fixtures;
