//! Early-game expected wins, role-normalized impact and outcome buckets for
//! ranked League of Legends games.
//!
//! Raw match and timeline records go in; per-game win probabilities, impact
//! scores and a verdict on whether each result was deserved come out.

pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod export;
pub mod pipeline;
