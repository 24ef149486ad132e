//! Feasibility checks and objective evaluation for ward allocations.
//!
//! Every search strategy scores allocations through this crate so that
//! reported objective values are directly comparable.
//!
//! # Architecture
//!
//! - [`Ledger`] holds the per ward-day and per specialization-day tallies.
//!   It is the single place where cost, balance and violations are computed.
//! - [`Evaluator`] rebuilds a ledger from scratch for each call. It is
//!   stateless, so repeated calls on the same allocation agree.
//! - [`ScoreDirector`] owns a working allocation and keeps its ledger in
//!   sync move by move. [`Trial`] records moves and rolls them back on drop
//!   unless committed.

pub mod director;
pub mod evaluator;
pub mod ledger;
pub mod objective;

pub use director::{ScoreDirector, Trial};
pub use evaluator::{Evaluation, Evaluator};
pub use ledger::Ledger;
pub use objective::{scalarize, Objective, ObjectiveWeights};
