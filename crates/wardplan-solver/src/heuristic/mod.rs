//! Moves over allocations and their random generation.

mod moves;

pub use moves::{random_move, Move};
