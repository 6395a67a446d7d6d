#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod clause;
pub mod dimacs;
pub mod error;
pub mod formula;
pub mod input;
pub mod literal;
pub mod papadimitriou;
pub mod registry;
pub mod simplify;
pub mod solver;
