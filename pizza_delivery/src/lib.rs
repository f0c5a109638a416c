pub use board::*;
pub use cell::*;
pub use config::*;
pub use errors::*;
pub use questions::*;
pub use state::*;
pub use teams::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod cell;
mod config;
mod errors;
mod questions;
mod state;
mod teams;
mod turn;
mod visualization;
