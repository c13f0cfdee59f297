#![no_std]

// Modules
mod board;
mod resources;

// Flatten
pub use board::*;
pub use resources::*;
