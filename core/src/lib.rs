pub mod emit;
pub mod registry;

pub mod error;
