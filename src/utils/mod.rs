pub mod error;
pub mod temporal;
