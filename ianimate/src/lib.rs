//! CLI glue for ianimate. All selection and encoding logic lives in
//! the `ianimate-core` crate.

pub mod cli;
pub mod load_config;
