//! Helpers shared by the CLI and web surfaces.

pub mod age;
pub mod validation;
