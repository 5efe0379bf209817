//! Utility modules shared by the loader and the generators.

pub mod date;
pub mod mime;
