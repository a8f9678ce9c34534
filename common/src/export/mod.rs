//! Export core modules shared across front ends.

pub mod excel_core;
