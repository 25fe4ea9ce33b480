//! Batch tool that reshapes an analytics CSV export: converts timestamp columns
//! between timezones and appends configured extra columns.

pub mod data;
pub mod reshape;
pub mod settings;
