//! Parse `pvdisplay -m` output and chart how physical extents are
//! allocated to logical volumes.

pub mod app;
pub mod chart;
pub mod collectors;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod ui;
pub mod util;
