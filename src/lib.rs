//! Supportviz - synthetic customer-support response times as a violin chart
//!
//! This library generates a seeded dataset of response times across five
//! support channels, renders an annotated violin chart with `plotters`, and
//! reports per-channel descriptive statistics.

pub mod channels;
pub mod chart;
pub mod cli;
pub mod dataset;
pub mod stats;
