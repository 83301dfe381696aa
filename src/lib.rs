//! oneway: one-way ANOVA over grouped CSV data.
//!
//! A pure computation core (dataset partitioning, variance decomposition,
//! F distribution) with a thin presentation layer around it: scoped CSV
//! intake, report rendering, and a long-to-wide pivot.

pub mod anova;
pub mod dataset;
pub mod fdist;
pub mod intake;
pub mod report;
pub mod reshape;
