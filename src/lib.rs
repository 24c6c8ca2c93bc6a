//! dipdca: backtests dollar-cost averaging against buying statistical dips.
//!
//! Hexagonal architecture: pure analysis in [`domain`], collaborator traits in
//! [`ports`], concrete price sources, config and reports in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
