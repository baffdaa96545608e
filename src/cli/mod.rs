//! CLI infrastructure for the oxo engines
//!
//! This module provides the command-line interface for playing against,
//! pitting, and analyzing the move-selection engines.

pub mod commands;
pub mod output;
