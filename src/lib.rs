//! # Statboard - CSV statistics dashboard
//!
//! Statboard turns an uploaded CSV file into descriptive statistics, a per-row
//! aggregate and four charts, and hands back a processed copy of the table.
//!
//! ## Quick Start
//!
//! ```no_run
//! use statboard::analyser::logic::{self, ChartRequest, PipelineRequest};
//!
//! # fn example() -> statboard::error::Result<()> {
//! let bytes = std::fs::read("scores.csv")?;
//! let request = PipelineRequest::default().with_chart(ChartRequest::Histogram {
//!     column: "math".to_owned(),
//!     bins: 20,
//! });
//! let output = logic::run_upload(&bytes, "scores.csv", &request)?;
//!
//! for row in &output.statistics {
//!     println!("{}: n={} mean={:?}", row.column, row.count, row.mean);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: the pipeline, its renderers and the dashboard
//!   - [`analyser::logic`]: ingestion, classification, statistics, charts, export
//!   - [`analyser::render`]: Vega-Lite and plain-text chart renderers
//! - [`config`]: persisted user settings
//! - [`error`]: error types and handling utilities
//! - [`gui`]: the desktop application shell
//! - [`logging`]: tracing setup
//!
//! ## Pipeline
//!
//! Every interaction is one synchronous request/response call:
//!
//! ```text
//! ingest -> classify -> drop all-null rows -> describe -> row means
//!        -> resolve charts -> export
//! ```
//!
//! Only an unparseable upload is an error. Everything else (no numeric
//! columns, an empty selection, a chart without data) comes back as a
//! [`Notice`](analyser::logic::Notice) in the output.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod gui;
pub mod logging;
pub mod theme;
pub mod utils;
