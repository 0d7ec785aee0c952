//! # Riskscope Metrics Engine
//!
//! This crate computes the annualized return/risk statistics that make up a
//! risk report: return and volatility, Sharpe/Sortino/Calmar, maximum
//! drawdown, historical VaR/CVaR and tail ratio, distribution shape, and the
//! single-regressor market regression (beta, alpha, R²).
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` is a stateless
//!   calculator: immutable series in, one immutable `MetricsRecord` out.
//!   Identical inputs always produce identical output, so concurrent calls
//!   across tickers need no coordination.
//! - **Absence is a type:** a statistic that is numerically undefined (zero
//!   denominator, too few observations, missing benchmark) is `None` in the
//!   record, never NaN and never a substituted number. The only hard failure
//!   is `MetricsError::InsufficientData` when no return series can be built.
//!
//! ## Public API
//!
//! - `MetricsEngine`: the main struct that contains the calculation logic.
//! - `MetricsRecord`: the standardized struct that holds all computed fields.
//! - `WealthCurve`: tagged drawdown input (returns vs. price levels).
//! - `MetricsError`: the specific error types that can be returned.

// Declare the modules that constitute this crate.
pub mod drawdown;
pub mod engine;
pub mod error;
pub mod record;
pub mod regression;
pub mod returns;
pub mod shape;
pub mod tail;

// Re-export the key components to create a clean, public-facing API.
pub use drawdown::{WealthCurve, max_drawdown};
pub use engine::MetricsEngine;
pub use error::MetricsError;
pub use record::MetricsRecord;

/// Trading periods per year, used for all annualization.
pub const TRADING_DAYS: f64 = 252.0;
