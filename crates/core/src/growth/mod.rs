//! Exponential growth model fitting.
//!
//! - [`growth_model`] - `FitParameters`, trend points, fit errors
//! - [`fit_service`] - nonlinear least-squares fit and trend sampling

pub mod fit_service;
pub mod growth_model;

#[cfg(test)]
mod fit_service_tests;

pub use fit_service::{fit_exponential, trend_line};
pub use growth_model::{FitError, FitParameters, TrendPoint};
