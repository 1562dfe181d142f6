//! Payroll Report Engine
//!
//! This crate turns compensation documents into payroll reports. Each
//! document is resolved against its employee and benefit, its amount is
//! split into net, pension-fund, income-tax and gross figures by a statutory
//! rule table, and the resulting entries are aggregated into a payroll
//! register and per-employee pay slips.

#![warn(missing_docs)]

pub mod aggregation;
pub mod calculation;
pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod service;
pub mod store;
pub mod views;
