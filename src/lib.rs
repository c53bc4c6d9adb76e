//! Educational app directory.
//!
//! A static, bilingual (Spanish / Basque) catalog of educational software with
//! multi-dimensional filtering, an icon fallback chain, on-demand AI reviews
//! and report export.

pub mod catalog;
pub mod config;
pub mod directory;
pub mod filter;
pub mod i18n;
pub mod icon;
pub mod metrics;
pub mod report;
pub mod review;
