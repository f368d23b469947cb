//! stock-planner core
//!
//! Region geometry for mock map data, order-line normalisation and import,
//! history filtering and export, purchasing suggestions and the dashboard's
//! refreshed series.

pub mod traits;
pub mod error;
pub mod geo;
pub mod regions;
pub mod sampler;
pub mod nominatim;
pub mod catalog;
pub mod order;
pub mod session;
pub mod prefill;
pub mod table;
pub mod import;
pub mod export;
pub mod alerts;
pub mod history;
pub mod map;
pub mod suggestions;
pub mod dashboard;
pub mod ticker;
