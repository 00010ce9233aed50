pub mod config;
pub mod distance;
pub mod ensemble;
pub mod error;
pub mod geo;
pub mod models;
pub mod prob;
pub mod scenario;
pub mod siteamp;
pub mod surface;
pub mod table;
// cmd and reports are binary modules (declared in main.rs); they drive the
// library through this surface only.
