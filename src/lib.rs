//! Shipment Scoring Library
//!
//! Scores kitting and assembly shipments submitted against competition orders.

pub mod scoring;
