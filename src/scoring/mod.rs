//! Shipment scoring engine
//!
//! Ingests order lifecycle events and submitted shipments, then scores the
//! submissions against what each order expected. Nothing here depends on the
//! simulator; records arrive already sensed and well formed.

mod assembly;
mod assignment;
mod config;
mod diagnostics;
mod engine;
mod geometry;
mod identifier;
mod kitting;
mod registry;
mod score;
mod scorer;
mod shipment_log;
mod trial;
mod types;

// Re-export public types for external use
pub use assembly::{score_assembly_shipment, ASSEMBLY_BONUS_PER_PRODUCT};
pub use assignment::{
    best_assignment, best_assignment_by_matching, best_assignment_by_permutation,
    CompatibilityMatrix,
};
pub use config::{
    PoseTolerance, ScoringConfig, ASSEMBLY_PRODUCT_TRANSLATION, ASSEMBLY_PRODUCT_YAW,
    KITTING_PRODUCT_TRANSLATION, KITTING_PRODUCT_YAW, PERMUTATION_SEARCH_LIMIT,
    QUATERNION_DOT_GATE, TRAY_TRANSLATION, TRAY_YAW,
};
pub use diagnostics::ScoringIssue;
pub use engine::ScoringEngine;
pub use geometry::{
    compare_poses, normalize_angle, orientation_matches, pose_matches, position_matches,
    yaw_distance, PoseCheck,
};
pub use identifier::{parse_carrier_target, parse_station, CarrierTarget, ProductKey};
pub use kitting::score_kitting_shipment;
pub use registry::{EffectiveOrder, OrderInfo, OrderRegistry, OrderUpdate};
pub use score::{
    AssemblyProductScore, AssemblyShipmentScore, GameScore, KittingShipmentScore, OrderScore,
};
pub use scorer::Scorer;
pub use shipment_log::{
    first_unclaimed, AssemblyShipmentRecord, KittingShipmentRecord, ShipmentLog, ShipmentRecord,
};
pub use trial::{DemoTrial, TrialEvent};
pub use types::{
    DetectedAssemblyShipment, DetectedKittingShipment, DetectedProduct, ExpectedAssemblyShipment,
    ExpectedKittingShipment, ExpectedProduct, MovableTray, Order, Pose, Position, Quaternion,
    SimTime, ANY_CARRIER, KNOWN_CARRIERS, KNOWN_STATIONS,
};
