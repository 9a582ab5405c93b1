//! Score records produced by a scoring pass
//!
//! Shipment scores start out in their "not submitted" state and are filled in
//! by the kitting and assembly scorers. Order and game scores roll them up.

use std::collections::BTreeMap;

use super::diagnostics::ScoringIssue;
use super::types::SimTime;

/// Detailed score of one kitting shipment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KittingShipmentScore {
    /// e.g. `order_0_kitting_shipment_0`
    pub shipment_type: String,
    pub is_submitted: bool,
    pub submit_time: SimTime,
    /// Carrier the kit actually arrived on
    pub carrier: String,
    pub has_correct_carrier: bool,
    pub has_correct_station: bool,
    pub has_correct_tray_type: bool,
    pub has_correct_tray_position: bool,
    pub has_correct_tray_orientation: bool,
    pub has_correct_tray_pose: bool,
    /// Products whose category matched, ignoring variant
    pub product_type_presence: u32,
    /// Products whose category and variant matched
    pub product_type_and_variant_presence: u32,
    /// Correctly placed products
    pub product_pose: u32,
    pub all_products_bonus: u32,
    pub has_faulty_product: bool,
    pub has_missing_products: bool,
    pub has_unwanted_product: bool,
    pub is_complete: bool,
    pub issues: Vec<ScoringIssue>,
}

impl KittingShipmentScore {
    pub fn not_submitted(shipment_type: impl Into<String>) -> Self {
        Self {
            shipment_type: shipment_type.into(),
            ..Self::default()
        }
    }

    /// Points for this shipment. A kit on the wrong carrier or at the wrong
    /// station earns nothing.
    pub fn total(&self) -> u32 {
        if !self.is_submitted || !self.has_correct_carrier || !self.has_correct_station {
            return 0;
        }
        self.product_type_presence
            + self.product_type_and_variant_presence
            + self.product_pose
            + self.all_products_bonus
    }
}

/// Per-product breakdown of an assembly shipment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyProductScore {
    pub is_correct_type: bool,
    pub is_correct_variant: bool,
    pub is_correct_pose: bool,
    /// 0, 2 (type and pose) or 3 (type, pose and variant)
    pub success: u32,
}

/// Detailed score of one assembly shipment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssemblyShipmentScore {
    /// e.g. `order_0_assembly_shipment_0`
    pub shipment_type: String,
    pub is_submitted: bool,
    pub submit_time: SimTime,
    /// Station the submission was made at
    pub station: String,
    pub has_correct_station: bool,
    pub products_with_correct_type: u32,
    pub products_with_correct_variant: u32,
    pub products_with_correct_pose: u32,
    pub has_missing_product: bool,
    pub has_unwanted_product: bool,
    pub has_faulty_product: bool,
    pub is_complete: bool,
    pub all_products_bonus: u32,
    pub detected_product_count: usize,
    pub expected_product_count: usize,
    /// Keyed by detected product identifier
    pub products: BTreeMap<String, AssemblyProductScore>,
    pub issues: Vec<ScoringIssue>,
}

impl AssemblyShipmentScore {
    pub fn not_submitted(shipment_type: impl Into<String>) -> Self {
        Self {
            shipment_type: shipment_type.into(),
            ..Self::default()
        }
    }

    /// Points for this shipment; nothing when built at the wrong station
    pub fn total(&self) -> u32 {
        if !self.is_submitted || !self.has_correct_station {
            return 0;
        }
        self.products_with_correct_type
            + self.products_with_correct_variant
            + self.products_with_correct_pose
            + self.all_products_bonus
    }
}

/// Score of one order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderScore {
    pub order_id: String,
    pub priority: i32,
    /// Effective start time the order was scored against
    pub start_time: SimTime,
    /// Seconds from the effective start to the last submission among the
    /// shipment kinds that are fully complete
    pub time_taken: Option<f64>,
    pub kitting_shipment_scores: BTreeMap<String, KittingShipmentScore>,
    pub assembly_shipment_scores: BTreeMap<String, AssemblyShipmentScore>,
}

impl OrderScore {
    pub fn new(order_id: impl Into<String>, priority: i32, start_time: SimTime) -> Self {
        Self {
            order_id: order_id.into(),
            priority,
            start_time,
            ..Self::default()
        }
    }

    pub fn is_kitting_complete(&self) -> bool {
        self.kitting_shipment_scores
            .values()
            .all(|score| score.is_submitted && score.is_complete)
    }

    pub fn is_assembly_complete(&self) -> bool {
        self.assembly_shipment_scores
            .values()
            .all(|score| score.is_submitted && score.is_complete)
    }

    /// Every expected shipment was submitted complete.
    ///
    /// Completion time is tracked per kind and can be set while this is false.
    pub fn is_complete(&self) -> bool {
        self.shipment_count() > 0 && self.is_kitting_complete() && self.is_assembly_complete()
    }

    pub fn shipment_count(&self) -> usize {
        self.kitting_shipment_scores.len() + self.assembly_shipment_scores.len()
    }

    /// Sum of shipment points, weighted by priority
    pub fn total(&self) -> i64 {
        let kitting: u32 = self.kitting_shipment_scores.values().map(|s| s.total()).sum();
        let assembly: u32 = self.assembly_shipment_scores.values().map(|s| s.total()).sum();
        i64::from(self.priority) * i64::from(kitting + assembly)
    }
}

/// The overall result handed to callers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameScore {
    pub penalty: i32,
    pub was_collision: bool,
    /// Time of the first collision, if any
    pub collision_time: Option<SimTime>,
    pub order_scores: BTreeMap<String, OrderScore>,
    /// Ingestion issues followed by scoring issues, in the order found
    pub diagnostics: Vec<ScoringIssue>,
}

impl GameScore {
    /// Zero after a collision; order scores stay available for inspection
    pub fn total(&self) -> i64 {
        if self.was_collision {
            return 0;
        }
        let orders: i64 = self.order_scores.values().map(OrderScore::total).sum();
        orders - i64::from(self.penalty)
    }

    pub fn order(&self, order_id: &str) -> Option<&OrderScore> {
        self.order_scores.get(order_id)
    }

    /// Print a human-readable breakdown
    pub fn print_summary(&self) {
        println!("=== Game Score ===");
        println!(
            "Total: {} | Penalty: {} | Collision: {}",
            self.total(),
            self.penalty,
            self.was_collision
        );
        if let Some(time) = self.collision_time {
            println!("First collision at {:.2}s", time);
        }
        for order in self.order_scores.values() {
            let time_taken = match order.time_taken {
                Some(seconds) => format!("{:.2}s", seconds),
                None => "incomplete".to_string(),
            };
            println!(
                "Order {} (priority {}): {} points, {}",
                order.order_id,
                order.priority,
                order.total(),
                time_taken
            );
            for kit in order.kitting_shipment_scores.values() {
                println!(
                    "  kit {}: {} points (type {}, variant {}, pose {}, bonus {}){}",
                    kit.shipment_type,
                    kit.total(),
                    kit.product_type_presence,
                    kit.product_type_and_variant_presence,
                    kit.product_pose,
                    kit.all_products_bonus,
                    if kit.is_submitted { "" } else { " [not submitted]" }
                );
            }
            for assembly in order.assembly_shipment_scores.values() {
                println!(
                    "  assembly {}: {} points (type {}, variant {}, pose {}, bonus {}){}",
                    assembly.shipment_type,
                    assembly.total(),
                    assembly.products_with_correct_type,
                    assembly.products_with_correct_variant,
                    assembly.products_with_correct_pose,
                    assembly.all_products_bonus,
                    if assembly.is_submitted { "" } else { " [not submitted]" }
                );
            }
        }
        for issue in &self.diagnostics {
            println!("Issue: {}", issue);
        }
    }
}
