//! Core types for shipment scoring
//!
//! Orders, expected shipments and the detected shipments reported back by
//! sensing. These mirror the records pushed in by upstream producers.

/// Simulation time in seconds
pub type SimTime = f64;

/// The sentinel carrier value meaning "any carrier is acceptable"
pub const ANY_CARRIER: &str = "any";

/// Carrier identifiers accepted by the scorer
pub const KNOWN_CARRIERS: [&str; 4] = ["agv1", "agv2", "agv3", "agv4"];

/// Station identifiers accepted by the scorer
pub const KNOWN_STATIONS: [&str; 4] = ["as1", "as2", "as3", "as4"];

/// A 3D position in world units (metres)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to another position ignoring the vertical axis
    pub fn planar_distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rotation stored as a unit quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation of `yaw` radians around the vertical axis
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw * 0.5;
        Self::new(half.cos(), 0.0, 0.0, half.sin())
    }

    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Rotation around the vertical axis, in (-pi, pi]
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Position plus orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Position,
    pub orientation: Quaternion,
}

impl Pose {
    pub fn new(position: Position, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose on the tray plane at (x, y) rotated by `yaw`
    pub fn planar(x: f64, y: f64, yaw: f64) -> Self {
        Self::new(Position::new(x, y, 0.0), Quaternion::from_yaw(yaw))
    }
}

/// A product an order expects, e.g. `assembly_battery_blue`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedProduct {
    pub product_type: String,
    pub pose: Pose,
}

impl ExpectedProduct {
    pub fn new(product_type: impl Into<String>, pose: Pose) -> Self {
        Self {
            product_type: product_type.into(),
            pose,
        }
    }
}

/// A product reported by sensing
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedProduct {
    pub product_type: String,
    pub pose: Pose,
    pub is_faulty: bool,
}

impl DetectedProduct {
    pub fn new(product_type: impl Into<String>, pose: Pose) -> Self {
        Self {
            product_type: product_type.into(),
            pose,
            is_faulty: false,
        }
    }

    pub fn faulty(product_type: impl Into<String>, pose: Pose) -> Self {
        Self {
            is_faulty: true,
            ..Self::new(product_type, pose)
        }
    }
}

/// The movable tray a kit is built on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovableTray {
    pub tray_type: String,
    pub pose: Pose,
}

impl MovableTray {
    pub fn new(tray_type: impl Into<String>, pose: Pose) -> Self {
        Self {
            tray_type: tray_type.into(),
            pose,
        }
    }
}

/// A kitting shipment an order expects
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedKittingShipment {
    /// e.g. `order_0_kitting_shipment_0`
    pub shipment_type: String,
    /// Carrier identifier or [`ANY_CARRIER`]
    pub carrier: String,
    pub station: String,
    pub movable_tray: MovableTray,
    pub products: Vec<ExpectedProduct>,
}

/// An assembly shipment an order expects
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedAssemblyShipment {
    /// e.g. `order_0_assembly_shipment_0`
    pub shipment_type: String,
    pub station: String,
    pub products: Vec<ExpectedProduct>,
}

/// A kitting shipment as it was observed on submission
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectedKittingShipment {
    pub carrier: String,
    pub station: String,
    pub movable_tray: MovableTray,
    pub products: Vec<DetectedProduct>,
}

/// An assembly shipment as it was observed on submission
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectedAssemblyShipment {
    /// Station encoded in the payload; the station the submission was made at
    /// is recorded separately and takes precedence.
    pub station: String,
    pub products: Vec<DetectedProduct>,
}

/// A unit of work announced to participants
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub kitting_shipments: Vec<ExpectedKittingShipment>,
    pub assembly_shipments: Vec<ExpectedAssemblyShipment>,
}

impl Order {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            kitting_shipments: Vec::new(),
            assembly_shipments: Vec::new(),
        }
    }

    pub fn with_kitting(mut self, shipment: ExpectedKittingShipment) -> Self {
        self.kitting_shipments.push(shipment);
        self
    }

    pub fn with_assembly(mut self, shipment: ExpectedAssemblyShipment) -> Self {
        self.assembly_shipments.push(shipment);
        self
    }
}
