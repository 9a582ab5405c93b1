//! Builders shared by the integration tests

#![allow(dead_code)]

use shipment_scoring::scoring::{
    DetectedAssemblyShipment, DetectedKittingShipment, DetectedProduct, ExpectedAssemblyShipment,
    ExpectedKittingShipment, ExpectedProduct, MovableTray, Order, Pose,
};

pub const TRAY: &str = "movable_tray_metal_shiny";

pub fn expected_kit(
    shipment_type: &str,
    carrier: &str,
    station: &str,
    products: Vec<ExpectedProduct>,
) -> ExpectedKittingShipment {
    ExpectedKittingShipment {
        shipment_type: shipment_type.to_string(),
        carrier: carrier.to_string(),
        station: station.to_string(),
        movable_tray: MovableTray::new(TRAY, Pose::planar(0.0, 0.0, 0.0)),
        products,
    }
}

pub fn detected_kit(
    carrier: &str,
    station: &str,
    products: Vec<DetectedProduct>,
) -> DetectedKittingShipment {
    DetectedKittingShipment {
        carrier: carrier.to_string(),
        station: station.to_string(),
        movable_tray: MovableTray::new(TRAY, Pose::planar(0.0, 0.0, 0.0)),
        products,
    }
}

pub fn expected_assembly(
    shipment_type: &str,
    station: &str,
    products: Vec<ExpectedProduct>,
) -> ExpectedAssemblyShipment {
    ExpectedAssemblyShipment {
        shipment_type: shipment_type.to_string(),
        station: station.to_string(),
        products,
    }
}

pub fn detected_assembly(
    station: &str,
    products: Vec<DetectedProduct>,
) -> DetectedAssemblyShipment {
    DetectedAssemblyShipment {
        station: station.to_string(),
        products,
    }
}

pub fn expected(product_type: &str, x: f64, y: f64, yaw: f64) -> ExpectedProduct {
    ExpectedProduct::new(product_type, Pose::planar(x, y, yaw))
}

pub fn detected(product_type: &str, x: f64, y: f64, yaw: f64) -> DetectedProduct {
    DetectedProduct::new(product_type, Pose::planar(x, y, yaw))
}

/// An order with a single one-product kit on agv2 at as1
pub fn single_kit_order(order_id: &str) -> Order {
    Order::new(order_id).with_kitting(expected_kit(
        &format!("{}_kitting_shipment_0", order_id),
        "agv2",
        "as1",
        vec![expected("assembly_battery_blue", 0.1, 0.1, 0.0)],
    ))
}

/// A submission that satisfies `single_kit_order` exactly
pub fn perfect_single_kit() -> DetectedKittingShipment {
    detected_kit("agv2", "as1", vec![detected("assembly_battery_blue", 0.1, 0.1, 0.0)])
}
