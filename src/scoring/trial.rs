//! Reproducible demo trials
//!
//! A trial is the list of events a competition run would push into the
//! engine: orders announced, shipments submitted, collisions. Trials built
//! from the same seed are identical.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::engine::ScoringEngine;
use super::types::{
    DetectedAssemblyShipment, DetectedKittingShipment, DetectedProduct, ExpectedAssemblyShipment,
    ExpectedKittingShipment, ExpectedProduct, MovableTray, Order, Pose, SimTime, ANY_CARRIER,
    KNOWN_CARRIERS, KNOWN_STATIONS,
};

const CATEGORIES: [&str; 4] = ["battery", "sensor", "regulator", "pump"];
const VARIANTS: [&str; 3] = ["red", "green", "blue"];
const TRAY_TYPES: [&str; 3] = [
    "movable_tray_dark_wood",
    "movable_tray_light_wood",
    "movable_tray_metal_shiny",
];

/// Seconds between consecutive order announcements
const ORDER_SPACING: SimTime = 60.0;
/// Seconds between an order starting and each of its submissions
const SUBMISSION_GAP: std::ops::Range<SimTime> = 10.0..40.0;
/// Chance that a submitted product has the wrong variant
const WRONG_VARIANT_CHANCE: f64 = 0.1;
/// Chance that a submitted product is flagged faulty
const FAULTY_CHANCE: f64 = 0.05;
/// Chance that a later order is re-announced before any submission
const UPDATE_CHANCE: f64 = 0.2;
const UPDATE_DELAY: SimTime = 5.0;

/// One event pushed into the engine
#[derive(Debug, Clone)]
pub enum TrialEvent {
    OrderStarted {
        time: SimTime,
        order: Order,
        priority: i32,
    },
    OrderUpdated {
        time: SimTime,
        target_order_id: String,
        order: Order,
    },
    KittingShipment {
        time: SimTime,
        shipment_type: String,
        shipment: DetectedKittingShipment,
    },
    AssemblyShipment {
        time: SimTime,
        shipment_type: String,
        shipment: DetectedAssemblyShipment,
        station: String,
    },
    Collision {
        time: SimTime,
    },
}

impl TrialEvent {
    pub fn time(&self) -> SimTime {
        match self {
            TrialEvent::OrderStarted { time, .. }
            | TrialEvent::OrderUpdated { time, .. }
            | TrialEvent::KittingShipment { time, .. }
            | TrialEvent::AssemblyShipment { time, .. }
            | TrialEvent::Collision { time } => *time,
        }
    }
}

/// An ordered list of trial events
#[derive(Debug, Clone, Default)]
pub struct DemoTrial {
    pub events: Vec<TrialEvent>,
}

impl DemoTrial {
    /// Build `order_count` orders with submissions whose poses are perturbed
    /// by up to `noise` metres / radians.
    pub fn generate(seed: u64, order_count: usize, noise: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trial = DemoTrial::default();

        for order_index in 0..order_count {
            let start = order_index as SimTime * ORDER_SPACING;
            let order = random_order(&mut rng, order_index);
            let priority = if order_index > 0 && rng.random_bool(0.3) { 3 } else { 1 };
            trial.events.push(TrialEvent::OrderStarted {
                time: start,
                order: order.clone(),
                priority,
            });

            let mut time = start;
            if order_index > 0 && rng.random_bool(UPDATE_CHANCE) {
                time += UPDATE_DELAY;
                trial.events.push(TrialEvent::OrderUpdated {
                    time,
                    target_order_id: order.order_id.clone(),
                    order: order.clone(),
                });
            }
            for expected in &order.kitting_shipments {
                time += rng.random_range(SUBMISSION_GAP);
                trial.events.push(TrialEvent::KittingShipment {
                    time,
                    shipment_type: expected.shipment_type.clone(),
                    shipment: submit_kit(&mut rng, expected, noise),
                });
            }
            for expected in &order.assembly_shipments {
                time += rng.random_range(SUBMISSION_GAP);
                trial.events.push(TrialEvent::AssemblyShipment {
                    time,
                    shipment_type: expected.shipment_type.clone(),
                    shipment: submit_assembly(&mut rng, expected, noise),
                    station: expected.station.clone(),
                });
            }
        }

        trial
    }

    pub fn with_collision(mut self, time: SimTime) -> Self {
        self.events.push(TrialEvent::Collision { time });
        self
    }

    /// Push every event into the engine in list order
    pub fn replay(&self, engine: &ScoringEngine) {
        for event in &self.events {
            match event {
                TrialEvent::OrderStarted {
                    time,
                    order,
                    priority,
                } => engine.record_order_start(*time, order.clone(), *priority),
                TrialEvent::OrderUpdated {
                    time,
                    target_order_id,
                    order,
                } => {
                    engine.record_order_update(*time, target_order_id, order.clone());
                }
                TrialEvent::KittingShipment {
                    time,
                    shipment_type,
                    shipment,
                } => engine.record_kitting_shipment(*time, shipment_type, shipment.clone()),
                TrialEvent::AssemblyShipment {
                    time,
                    shipment_type,
                    shipment,
                    station,
                } => {
                    engine.record_assembly_shipment(*time, shipment_type, shipment.clone(), station)
                }
                TrialEvent::Collision { time } => engine.record_collision(*time),
            }
        }
    }
}

fn random_product_type(rng: &mut StdRng) -> String {
    let category = CATEGORIES.choose(rng).copied().unwrap_or(CATEGORIES[0]);
    let variant = VARIANTS.choose(rng).copied().unwrap_or(VARIANTS[0]);
    format!("assembly_{}_{}", category, variant)
}

fn random_order(rng: &mut StdRng, order_index: usize) -> Order {
    let order_id = format!("order_{}", order_index);
    let station = KNOWN_STATIONS.choose(rng).copied().unwrap_or(KNOWN_STATIONS[0]);

    let kit_products = (0..rng.random_range(2..=4))
        .map(|slot| {
            let pose = Pose::planar(
                -0.15 + 0.1 * slot as f64,
                rng.random_range(-0.1..0.1),
                rng.random_range(-3.0..3.0),
            );
            ExpectedProduct::new(random_product_type(rng), pose)
        })
        .collect();
    let carrier = if rng.random_bool(0.25) {
        ANY_CARRIER
    } else {
        KNOWN_CARRIERS.choose(rng).copied().unwrap_or(KNOWN_CARRIERS[0])
    };
    let tray_type = TRAY_TYPES.choose(rng).copied().unwrap_or(TRAY_TYPES[0]);

    let mut order = Order::new(&order_id).with_kitting(ExpectedKittingShipment {
        shipment_type: format!("{}_kitting_shipment_0", order_id),
        carrier: carrier.to_string(),
        station: station.to_string(),
        movable_tray: MovableTray::new(tray_type, Pose::planar(0.0, 0.0, 0.0)),
        products: kit_products,
    });

    if order_index % 2 == 1 {
        let assembly_products = (0..rng.random_range(2..=3))
            .map(|slot| {
                let pose = Pose::planar(0.2 * slot as f64, 0.1, rng.random_range(-3.0..3.0));
                ExpectedProduct::new(random_product_type(rng), pose)
            })
            .collect();
        order = order.with_assembly(ExpectedAssemblyShipment {
            shipment_type: format!("{}_assembly_shipment_0", order_id),
            station: station.to_string(),
            products: assembly_products,
        });
    }

    order
}

fn jitter(rng: &mut StdRng, pose: &Pose, noise: f64) -> Pose {
    if noise <= 0.0 {
        return *pose;
    }
    Pose::planar(
        pose.position.x + rng.random_range(-noise..noise),
        pose.position.y + rng.random_range(-noise..noise),
        pose.orientation.yaw() + rng.random_range(-noise..noise),
    )
}

fn submit_product(rng: &mut StdRng, expected: &ExpectedProduct, noise: f64) -> DetectedProduct {
    let product_type = if rng.random_bool(WRONG_VARIANT_CHANCE) {
        random_product_type(rng)
    } else {
        expected.product_type.clone()
    };
    let pose = jitter(rng, &expected.pose, noise);
    if rng.random_bool(FAULTY_CHANCE) {
        DetectedProduct::faulty(product_type, pose)
    } else {
        DetectedProduct::new(product_type, pose)
    }
}

fn submit_kit(
    rng: &mut StdRng,
    expected: &ExpectedKittingShipment,
    noise: f64,
) -> DetectedKittingShipment {
    let carrier = if expected.carrier == ANY_CARRIER {
        KNOWN_CARRIERS.choose(rng).copied().unwrap_or(KNOWN_CARRIERS[0]).to_string()
    } else {
        expected.carrier.clone()
    };
    DetectedKittingShipment {
        carrier,
        station: expected.station.clone(),
        movable_tray: MovableTray::new(
            expected.movable_tray.tray_type.clone(),
            jitter(rng, &expected.movable_tray.pose, noise),
        ),
        products: expected
            .products
            .iter()
            .map(|product| submit_product(rng, product, noise))
            .collect(),
    }
}

fn submit_assembly(
    rng: &mut StdRng,
    expected: &ExpectedAssemblyShipment,
    noise: f64,
) -> DetectedAssemblyShipment {
    DetectedAssemblyShipment {
        station: expected.station.clone(),
        products: expected
            .products
            .iter()
            .map(|product| submit_product(rng, product, noise))
            .collect(),
    }
}
