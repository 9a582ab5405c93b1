//! Thread-safe front end to the scorer
//!
//! Order feeds and shipment sensors call in from their own threads. Every
//! call, including computing the game score, runs under one lock so scoring
//! never observes a half-ingested event.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::config::ScoringConfig;
use super::scorer::Scorer;
use super::score::GameScore;
use super::types::{DetectedAssemblyShipment, DetectedKittingShipment, Order, SimTime};

#[derive(Debug, Default)]
pub struct ScoringEngine {
    state: Mutex<Scorer>,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            state: Mutex::new(Scorer::with_config(config)),
        }
    }

    /// Poisoning is ignored; every mutation is a single push or insert.
    fn lock(&self) -> MutexGuard<'_, Scorer> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_order_start(&self, time: SimTime, order: Order, priority: i32) {
        self.lock().record_order_start(time, order, priority);
    }

    pub fn record_order_update(&self, time: SimTime, target_order_id: &str, order: Order) -> bool {
        self.lock().record_order_update(time, target_order_id, order)
    }

    pub fn record_kitting_shipment(
        &self,
        time: SimTime,
        shipment_type: &str,
        shipment: DetectedKittingShipment,
    ) {
        self.lock()
            .record_kitting_shipment(time, shipment_type, shipment);
    }

    pub fn record_assembly_shipment(
        &self,
        time: SimTime,
        shipment_type: &str,
        shipment: DetectedAssemblyShipment,
        actual_station: &str,
    ) {
        self.lock()
            .record_assembly_shipment(time, shipment_type, shipment, actual_station);
    }

    pub fn record_collision(&self, time: SimTime) {
        self.lock().record_collision(time);
    }

    pub fn game_score(&self, penalty: i32) -> GameScore {
        self.lock().game_score(penalty)
    }
}
