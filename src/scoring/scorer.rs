//! Scoring state and the aggregate scoring pass
//!
//! `Scorer` owns everything the score is computed from: the order registry,
//! the shipment log and the collision flag. Computing a score never changes
//! that state, so the same history and penalty always give the same result.

use log::{info, warn};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, HashSet};

use super::assembly::score_assembly_shipment;
use super::config::ScoringConfig;
use super::diagnostics::ScoringIssue;
use super::kitting::score_kitting_shipment;
use super::registry::OrderRegistry;
use super::score::{AssemblyShipmentScore, GameScore, KittingShipmentScore, OrderScore};
use super::shipment_log::{first_unclaimed, ShipmentLog};
use super::types::{DetectedAssemblyShipment, DetectedKittingShipment, Order, SimTime};

/// Single-threaded scoring state. See `ScoringEngine` for shared use.
#[derive(Debug, Default)]
pub struct Scorer {
    config: ScoringConfig,
    registry: OrderRegistry,
    log: ShipmentLog,
    /// Issues raised while ingesting events
    ingest_issues: Vec<ScoringIssue>,
}

/// Records already used during one scoring pass
#[derive(Debug, Default)]
struct Claims {
    kitting: HashSet<usize>,
    assembly: HashSet<usize>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Issues raised so far while ingesting events
    pub fn ingest_issues(&self) -> &[ScoringIssue] {
        &self.ingest_issues
    }

    pub fn record_order_start(&mut self, time: SimTime, order: Order, priority: i32) {
        info!(
            "Order {} started at {:.2}s (priority {})",
            order.order_id, time, priority
        );
        if let Some(issue) = self.registry.record_order_start(time, order, priority) {
            self.ingest_issues.push(issue);
        }
    }

    /// Returns false when the target order is unknown and the update was dropped
    pub fn record_order_update(
        &mut self,
        time: SimTime,
        target_order_id: &str,
        order: Order,
    ) -> bool {
        match self.registry.record_order_update(time, target_order_id, order) {
            Some(issue) => {
                self.ingest_issues.push(issue);
                false
            }
            None => {
                info!("Order {} updated at {:.2}s", target_order_id, time);
                true
            }
        }
    }

    pub fn record_kitting_shipment(
        &mut self,
        time: SimTime,
        shipment_type: &str,
        shipment: DetectedKittingShipment,
    ) {
        info!(
            "Kitting shipment {} received at {:.2}s on {}",
            shipment_type, time, shipment.carrier
        );
        self.log.record_kitting_shipment(time, shipment_type, shipment);
    }

    pub fn record_assembly_shipment(
        &mut self,
        time: SimTime,
        shipment_type: &str,
        shipment: DetectedAssemblyShipment,
        actual_station: &str,
    ) {
        info!(
            "Assembly shipment {} received at {:.2}s at {}",
            shipment_type, time, actual_station
        );
        self.log
            .record_assembly_shipment(time, shipment_type, shipment, actual_station);
    }

    pub fn record_collision(&mut self, time: SimTime) {
        warn!("Collision recorded at {:.2}s; game score will be zero", time);
        self.log.record_collision(time);
    }

    /// Score every known order against the submitted shipments
    pub fn game_score(&self, penalty: i32) -> GameScore {
        let mut game_score = GameScore {
            penalty,
            was_collision: self.log.had_collision(),
            collision_time: self.log.collision_time(),
            order_scores: BTreeMap::new(),
            diagnostics: self.ingest_issues.clone(),
        };
        let mut claims = Claims::default();

        for order_id in self.registry.order_ids() {
            let Some(effective) = self.registry.effective_order(order_id) else {
                continue;
            };
            let order_score = self.score_order(
                order_id,
                effective.order,
                effective.priority,
                effective.start_time,
                &mut claims,
                &mut game_score.diagnostics,
            );
            game_score
                .order_scores
                .insert(order_id.to_string(), order_score);
        }

        game_score
    }

    fn score_order(
        &self,
        order_id: &str,
        order: &Order,
        priority: i32,
        start_time: SimTime,
        claims: &mut Claims,
        diagnostics: &mut Vec<ScoringIssue>,
    ) -> OrderScore {
        let mut order_score = OrderScore::new(order_id, priority, start_time);

        for expected in &order.kitting_shipments {
            if order_score
                .kitting_shipment_scores
                .contains_key(&expected.shipment_type)
            {
                report_duplicate_shipment(order_id, &expected.shipment_type, diagnostics);
                continue;
            }
            let shipment_score = match first_unclaimed(
                self.log.kitting(),
                &expected.shipment_type,
                start_time,
                &claims.kitting,
            ) {
                Some(index) => {
                    claims.kitting.insert(index);
                    let record = &self.log.kitting()[index];
                    score_kitting_shipment(
                        record.submit_time,
                        expected,
                        &record.shipment,
                        &self.config,
                    )
                }
                None => KittingShipmentScore::not_submitted(&expected.shipment_type),
            };
            diagnostics.extend(shipment_score.issues.iter().cloned());
            order_score
                .kitting_shipment_scores
                .insert(expected.shipment_type.clone(), shipment_score);
        }

        for expected in &order.assembly_shipments {
            if order_score
                .assembly_shipment_scores
                .contains_key(&expected.shipment_type)
            {
                report_duplicate_shipment(order_id, &expected.shipment_type, diagnostics);
                continue;
            }
            let shipment_score = match first_unclaimed(
                self.log.assembly(),
                &expected.shipment_type,
                start_time,
                &claims.assembly,
            ) {
                Some(index) => {
                    claims.assembly.insert(index);
                    let record = &self.log.assembly()[index];
                    score_assembly_shipment(
                        record.submit_time,
                        expected,
                        &record.shipment,
                        &record.station,
                        &self.config,
                    )
                }
                None => AssemblyShipmentScore::not_submitted(&expected.shipment_type),
            };
            diagnostics.extend(shipment_score.issues.iter().cloned());
            order_score
                .assembly_shipment_scores
                .insert(expected.shipment_type.clone(), shipment_score);
        }

        // Each kind that is fully complete contributes its submit times
        let mut finished = Vec::new();
        if !order_score.kitting_shipment_scores.is_empty() && order_score.is_kitting_complete() {
            finished.extend(order_score.kitting_shipment_scores.values().map(|s| s.submit_time));
        }
        if !order_score.assembly_shipment_scores.is_empty() && order_score.is_assembly_complete() {
            finished.extend(order_score.assembly_shipment_scores.values().map(|s| s.submit_time));
        }
        order_score.time_taken = finished
            .into_iter()
            .map(OrderedFloat)
            .max()
            .map(|last_submission| last_submission.into_inner() - start_time);

        order_score
    }
}

fn report_duplicate_shipment(
    order_id: &str,
    shipment_type: &str,
    diagnostics: &mut Vec<ScoringIssue>,
) {
    warn!(
        "Order {} contained duplicate shipment type {}; keeping the first",
        order_id, shipment_type
    );
    diagnostics.push(ScoringIssue::DuplicateShipmentType {
        order_id: order_id.to_string(),
        shipment_type: shipment_type.to_string(),
    });
}
