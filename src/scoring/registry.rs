//! Active orders and the updates recorded against them

use log::warn;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use super::diagnostics::ScoringIssue;
use super::types::{Order, SimTime};

/// An order as it was first announced
#[derive(Debug, Clone)]
pub struct OrderInfo {
    pub order: Order,
    pub priority: i32,
    pub start_time: SimTime,
}

/// A replacement payload for an existing order
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub target_order_id: String,
    pub order: Order,
    pub update_time: SimTime,
}

/// The version of an order that scoring should use
#[derive(Debug, Clone, Copy)]
pub struct EffectiveOrder<'a> {
    pub order: &'a Order,
    pub priority: i32,
    /// Update time when an update applies, else the original start time
    pub start_time: SimTime,
}

/// Orders keyed by identifier, iterated in identifier order
#[derive(Debug, Default)]
pub struct OrderRegistry {
    orders: BTreeMap<String, OrderInfo>,
    updates: Vec<OrderUpdate>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly started order. A duplicate id replaces the earlier entry.
    pub fn record_order_start(
        &mut self,
        time: SimTime,
        order: Order,
        priority: i32,
    ) -> Option<ScoringIssue> {
        let order_id = order.order_id.clone();
        let info = OrderInfo {
            order,
            priority,
            start_time: time,
        };
        match self.orders.insert(order_id.clone(), info) {
            Some(_) => {
                warn!("Order with duplicate ID '{}'; overwriting", order_id);
                Some(ScoringIssue::DuplicateOrder { order_id })
            }
            None => None,
        }
    }

    /// Record an update to an existing order. Updates for unknown orders are dropped.
    pub fn record_order_update(
        &mut self,
        time: SimTime,
        target_order_id: &str,
        order: Order,
    ) -> Option<ScoringIssue> {
        if !self.orders.contains_key(target_order_id) {
            warn!(
                "Asked to update nonexistent order '{}'; ignoring",
                target_order_id
            );
            return Some(ScoringIssue::UnknownOrderUpdate {
                order_id: target_order_id.to_string(),
            });
        }
        self.updates.push(OrderUpdate {
            target_order_id: target_order_id.to_string(),
            order,
            update_time: time,
        });
        None
    }

    /// Latest update for `order_id` if any, else the original order.
    /// Among updates with equal times the one recorded last wins.
    pub fn effective_order(&self, order_id: &str) -> Option<EffectiveOrder<'_>> {
        let info = self.orders.get(order_id)?;
        let latest = self
            .updates
            .iter()
            .enumerate()
            .filter(|(_, update)| update.target_order_id == order_id)
            .max_by_key(|(index, update)| (OrderedFloat(update.update_time), *index))
            .map(|(_, update)| update);

        Some(match latest {
            Some(update) => EffectiveOrder {
                order: &update.order,
                priority: info.priority,
                start_time: update.update_time,
            },
            None => EffectiveOrder {
                order: &info.order,
                priority: info.priority,
                start_time: info.start_time,
            },
        })
    }

    pub fn order_ids(&self) -> impl Iterator<Item = &str> {
        self.orders.keys().map(String::as_str)
    }
}
