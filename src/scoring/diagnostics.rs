//! Data inconsistencies found while ingesting events or scoring shipments
//!
//! None of these stop scoring. Each one is logged where it is detected and
//! kept so callers can inspect it next to the score.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringIssue {
    #[error("order with duplicate id '{order_id}'; overwriting")]
    DuplicateOrder { order_id: String },
    #[error("update for unknown order '{order_id}'; ignoring")]
    UnknownOrderUpdate { order_id: String },
    #[error("order '{order_id}' contains duplicate shipment type '{shipment_type}'")]
    DuplicateShipmentType {
        order_id: String,
        shipment_type: String,
    },
    #[error("shipment '{shipment_type}' expects unknown carrier '{carrier}'")]
    UnknownCarrier {
        shipment_type: String,
        carrier: String,
    },
    #[error("shipment '{shipment_type}' expects unknown station '{station}'")]
    UnknownStation {
        shipment_type: String,
        station: String,
    },
}
