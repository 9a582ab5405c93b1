//! Append-only record of every submitted shipment

use std::collections::HashSet;

use super::types::{DetectedAssemblyShipment, DetectedKittingShipment, SimTime};

/// A kitting shipment as submitted
#[derive(Debug, Clone)]
pub struct KittingShipmentRecord {
    pub submit_time: SimTime,
    pub shipment_type: String,
    pub shipment: DetectedKittingShipment,
}

/// An assembly shipment as submitted
#[derive(Debug, Clone)]
pub struct AssemblyShipmentRecord {
    pub submit_time: SimTime,
    pub shipment_type: String,
    pub shipment: DetectedAssemblyShipment,
    /// Station the submission was physically made at
    pub station: String,
}

/// Anything the log can search by type and time
pub trait ShipmentRecord {
    fn submit_time(&self) -> SimTime;
    fn shipment_type(&self) -> &str;
}

impl ShipmentRecord for KittingShipmentRecord {
    fn submit_time(&self) -> SimTime {
        self.submit_time
    }

    fn shipment_type(&self) -> &str {
        &self.shipment_type
    }
}

impl ShipmentRecord for AssemblyShipmentRecord {
    fn submit_time(&self) -> SimTime {
        self.submit_time
    }

    fn shipment_type(&self) -> &str {
        &self.shipment_type
    }
}

/// Submitted shipments in arrival order plus the collision flag
#[derive(Debug, Default)]
pub struct ShipmentLog {
    kitting: Vec<KittingShipmentRecord>,
    assembly: Vec<AssemblyShipmentRecord>,
    /// Time of the first recorded collision
    collision_time: Option<SimTime>,
}

impl ShipmentLog {
    pub fn record_kitting_shipment(
        &mut self,
        time: SimTime,
        shipment_type: impl Into<String>,
        shipment: DetectedKittingShipment,
    ) {
        self.kitting.push(KittingShipmentRecord {
            submit_time: time,
            shipment_type: shipment_type.into(),
            shipment,
        });
    }

    pub fn record_assembly_shipment(
        &mut self,
        time: SimTime,
        shipment_type: impl Into<String>,
        shipment: DetectedAssemblyShipment,
        actual_station: impl Into<String>,
    ) {
        self.assembly.push(AssemblyShipmentRecord {
            submit_time: time,
            shipment_type: shipment_type.into(),
            shipment,
            station: actual_station.into(),
        });
    }

    pub fn record_collision(&mut self, time: SimTime) {
        self.collision_time.get_or_insert(time);
    }

    pub fn kitting(&self) -> &[KittingShipmentRecord] {
        &self.kitting
    }

    pub fn assembly(&self) -> &[AssemblyShipmentRecord] {
        &self.assembly
    }

    pub fn had_collision(&self) -> bool {
        self.collision_time.is_some()
    }

    pub fn collision_time(&self) -> Option<SimTime> {
        self.collision_time
    }
}

/// Index of the first record of `shipment_type` submitted at or after
/// `start_time` that is not in `claimed`.
pub fn first_unclaimed<R: ShipmentRecord>(
    records: &[R],
    shipment_type: &str,
    start_time: SimTime,
    claimed: &HashSet<usize>,
) -> Option<usize> {
    records.iter().enumerate().find_map(|(index, record)| {
        let eligible = record.shipment_type() == shipment_type
            && record.submit_time() >= start_time
            && !claimed.contains(&index);
        eligible.then_some(index)
    })
}
