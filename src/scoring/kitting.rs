//! Kitting shipment scoring
//!
//! Compares the kit a participant submitted on a carrier with the kit an order
//! asked for: tray, carrier and station first, then the products on the tray.
//! Products are paired optimally within each identifier group so that the
//! number of correctly placed products does not depend on list order.

use log::{debug, error};
use std::collections::BTreeMap;

use super::assignment::{best_assignment, CompatibilityMatrix};
use super::config::ScoringConfig;
use super::diagnostics::ScoringIssue;
use super::geometry::{compare_poses, pose_matches};
use super::identifier::{parse_carrier_target, parse_station, ProductKey};
use super::score::KittingShipmentScore;
use super::types::{
    DetectedKittingShipment, DetectedProduct, ExpectedKittingShipment, ExpectedProduct, SimTime,
};

/// Indices of expected and detected products sharing one identifier
#[derive(Debug, Default)]
struct ProductGroup {
    expected: Vec<usize>,
    detected: Vec<usize>,
}

/// Score a submitted kit against the kit an order expects
pub fn score_kitting_shipment(
    submit_time: SimTime,
    expected: &ExpectedKittingShipment,
    detected: &DetectedKittingShipment,
    config: &ScoringConfig,
) -> KittingShipmentScore {
    let mut score = KittingShipmentScore {
        is_submitted: true,
        submit_time,
        carrier: detected.carrier.clone(),
        ..KittingShipmentScore::not_submitted(&expected.shipment_type)
    };

    score_tray(&mut score, expected, detected, config);
    score_destination(&mut score, expected, detected);

    let (faulty, non_faulty): (Vec<&DetectedProduct>, Vec<&DetectedProduct>) =
        detected.products.iter().partition(|product| product.is_faulty);
    score.has_faulty_product = !faulty.is_empty();

    let expected_keys: Vec<ProductKey> = expected
        .products
        .iter()
        .map(|product| ProductKey::from_kitting_identifier(&product.product_type))
        .collect();
    let detected_keys: Vec<ProductKey> = non_faulty
        .iter()
        .map(|product| ProductKey::from_kitting_identifier(&product.product_type))
        .collect();

    score.product_type_presence = count_type_presence(&expected_keys, &detected_keys);

    let mut groups: BTreeMap<&ProductKey, ProductGroup> = BTreeMap::new();
    for (index, key) in expected_keys.iter().enumerate() {
        groups.entry(key).or_default().expected.push(index);
    }
    let mut wrong_variant = Vec::new();
    for (index, key) in detected_keys.iter().enumerate() {
        match groups.get_mut(key) {
            Some(group) => group.detected.push(index),
            None => {
                score.has_unwanted_product = true;
                wrong_variant.push(index);
            }
        }
    }

    for (key, group) in &groups {
        if group.expected.len() > group.detected.len() {
            score.has_missing_products = true;
        } else if group.expected.len() < group.detected.len() {
            score.has_unwanted_product = true;
        }
        if group.detected.is_empty() {
            continue;
        }

        score.product_type_and_variant_presence +=
            group.expected.len().min(group.detected.len()) as u32;

        let matrix = CompatibilityMatrix::from_fn(
            group.expected.len(),
            group.detected.len(),
            |e, d| {
                pose_matches(
                    &expected.products[group.expected[e]].pose,
                    &non_faulty[group.detected[d]].pose,
                    &config.kitting_product,
                )
            },
        );
        let placed = best_assignment(&matrix, config.permutation_search_limit);
        debug!(
            "Kit {} group {}_{}: {} of {} placed",
            expected.shipment_type,
            key.category,
            key.variant,
            placed,
            group.expected.len()
        );
        score.product_pose += placed as u32;
    }

    // Wrong-variant products still earn a point for a correct placement
    for &index in &wrong_variant {
        let product = non_faulty[index];
        let key = &detected_keys[index];
        if placed_like_expected(product, key, &expected.products, &expected_keys, config) {
            score.product_pose += 1;
        }
    }

    score.is_complete = !score.has_missing_products;

    let expected_count = expected.products.len() as u32;
    if !score.has_faulty_product
        && !score.has_unwanted_product
        && !score.has_missing_products
        && score.product_pose == expected_count
        && score.product_type_and_variant_presence == expected_count
    {
        score.all_products_bonus = expected_count;
    }

    score
}

fn score_tray(
    score: &mut KittingShipmentScore,
    expected: &ExpectedKittingShipment,
    detected: &DetectedKittingShipment,
    config: &ScoringConfig,
) {
    score.has_correct_tray_type =
        expected.movable_tray.tray_type == detected.movable_tray.tray_type;
    let check = compare_poses(
        &expected.movable_tray.pose,
        &detected.movable_tray.pose,
        &config.kitting_tray,
    );
    score.has_correct_tray_position = check.position_ok;
    score.has_correct_tray_orientation = check.orientation_ok;
    score.has_correct_tray_pose = check.is_ok();
}

fn score_destination(
    score: &mut KittingShipmentScore,
    expected: &ExpectedKittingShipment,
    detected: &DetectedKittingShipment,
) {
    match parse_carrier_target(&expected.carrier) {
        Some(target) => score.has_correct_carrier = target.accepts(&detected.carrier),
        None => {
            error!(
                "Shipment {} expects an invalid carrier: {}",
                expected.shipment_type, expected.carrier
            );
            score.issues.push(ScoringIssue::UnknownCarrier {
                shipment_type: expected.shipment_type.clone(),
                carrier: expected.carrier.clone(),
            });
        }
    }

    match parse_station(&expected.station) {
        Some(station) => score.has_correct_station = station == detected.station,
        None => {
            error!(
                "Shipment {} expects an invalid station: {}",
                expected.shipment_type, expected.station
            );
            score.issues.push(ScoringIssue::UnknownStation {
                shipment_type: expected.shipment_type.clone(),
                station: expected.station.clone(),
            });
        }
    }
}

/// Greedy one-to-one pairing on category alone, in expected-list order
fn count_type_presence(expected: &[ProductKey], detected: &[ProductKey]) -> u32 {
    let mut available = vec![true; detected.len()];
    let mut count = 0;
    for key in expected {
        let found = detected
            .iter()
            .enumerate()
            .position(|(index, candidate)| available[index] && candidate.same_category(key));
        if let Some(index) = found {
            available[index] = false;
            count += 1;
        }
    }
    count
}

fn placed_like_expected(
    product: &DetectedProduct,
    key: &ProductKey,
    expected_products: &[ExpectedProduct],
    expected_keys: &[ProductKey],
    config: &ScoringConfig,
) -> bool {
    expected_products
        .iter()
        .zip(expected_keys)
        .filter(|(_, expected_key)| expected_key.same_category(key))
        .any(|(expected_product, _)| {
            pose_matches(&expected_product.pose, &product.pose, &config.kitting_product)
        })
}
