//! Assembly shipment scoring
//!
//! Products are matched greedily: each expected product, in list order, takes
//! the first remaining detected product of its category that sits in the
//! right pose. Unlike kitting there is no search for a better pairing, so a
//! poor early choice can leave a later product unmatched.

use log::{debug, error};

use super::config::ScoringConfig;
use super::diagnostics::ScoringIssue;
use super::geometry::pose_matches;
use super::identifier::{parse_station, ProductKey};
use super::score::{AssemblyProductScore, AssemblyShipmentScore};
use super::types::{DetectedAssemblyShipment, DetectedProduct, ExpectedAssemblyShipment, SimTime};

/// Points per fully correct product when the whole assembly is correct
pub const ASSEMBLY_BONUS_PER_PRODUCT: u32 = 4;

/// Score a submitted assembly against the assembly an order expects.
///
/// `actual_station` is where the submission was made and overrides any
/// station recorded in the detected payload.
pub fn score_assembly_shipment(
    submit_time: SimTime,
    expected: &ExpectedAssemblyShipment,
    detected: &DetectedAssemblyShipment,
    actual_station: &str,
    config: &ScoringConfig,
) -> AssemblyShipmentScore {
    let mut score = AssemblyShipmentScore {
        is_submitted: true,
        submit_time,
        station: actual_station.to_string(),
        detected_product_count: detected.products.len(),
        expected_product_count: expected.products.len(),
        ..AssemblyShipmentScore::not_submitted(&expected.shipment_type)
    };

    match parse_station(&expected.station) {
        Some(station) => score.has_correct_station = station == actual_station,
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

    let (faulty, non_faulty): (Vec<&DetectedProduct>, Vec<&DetectedProduct>) =
        detected.products.iter().partition(|product| product.is_faulty);
    score.has_faulty_product = !faulty.is_empty();
    score.has_missing_product = non_faulty.len() < expected.products.len();
    score.is_complete = !score.has_missing_product;

    let detected_keys: Vec<ProductKey> = non_faulty
        .iter()
        .map(|product| ProductKey::from_assembly_identifier(&product.product_type))
        .collect();
    let mut remaining: Vec<usize> = (0..non_faulty.len()).collect();

    for expected_product in &expected.products {
        let expected_key = ProductKey::from_assembly_identifier(&expected_product.product_type);
        let mut first_of_category: Option<(usize, bool)> = None;
        let mut placed: Option<(usize, usize, bool)> = None;

        for (slot, &index) in remaining.iter().enumerate() {
            let candidate = &detected_keys[index];
            if !candidate.same_category(&expected_key) {
                continue;
            }
            let variant_ok = candidate.variant == expected_key.variant;
            if first_of_category.is_none() {
                first_of_category = Some((index, variant_ok));
                score.products_with_correct_type += 1;
                if variant_ok {
                    score.products_with_correct_variant += 1;
                } else {
                    score.has_unwanted_product = true;
                }
            }
            if pose_matches(
                &expected_product.pose,
                &non_faulty[index].pose,
                &config.assembly_product,
            ) {
                placed = Some((slot, index, variant_ok));
                break;
            }
        }

        match placed {
            Some((slot, index, variant_ok)) => {
                remaining.remove(slot);
                score.products_with_correct_pose += 1;
                let product = AssemblyProductScore {
                    is_correct_type: true,
                    is_correct_variant: variant_ok,
                    is_correct_pose: true,
                    success: if variant_ok { 3 } else { 2 },
                };
                let entry = score
                    .products
                    .entry(non_faulty[index].product_type.clone())
                    .or_default();
                if product.success >= entry.success {
                    *entry = product;
                }
            }
            None => {
                if let Some((index, variant_ok)) = first_of_category {
                    score
                        .products
                        .entry(non_faulty[index].product_type.clone())
                        .or_insert(AssemblyProductScore {
                            is_correct_type: true,
                            is_correct_variant: variant_ok,
                            is_correct_pose: false,
                            success: 0,
                        });
                }
            }
        }
    }

    // Counted over the breakdown, so repeated identifiers count once
    let fully_correct = score
        .products
        .values()
        .filter(|product| product.success == 3)
        .count();
    if fully_correct == expected.products.len() {
        score.all_products_bonus = ASSEMBLY_BONUS_PER_PRODUCT * fully_correct as u32;
    }

    debug!(
        "Assembly {} at {}: {} typed, {} posed, bonus {}",
        expected.shipment_type,
        actual_station,
        score.products_with_correct_type,
        score.products_with_correct_pose,
        score.all_products_bonus
    );

    score
}
