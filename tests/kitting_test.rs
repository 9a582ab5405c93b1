//! Kitting shipment scoring

mod common;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use common::{detected, detected_kit, expected, expected_kit};
use shipment_scoring::scoring::{
    best_assignment_by_matching, best_assignment_by_permutation, score_kitting_shipment,
    CompatibilityMatrix, DetectedProduct, MovableTray, Pose, ScoringConfig, ScoringIssue,
};

const SHIPMENT: &str = "order_0_kitting_shipment_0";

#[test]
fn test_perfect_single_product_kit() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv2",
        "as1",
        vec![expected("assembly_battery_blue", 0.1, -0.1, 0.5)],
    );
    let submitted = detected_kit(
        "agv2",
        "as1",
        vec![detected("assembly_battery_blue", 0.1, -0.1, 0.5)],
    );

    let score = score_kitting_shipment(12.0, &kit, &submitted, &config);

    assert!(score.is_submitted);
    assert_eq!(score.submit_time, 12.0);
    assert!(score.has_correct_carrier);
    assert!(score.has_correct_station);
    assert!(score.has_correct_tray_type);
    assert!(score.has_correct_tray_pose);
    assert_eq!(score.product_type_presence, 1);
    assert_eq!(score.product_type_and_variant_presence, 1);
    assert_eq!(score.product_pose, 1);
    assert!(!score.has_missing_products);
    assert!(!score.has_unwanted_product);
    assert!(score.is_complete);
    assert_eq!(score.all_products_bonus, 1);
    assert_eq!(score.total(), 4);
    assert!(score.issues.is_empty());
}

#[test]
fn test_wrong_variant_counts_type_only() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv2",
        "as1",
        vec![expected("assembly_battery_blue", 0.1, 0.1, 0.0)],
    );
    let submitted = detected_kit(
        "agv2",
        "as1",
        vec![detected("assembly_battery_red", 0.1, 0.1, 0.0)],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert_eq!(score.product_type_presence, 1);
    assert_eq!(score.product_type_and_variant_presence, 0);
    assert!(score.has_unwanted_product);
    assert!(score.has_missing_products);
    // A wrong-variant product in the right place still earns its pose point
    assert_eq!(score.product_pose, 1);
    assert_eq!(score.all_products_bonus, 0);
}

#[test]
fn test_missing_product_marks_incomplete() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv1",
        "as2",
        vec![
            expected("assembly_sensor_green", 0.0, 0.0, 0.0),
            expected("assembly_sensor_green", 0.2, 0.0, 0.0),
        ],
    );
    let submitted = detected_kit(
        "agv1",
        "as2",
        vec![detected("assembly_sensor_green", 0.2, 0.0, 0.0)],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert!(score.has_missing_products);
    assert!(!score.is_complete);
    assert_eq!(score.product_type_presence, 1);
    assert_eq!(score.product_type_and_variant_presence, 1);
    assert_eq!(score.product_pose, 1);
    assert_eq!(score.all_products_bonus, 0);
}

#[test]
fn test_extra_product_is_unwanted() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv1",
        "as2",
        vec![expected("assembly_pump_red", 0.0, 0.0, 0.0)],
    );
    let submitted = detected_kit(
        "agv1",
        "as2",
        vec![
            detected("assembly_pump_red", 0.0, 0.0, 0.0),
            detected("assembly_pump_red", 0.2, 0.0, 0.0),
        ],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert!(score.has_unwanted_product);
    assert!(score.is_complete);
    assert_eq!(score.product_type_and_variant_presence, 1);
    assert_eq!(score.product_pose, 1);
    assert_eq!(score.all_products_bonus, 0);
}

#[test]
fn test_faulty_products_are_excluded() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv3",
        "as3",
        vec![expected("assembly_regulator_blue", 0.0, 0.0, 0.0)],
    );
    let submitted = detected_kit(
        "agv3",
        "as3",
        vec![DetectedProduct::faulty(
            "assembly_regulator_blue",
            Pose::planar(0.0, 0.0, 0.0),
        )],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert!(score.has_faulty_product);
    assert_eq!(score.product_type_presence, 0);
    assert_eq!(score.product_type_and_variant_presence, 0);
    assert_eq!(score.product_pose, 0);
    assert!(score.has_missing_products);
    assert_eq!(score.all_products_bonus, 0);
}

#[test]
fn test_faulty_alongside_good_product_blocks_bonus() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv3",
        "as3",
        vec![expected("assembly_regulator_blue", 0.0, 0.0, 0.0)],
    );
    let submitted = detected_kit(
        "agv3",
        "as3",
        vec![
            detected("assembly_regulator_blue", 0.0, 0.0, 0.0),
            DetectedProduct::faulty("assembly_regulator_blue", Pose::planar(0.2, 0.0, 0.0)),
        ],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert!(score.has_faulty_product);
    assert!(!score.has_unwanted_product);
    assert_eq!(score.product_pose, 1);
    assert_eq!(score.all_products_bonus, 0);
}

#[test]
fn test_any_carrier_accepts_every_agv() {
    let config = ScoringConfig::default();
    let kit = expected_kit(SHIPMENT, "any", "as4", vec![]);
    for carrier in ["agv1", "agv2", "agv3", "agv4"] {
        let submitted = detected_kit(carrier, "as4", vec![]);
        let score = score_kitting_shipment(1.0, &kit, &submitted, &config);
        assert!(score.has_correct_carrier, "carrier {} rejected", carrier);
    }
}

#[test]
fn test_wrong_carrier_zeroes_total() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv2",
        "as1",
        vec![expected("assembly_battery_blue", 0.1, 0.1, 0.0)],
    );
    let submitted = detected_kit(
        "agv4",
        "as1",
        vec![detected("assembly_battery_blue", 0.1, 0.1, 0.0)],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert!(!score.has_correct_carrier);
    assert_eq!(score.product_pose, 1);
    assert_eq!(score.total(), 0);
}

#[test]
fn test_unknown_carrier_and_station_are_reported() {
    let config = ScoringConfig::default();
    let kit = expected_kit(SHIPMENT, "agv9", "as7", vec![]);

    let score = score_kitting_shipment(1.0, &kit, &detected_kit("agv9", "as7", vec![]), &config);

    assert!(!score.has_correct_carrier);
    assert!(!score.has_correct_station);
    assert_eq!(
        score.issues,
        vec![
            ScoringIssue::UnknownCarrier {
                shipment_type: SHIPMENT.to_string(),
                carrier: "agv9".to_string(),
            },
            ScoringIssue::UnknownStation {
                shipment_type: SHIPMENT.to_string(),
                station: "as7".to_string(),
            },
        ]
    );
}

#[test]
fn test_tray_checks() {
    let config = ScoringConfig::default();
    let kit = expected_kit(SHIPMENT, "agv1", "as1", vec![]);

    let mut submitted = detected_kit("agv1", "as1", vec![]);
    submitted.movable_tray =
        MovableTray::new("movable_tray_dark_wood", Pose::planar(0.2, 0.0, 0.0));
    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);
    assert!(!score.has_correct_tray_type);
    assert!(!score.has_correct_tray_position);
    assert!(score.has_correct_tray_orientation);
    assert!(!score.has_correct_tray_pose);

    submitted.movable_tray = MovableTray::new(common::TRAY, Pose::planar(0.05, 0.0, 0.5));
    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);
    assert!(score.has_correct_tray_type);
    assert!(score.has_correct_tray_position);
    assert!(!score.has_correct_tray_orientation);
    assert!(!score.has_correct_tray_pose);
}

#[test]
fn test_optimal_pairing_beats_list_order() {
    // The first detected product fits both slots, the second fits only the
    // first slot. Pairing in list order would place one product; the best
    // pairing places both.
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv1",
        "as1",
        vec![
            expected("assembly_battery_blue", 0.0, 0.0, 0.0),
            expected("assembly_battery_blue", 0.04, 0.0, 0.0),
        ],
    );
    let submitted = detected_kit(
        "agv1",
        "as1",
        vec![
            detected("assembly_battery_blue", 0.02, 0.0, 0.0),
            detected("assembly_battery_blue", -0.02, 0.0, 0.0),
        ],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert_eq!(score.product_pose, 2);
    assert_eq!(score.all_products_bonus, 2);
}

fn mixed_kit() -> (
    shipment_scoring::scoring::ExpectedKittingShipment,
    shipment_scoring::scoring::DetectedKittingShipment,
) {
    let kit = expected_kit(
        SHIPMENT,
        "agv2",
        "as2",
        vec![
            expected("assembly_battery_blue", 0.0, 0.0, 0.0),
            expected("assembly_battery_blue", 0.04, 0.0, 0.0),
            expected("assembly_sensor_red", 0.2, 0.1, 1.0),
            expected("assembly_sensor_red", 0.2, -0.1, -1.0),
            expected("assembly_pump_green", -0.2, 0.0, 3.1),
        ],
    );
    let submitted = detected_kit(
        "agv2",
        "as2",
        vec![
            detected("assembly_battery_blue", 0.02, 0.0, 0.0),
            detected("assembly_battery_blue", -0.02, 0.0, 0.0),
            detected("assembly_sensor_red", 0.2, -0.1, -1.0),
            detected("assembly_sensor_red", 0.2, 0.1, 0.5),
            detected("assembly_pump_green", -0.2, 0.0, -3.13),
            detected("assembly_pump_blue", -0.3, 0.0, 0.0),
        ],
    );
    (kit, submitted)
}

#[test]
fn test_pose_score_is_permutation_invariant() {
    let config = ScoringConfig::default();
    let (kit, submitted) = mixed_kit();
    let baseline = score_kitting_shipment(1.0, &kit, &submitted, &config);
    assert_eq!(baseline.product_pose, 4);

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..25 {
        let mut shuffled_kit = kit.clone();
        let mut shuffled_submission = submitted.clone();
        shuffled_kit.products.shuffle(&mut rng);
        shuffled_submission.products.shuffle(&mut rng);

        let score = score_kitting_shipment(1.0, &shuffled_kit, &shuffled_submission, &config);
        assert_eq!(score.product_pose, baseline.product_pose);
        assert_eq!(
            score.product_type_and_variant_presence,
            baseline.product_type_and_variant_presence
        );
    }
}

#[test]
fn test_matching_fallback_gives_same_kit_score() {
    let (kit, submitted) = mixed_kit();
    let exhaustive = score_kitting_shipment(1.0, &kit, &submitted, &ScoringConfig::default());
    let matched = score_kitting_shipment(
        1.0,
        &kit,
        &submitted,
        &ScoringConfig {
            permutation_search_limit: 0,
            ..ScoringConfig::default()
        },
    );
    assert_eq!(exhaustive, matched);
}

#[test]
fn test_permutation_search_agrees_with_matching() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let expected = rng.random_range(0..=6);
        let detected = rng.random_range(0..=6);
        let matrix = CompatibilityMatrix::from_fn(expected, detected, |_, _| rng.random_bool(0.4));
        assert_eq!(
            best_assignment_by_permutation(&matrix),
            best_assignment_by_matching(&matrix)
        );
    }
}

#[test]
fn test_empty_kit_scores_zero_bonus() {
    let config = ScoringConfig::default();
    let kit = expected_kit(SHIPMENT, "agv1", "as1", vec![]);
    let score = score_kitting_shipment(1.0, &kit, &detected_kit("agv1", "as1", vec![]), &config);
    assert!(score.is_complete);
    assert_eq!(score.all_products_bonus, 0);
    assert_eq!(score.total(), 0);
}

#[test]
fn test_wrong_variant_near_two_slots_earns_one_pose_point() {
    let config = ScoringConfig::default();
    let kit = expected_kit(
        SHIPMENT,
        "agv1",
        "as1",
        vec![
            expected("assembly_battery_blue", 0.0, 0.0, 0.0),
            expected("assembly_battery_blue", 0.02, 0.0, 0.0),
        ],
    );
    // Within 3 cm of both expected slots
    let submitted = detected_kit(
        "agv1",
        "as1",
        vec![detected("assembly_battery_red", 0.01, 0.0, 0.0)],
    );

    let score = score_kitting_shipment(1.0, &kit, &submitted, &config);

    assert_eq!(score.product_type_presence, 1);
    assert_eq!(score.product_type_and_variant_presence, 0);
    assert_eq!(score.product_pose, 1);
    assert!(score.has_unwanted_product);
    assert!(score.has_missing_products);
    assert_eq!(score.all_products_bonus, 0);
}
