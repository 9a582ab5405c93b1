//! Tolerances used when comparing expected and detected poses

/// Translation tolerance for kitting products (3 cm)
pub const KITTING_PRODUCT_TRANSLATION: f64 = 0.03;
/// Yaw tolerance for kitting products in radians
pub const KITTING_PRODUCT_YAW: f64 = 0.1;
/// Translation tolerance for the movable tray (10 cm)
pub const TRAY_TRANSLATION: f64 = 0.1;
/// Yaw tolerance for the movable tray in radians (about 20 degrees)
pub const TRAY_YAW: f64 = 0.35;
/// Translation tolerance for assembly products (2 cm)
pub const ASSEMBLY_PRODUCT_TRANSLATION: f64 = 0.02;
/// Yaw tolerance for assembly products in radians
pub const ASSEMBLY_PRODUCT_YAW: f64 = 0.2;
/// Two quaternions describe roughly the same rotation when |q1 . q2| is at least this
pub const QUATERNION_DOT_GATE: f64 = 0.95;
/// Largest product group scored by exhaustive permutation search
pub const PERMUTATION_SEARCH_LIMIT: usize = 8;

/// Acceptance window for a single pose comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTolerance {
    /// Planar distance must be strictly below this
    pub max_translation: f64,
    /// Yaw difference must be strictly below this after wraparound
    pub max_yaw: f64,
    /// Coarse orientation gate on |q1 . q2| (inclusive)
    pub min_quaternion_dot: f64,
}

impl PoseTolerance {
    pub fn new(max_translation: f64, max_yaw: f64) -> Self {
        Self {
            max_translation,
            max_yaw,
            min_quaternion_dot: QUATERNION_DOT_GATE,
        }
    }
}

/// Scoring configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub kitting_product: PoseTolerance,
    pub kitting_tray: PoseTolerance,
    pub assembly_product: PoseTolerance,
    /// Groups with more members than this fall back to bipartite matching
    pub permutation_search_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            kitting_product: PoseTolerance::new(KITTING_PRODUCT_TRANSLATION, KITTING_PRODUCT_YAW),
            kitting_tray: PoseTolerance::new(TRAY_TRANSLATION, TRAY_YAW),
            assembly_product: PoseTolerance::new(
                ASSEMBLY_PRODUCT_TRANSLATION,
                ASSEMBLY_PRODUCT_YAW,
            ),
            permutation_search_limit: PERMUTATION_SEARCH_LIMIT,
        }
    }
}
