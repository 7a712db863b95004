//! Model Feature Schema
//!
//! The column layout is fixed by the window radius: one contiguous block per
//! feature kind, ascending lag within each block. This matches
//! [`crate::WindowFeatureRow::feature_vector`].

/// Model features derived per lag: 4 positional differences, 2 ratios,
/// 4 velocities, 2 accelerations
pub const FEATURES_PER_LAG: usize = 12;

/// Feature kinds in column order, one block per kind
const FEATURE_KINDS: [&str; FEATURES_PER_LAG] = [
    "x_diff_back",
    "x_diff_fwd",
    "x_ratio",
    "y_diff_back",
    "y_diff_fwd",
    "y_ratio",
    "vx_back",
    "vy_back",
    "vx_fwd",
    "vy_fwd",
    "ax",
    "ay",
];

/// Number of model features for a given window radius
pub fn feature_count(radius: usize) -> usize {
    FEATURES_PER_LAG * (radius - 1)
}

/// Ordered column names for a given window radius
pub fn column_names(radius: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(feature_count(radius));
    for kind in FEATURE_KINDS {
        for lag in 1..radius {
            names.push(format!("{kind}_{lag}"));
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_matches_feature_count() {
        for radius in 2..6 {
            assert_eq!(column_names(radius).len(), feature_count(radius));
        }
    }

    #[test]
    fn test_column_order_radius_three() {
        let names = column_names(3);
        assert_eq!(names.len(), 24);
        assert_eq!(names[0], "x_diff_back_1");
        assert_eq!(names[1], "x_diff_back_2");
        assert_eq!(names[2], "x_diff_fwd_1");
        assert_eq!(names[23], "ay_2");
    }
}
