use float_cmp::{approx_eq, F64Margin};

/// Compare two arrays of f64
pub(crate) fn assert_approx_array_eq(calculated_values: &[f64], expected_values: &[f64]) {
    assert_eq!(
        calculated_values.len(),
        expected_values.len(),
        "arrays have different lengths"
    );
    let margins = F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    };
    for (i, (calculated, expected)) in calculated_values.iter().zip(expected_values).enumerate() {
        if !approx_eq!(f64, *calculated, *expected, margins) {
            panic!(
                r#"assertion failed on item #{i:?}
                    actual: `{calculated:?}`,
                    expected: `{expected:?}`"#,
            )
        }
    }
}
