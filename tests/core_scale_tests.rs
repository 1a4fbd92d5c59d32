use approx::assert_abs_diff_eq;
use meshline::ChartError;
use meshline::core::LinearScale;

#[test]
fn forward_maps_domain_endpoints_to_range_endpoints() {
    let scale = LinearScale::new(-5.0, 15.0, 100.0, 300.0).expect("valid scale");

    assert_eq!(scale.forward(-5.0), 100.0);
    assert_eq!(scale.forward(15.0), 300.0);
    assert_abs_diff_eq!(scale.forward(5.0), 200.0, epsilon = 1e-12);
}

#[test]
fn inverse_undoes_forward() {
    let scale = LinearScale::new(10.0, 110.0, 0.0, 1000.0).expect("valid scale");

    let value = 42.5;
    let px = scale.forward(value);
    assert_abs_diff_eq!(scale.inverse(px), value, epsilon = 1e-9);
}

#[test]
fn reversed_range_maps_larger_values_upwards() {
    let scale = LinearScale::new(0.0, 40.0, 600.0, 0.0).expect("valid scale");

    assert_eq!(scale.forward(0.0), 600.0);
    assert_eq!(scale.forward(40.0), 0.0);
    assert!(!scale.is_increasing());
}

#[test]
fn degenerate_and_non_finite_domains_are_rejected() {
    assert!(matches!(
        LinearScale::new(1.0, 1.0, 0.0, 10.0),
        Err(ChartError::DegenerateDomain { .. })
    ));
    assert!(LinearScale::new(f64::NAN, 1.0, 0.0, 10.0).is_err());
    assert!(LinearScale::new(0.0, 1.0, 0.0, f64::INFINITY).is_err());
}

#[test]
fn widened_scale_keeps_flat_series_finite() {
    let scale = LinearScale::new_widened(7.0, 7.0, 0.0, 200.0).expect("widened scale");

    let px = scale.forward(7.0);
    assert!(px.is_finite());
    assert_abs_diff_eq!(px, 100.0, epsilon = 1e-12);
}

#[test]
fn widened_scale_keeps_large_flat_domain_distinct() {
    let scale = LinearScale::new_widened(1e17, 1e17, 0.0, 600.0).expect("widened scale");

    let (start, end) = scale.domain();
    assert!(start < 1e17);
    assert!(end > 1e17);
    assert_abs_diff_eq!(scale.forward(1e17), 300.0, epsilon = 1e-6);
}
