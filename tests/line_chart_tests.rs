use std::cell::RefCell;
use std::rc::Rc;

use meshline::core::{RawSample, Sample, SampleKind, Viewport};
use meshline::interaction::{HoverState, HoverValue};
use meshline::render::{MeshPaint, NullRenderer};
use meshline::{ChartConfig, ChartError, DownsampleMode, LineChart};

const REFERENCE: [f64; 5] = [5.0, 20.0, 15.0, 40.0, 10.0];

fn reference_config() -> ChartConfig {
    ChartConfig::from_values(Viewport::new(300, 150), &REFERENCE)
        .with_downsample(DownsampleMode::Disabled)
}

fn interactive_chart() -> LineChart<NullRenderer> {
    LineChart::new(
        NullRenderer::default(),
        reference_config().with_interactive(true),
    )
    .expect("chart init")
}

#[test]
fn init_prepares_device_surface_and_draws() {
    let chart = LineChart::new(NullRenderer::default(), reference_config()).expect("chart init");

    let renderer = chart.renderer();
    assert_eq!(renderer.surface_size, Some((600, 300)));
    assert_eq!(renderer.live_handles().len(), 2);
    assert_eq!(renderer.present_count, 1);
    assert_eq!(renderer.drawn_triangle_count(), 16);
    assert_eq!(chart.sample_kind(), SampleKind::Values);

    let geometry = chart.geometry().expect("geometry");
    assert_eq!(geometry.meshes.stroke.triangle_count(), 8);
    assert_eq!(geometry.bounds.lower, 2.0);
    assert_eq!(geometry.bounds.upper, 43.0);
}

#[test]
fn fill_uses_gradient_and_stroke_is_solid() {
    let chart = LineChart::new(NullRenderer::default(), reference_config()).expect("chart init");

    let renderer = chart.renderer();
    let paints: Vec<MeshPaint> = renderer
        .live_handles()
        .into_iter()
        .filter_map(|handle| renderer.mesh(handle))
        .map(|mesh| mesh.paint)
        .collect();

    assert!(matches!(paints[0], MeshPaint::VerticalGradient { .. }));
    assert!(matches!(paints[1], MeshPaint::Solid(_)));
}

#[test]
fn scales_map_data_onto_the_device_surface() {
    let chart = LineChart::new(NullRenderer::default(), reference_config()).expect("chart init");

    assert_eq!(chart.map_x_to_pixel(0.0).expect("x"), 0.0);
    assert_eq!(chart.map_x_to_pixel(4.0).expect("x"), 600.0);
    assert_eq!(chart.map_y_to_pixel(2.0).expect("y"), 300.0);
    assert_eq!(chart.map_y_to_pixel(43.0).expect("y"), 0.0);

    let x = chart.map_pixel_to_x(150.0).expect("pixel to x");
    assert!((x - 1.0).abs() <= 1e-12);
    let y = chart.map_pixel_to_y(chart.map_y_to_pixel(20.0).expect("y")).expect("pixel to y");
    assert!((y - 20.0).abs() <= 1e-9);
}

#[test]
fn degenerate_series_draws_background_only() {
    let config = ChartConfig::from_values(Viewport::new(300, 150), &[7.0]);
    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    assert!(chart.geometry().is_none());
    assert!(chart.renderer().live_handles().is_empty());
    assert!(chart.renderer().last_clear_color.is_some());
    assert!(chart.map_x_to_pixel(0.0).is_err());

    let empty = ChartConfig::from_values(Viewport::new(300, 150), &[]);
    let chart = LineChart::new(NullRenderer::default(), empty).expect("chart init");
    assert!(chart.geometry().is_none());
}

#[test]
fn flat_series_still_builds_finite_geometry() {
    let config = ChartConfig::from_values(Viewport::new(300, 150), &[3.0, 3.0, 3.0]);
    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    let geometry = chart.geometry().expect("geometry");
    assert!(geometry.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn unavailable_backend_fails_init() {
    let err = LineChart::new(NullRenderer::unavailable(), reference_config())
        .err()
        .expect("init must fail");

    assert!(matches!(err, ChartError::BackendUnavailable(_)));
}

#[test]
fn mixed_input_is_rejected_at_init() {
    let config = ChartConfig::new(
        Viewport::new(300, 150),
        vec![RawSample::Value(1.0), RawSample::Pair([1.0, 2.0])],
    );

    let err = LineChart::new(NullRenderer::default(), config)
        .err()
        .expect("init must fail");
    assert!(matches!(err, ChartError::MixedSampleInput { index: 1 }));
}

#[test]
fn auto_downsample_targets_one_point_per_fifteen_device_pixels() {
    let values: Vec<f64> = (0..1_000).map(|i| (f64::from(i) * 0.1).sin()).collect();
    let config = ChartConfig::from_values(Viewport::new(300, 150), &values);

    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    let geometry = chart.geometry().expect("geometry");
    assert_eq!(geometry.reduced.len(), 40);
    assert_eq!(geometry.meshes.stroke.triangle_count(), 2 * 39);
    assert_eq!(chart.samples().len(), 1_000);
}

#[test]
fn smoothing_adds_arc_points() {
    let config = reference_config().with_smoothing(true);
    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    let geometry = chart.geometry().expect("geometry");
    assert_eq!(geometry.reduced.len(), 5);
    assert_eq!(geometry.rendered.len(), 2 + 3 * 5);
    assert_eq!(geometry.meshes.stroke.triangle_count(), 2 * 16);
}

#[test]
fn markers_add_a_third_layer() {
    let config = reference_config().with_markers(true);
    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    let geometry = chart.geometry().expect("geometry");
    let markers = geometry.markers.as_ref().expect("markers");
    assert_eq!(markers.triangle_count(), 2 * REFERENCE.len());
    assert_eq!(chart.renderer().live_handles().len(), 3);
}

#[test]
fn pointer_move_reports_nearest_value_and_draws_indicator() {
    let mut chart = interactive_chart();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    chart.on_hover(move |value| sink.borrow_mut().push(value));

    let hit = chart.pointer_move(75.0, 20.0).expect("pointer move").expect("hit");

    assert_eq!(hit.index, 1);
    assert_eq!(*seen.borrow(), vec![HoverValue::Value(20.0)]);
    assert_eq!(
        chart.hover_state(),
        HoverState::Active {
            index: 1,
            device_x: 150.0
        }
    );
    assert_eq!(chart.renderer().live_handles().len(), 3);
}

#[test]
fn repeated_moves_do_not_leak_hover_handles() {
    let mut chart = interactive_chart();

    for step in 0..50 {
        chart
            .pointer_move(f64::from(step) * 6.0, 10.0)
            .expect("pointer move");
    }

    let renderer = chart.renderer();
    assert_eq!(renderer.live_handles().len(), 3);
    assert_eq!(renderer.submit_count - renderer.release_count, 3);
}

#[test]
fn first_sample_indicator_is_pulled_inward() {
    let mut chart = interactive_chart();

    let hit = chart.pointer_move(0.0, 0.0).expect("pointer move").expect("hit");

    assert_eq!(hit.index, 0);
    assert_eq!(hit.indicator_x, 1.0);
}

#[test]
fn pointer_leave_clears_indicator_and_notifies() {
    let mut chart = interactive_chart();
    let leaves = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&leaves);
    chart.on_leave(move || *sink.borrow_mut() += 1);

    chart.pointer_move(150.0, 10.0).expect("pointer move");
    chart.pointer_leave().expect("pointer leave");

    assert_eq!(*leaves.borrow(), 1);
    assert_eq!(chart.hover_state(), HoverState::None);
    assert_eq!(chart.renderer().live_handles().len(), 2);
}

#[test]
fn pointer_outside_data_clears_hover_without_leave() {
    let mut chart = interactive_chart();
    let leaves = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&leaves);
    chart.on_leave(move || *sink.borrow_mut() += 1);

    chart.pointer_move(150.0, 10.0).expect("pointer move");
    let miss = chart.pointer_move(301.0, 10.0).expect("pointer move");

    assert!(miss.is_none());
    assert_eq!(chart.hover_state(), HoverState::None);
    assert_eq!(chart.renderer().live_handles().len(), 2);
    assert_eq!(*leaves.borrow(), 0);
}

#[test]
fn non_interactive_chart_ignores_pointer() {
    let mut chart = LineChart::new(NullRenderer::default(), reference_config()).expect("chart init");
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    chart.on_hover(move |_| *sink.borrow_mut() += 1);

    assert!(chart.pointer_move(75.0, 10.0).expect("pointer move").is_none());
    chart.pointer_leave().expect("pointer leave");

    assert_eq!(*calls.borrow(), 0);
    assert_eq!(chart.renderer().live_handles().len(), 2);
}

#[test]
fn set_data_rebuilds_and_switches_hover_shape() {
    let mut chart = interactive_chart();
    chart.pointer_move(75.0, 10.0).expect("pointer move");

    chart
        .set_data(vec![
            RawSample::from((10.0, 1.0)),
            RawSample::from((20.0, 3.0)),
            RawSample::from((30.0, 2.0)),
        ])
        .expect("set data");

    assert_eq!(chart.sample_kind(), SampleKind::Pairs);
    assert_eq!(chart.hover_state(), HoverState::None);
    assert_eq!(chart.renderer().live_handles().len(), 2);

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    chart.on_hover(move |value| *sink.borrow_mut() = Some(value));
    chart.pointer_move(150.0, 10.0).expect("pointer move");

    assert_eq!(*seen.borrow(), Some(HoverValue::Sample(Sample::new(20.0, 3.0))));
}

#[test]
fn set_data_rejects_decreasing_pairs_and_keeps_previous_series() {
    let mut chart = interactive_chart();

    let result = chart.set_data(vec![RawSample::from((2.0, 1.0)), RawSample::from((1.0, 1.0))]);

    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(chart.samples().len(), REFERENCE.len());
}

#[test]
fn resize_reacquires_surface_and_rebuilds() {
    let mut chart = LineChart::new(NullRenderer::default(), reference_config()).expect("chart init");

    chart.resize(Viewport::new(400, 200)).expect("resize");

    assert_eq!(chart.renderer().surface_size, Some((800, 400)));
    assert_eq!(chart.device_size(), (800, 400));
    assert_eq!(chart.map_x_to_pixel(4.0).expect("x"), 800.0);
    assert_eq!(chart.renderer().live_handles().len(), 2);
    assert!(chart.resize(Viewport::new(0, 10)).is_err());
}

#[test]
fn failed_set_data_keeps_previous_series_geometry_and_drawables() {
    let mut chart = interactive_chart();
    let previous_geometry = chart.geometry().cloned();
    let previous_handles = chart.renderer().live_handles();

    let result = chart.set_data(vec![
        RawSample::from((-1.7e308, 0.0)),
        RawSample::from((1.7e308, 1.0)),
    ]);

    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(chart.samples().len(), REFERENCE.len());
    assert_eq!(chart.sample_kind(), SampleKind::Values);
    assert_eq!(chart.config().data.len(), REFERENCE.len());
    assert_eq!(chart.geometry().cloned(), previous_geometry);
    assert_eq!(chart.renderer().live_handles(), previous_handles);

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    chart.on_hover(move |value| *sink.borrow_mut() = Some(value));
    let hit = chart.pointer_move(75.0, 10.0).expect("pointer move").expect("hit");
    assert_eq!(hit.sample, Sample::new(1.0, 20.0));
    assert_eq!(*seen.borrow(), Some(HoverValue::Value(20.0)));
}

#[test]
fn equal_large_timestamps_build_finite_geometry() {
    let config = ChartConfig::from_pairs(Viewport::new(300, 150), &[(1e17, 1.0), (1e17, 2.0)]);

    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    let geometry = chart.geometry().expect("geometry");
    let (start, end) = geometry.scale_x.domain();
    assert!(start < 1e17 && end > 1e17);
    assert!(geometry.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert_eq!(chart.renderer().live_handles().len(), 2);
}

#[test]
fn values_near_f64_max_build_finite_geometry() {
    let config = ChartConfig::from_values(Viewport::new(300, 150), &[0.0, 1.7e308]);

    let chart = LineChart::new(NullRenderer::default(), config).expect("chart init");

    let geometry = chart.geometry().expect("geometry");
    assert!(geometry.bounds.upper.is_finite());
    assert!(geometry.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert_eq!(chart.renderer().live_handles().len(), 2);
}
