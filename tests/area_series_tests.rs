use chart_editor::core::{ProjectedPoint, project_range_band};

fn point(row: usize, x: f64, y: f64) -> ProjectedPoint {
    ProjectedPoint {
        row,
        x,
        y,
        value: 0.0,
    }
}

#[test]
fn outline_runs_upper_forward_then_lower_backward() {
    let upper = [point(0, 0.0, 10.0), point(1, 10.0, 12.0), point(2, 20.0, 8.0)];
    let lower = [point(0, 0.0, 30.0), point(1, 10.0, 35.0), point(2, 20.0, 28.0)];
    let band = project_range_band(&upper, &lower);

    assert!(!band.is_empty());
    assert_eq!(
        band.outline(),
        vec![
            (0.0, 10.0),
            (10.0, 12.0),
            (20.0, 8.0),
            (20.0, 28.0),
            (10.0, 35.0),
            (0.0, 30.0),
        ]
    );
}

#[test]
fn rows_missing_a_boundary_are_dropped_on_both_sides() {
    let upper = [point(0, 0.0, 10.0), point(1, 10.0, 12.0), point(2, 20.0, 8.0)];
    let lower = [point(0, 0.0, 30.0), point(2, 20.0, 28.0)];
    let band = project_range_band(&upper, &lower);

    assert_eq!(band.upper, vec![(0.0, 10.0), (20.0, 8.0)]);
    assert_eq!(band.lower, vec![(0.0, 30.0), (20.0, 28.0)]);
}

#[test]
fn disjoint_boundaries_give_an_empty_band() {
    let band = project_range_band(&[point(0, 0.0, 1.0)], &[point(1, 0.0, 2.0)]);
    assert!(band.is_empty());
    assert!(band.outline().is_empty());
}
