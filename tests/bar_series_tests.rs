use chart_editor::core::{
    BarLayout, BarOrientation, CategoryScale, LinearScale, PlotArea, bar_corner_radii,
    project_bars,
};

fn area() -> PlotArea {
    PlotArea::new(0.0, 0.0, 400.0, 200.0).expect("valid area")
}

fn categories(names: &[&str]) -> CategoryScale {
    CategoryScale::new(names.iter().map(|name| (*name).to_owned())).expect("categories")
}

fn layout(orientation: BarOrientation) -> BarLayout {
    BarLayout {
        orientation,
        band_ratio: 0.8,
        slot: 0,
        slots: 1,
        corner_radius: 8.0,
    }
}

#[test]
fn positive_and_negative_columns_share_the_zero_baseline() {
    let scale = LinearScale::new(-20.0, 20.0).expect("scale");
    let bars = project_bars(
        &[Some(10.0), Some(-5.0)],
        &categories(&["A", "B"]),
        scale,
        area(),
        layout(BarOrientation::Vertical),
    )
    .expect("bars");

    assert_eq!(bars.len(), 2);
    // zero sits at y = 100, ten is 50 px above it
    assert!((bars[0].y - 50.0).abs() <= 1e-9);
    assert!((bars[0].height - 50.0).abs() <= 1e-9);
    assert!((bars[0].handle_y - 50.0).abs() <= 1e-9);
    assert!((bars[1].y - 100.0).abs() <= 1e-9);
    assert!((bars[1].height - 25.0).abs() <= 1e-9);
    assert!((bars[1].handle_y - 125.0).abs() <= 1e-9);
}

#[test]
fn columns_are_centered_in_their_band() {
    let scale = LinearScale::new(0.0, 10.0).expect("scale");
    let bars = project_bars(
        &[Some(5.0), Some(5.0)],
        &categories(&["A", "B"]),
        scale,
        area(),
        layout(BarOrientation::Vertical),
    )
    .expect("bars");

    // band 200 px, column 160 px
    assert!((bars[0].x - 20.0).abs() <= 1e-9);
    assert!((bars[0].width - 160.0).abs() <= 1e-9);
    assert!((bars[0].handle_x - 100.0).abs() <= 1e-9);
    assert!((bars[1].handle_x - 300.0).abs() <= 1e-9);
}

#[test]
fn missing_values_produce_no_bar() {
    let scale = LinearScale::new(0.0, 10.0).expect("scale");
    let bars = project_bars(
        &[Some(1.0), None, Some(3.0)],
        &categories(&["A", "B", "C"]),
        scale,
        area(),
        layout(BarOrientation::Vertical),
    )
    .expect("bars");

    let rows: Vec<usize> = bars.iter().map(|bar| bar.row).collect();
    assert_eq!(rows, vec![0, 2]);
}

#[test]
fn horizontal_bars_grow_to_the_right() {
    let scale = LinearScale::new(0.0, 40.0).expect("scale");
    let bars = project_bars(
        &[Some(10.0), Some(30.0)],
        &categories(&["A", "B"]),
        scale,
        area(),
        layout(BarOrientation::Horizontal),
    )
    .expect("bars");

    assert!((bars[0].x - 0.0).abs() <= 1e-9);
    assert!((bars[0].width - 100.0).abs() <= 1e-9);
    assert!((bars[0].handle_x - 100.0).abs() <= 1e-9);
    assert!((bars[1].handle_x - 300.0).abs() <= 1e-9);
    // bands run down the vertical axis, 100 px each
    assert!((bars[0].handle_y - 50.0).abs() <= 1e-9);
    assert!((bars[0].height - 80.0).abs() <= 1e-9);
}

#[test]
fn baseline_clamps_to_domain_when_zero_is_outside() {
    let scale = LinearScale::new(10.0, 20.0).expect("scale");
    let bars = project_bars(
        &[Some(15.0)],
        &categories(&["A"]),
        scale,
        area(),
        layout(BarOrientation::Vertical),
    )
    .expect("bars");

    assert!((bars[0].y + bars[0].height - 200.0).abs() <= 1e-9);
    assert!((bars[0].height - 100.0).abs() <= 1e-9);
}

#[test]
fn clustered_slots_split_the_band() {
    let scale = LinearScale::new(0.0, 10.0).expect("scale");
    let names = categories(&["A", "B"]);
    let first = project_bars(
        &[Some(5.0)],
        &names,
        scale,
        area(),
        BarLayout {
            slot: 0,
            slots: 2,
            ..layout(BarOrientation::Vertical)
        },
    )
    .expect("first slot");
    let second = project_bars(
        &[Some(5.0)],
        &names,
        scale,
        area(),
        BarLayout {
            slot: 1,
            slots: 2,
            ..layout(BarOrientation::Vertical)
        },
    )
    .expect("second slot");

    assert!((first[0].width - 80.0).abs() <= 1e-9);
    assert!((second[0].x - (first[0].x + 80.0)).abs() <= 1e-9);
}

#[test]
fn invalid_layouts_are_rejected() {
    let scale = LinearScale::new(0.0, 10.0).expect("scale");
    let names = categories(&["A"]);
    for bad in [
        BarLayout {
            band_ratio: 0.0,
            ..layout(BarOrientation::Vertical)
        },
        BarLayout {
            band_ratio: 1.5,
            ..layout(BarOrientation::Vertical)
        },
        BarLayout {
            slot: 2,
            slots: 2,
            ..layout(BarOrientation::Vertical)
        },
    ] {
        assert!(project_bars(&[Some(1.0)], &names, scale, area(), bad).is_err());
    }
}

#[test]
fn corners_round_the_free_end() {
    let up = bar_corner_radii(5.0, 8.0, BarOrientation::Vertical);
    assert_eq!((up.top_left, up.top_right, up.bottom_left, up.bottom_right), (8.0, 8.0, 0.0, 0.0));

    let down = bar_corner_radii(-5.0, 8.0, BarOrientation::Vertical);
    assert_eq!((down.top_left, down.bottom_left, down.bottom_right), (0.0, 8.0, 8.0));

    let right = bar_corner_radii(5.0, 8.0, BarOrientation::Horizontal);
    assert_eq!((right.top_right, right.bottom_right, right.top_left), (8.0, 8.0, 0.0));

    let zero = bar_corner_radii(0.0, 8.0, BarOrientation::Vertical);
    assert_eq!(zero.bottom_left, 8.0);

    assert_eq!(bar_corner_radii(5.0, f64::NAN, BarOrientation::Vertical).max(), 0.0);
    assert_eq!(bar_corner_radii(5.0, -3.0, BarOrientation::Vertical).max(), 0.0);
}
