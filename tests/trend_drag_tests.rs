use approx::assert_relative_eq;
use chart_editor::api::{ChartConfig, ChartKind, XKind};
use chart_editor::core::DataTable;
use chart_editor::host::RecordingSink;
use chart_editor::render::NullRenderer;
use chart_editor::ChartEditor;
use serde_json::json;

fn table(value: serde_json::Value) -> DataTable {
    serde_json::from_value(value).expect("table")
}

fn line_config() -> ChartConfig {
    ChartConfig::new(
        ChartKind::Line,
        "trend",
        "x",
        table(json!([{ "x": 0, "y": 1 }, { "x": 1, "y": 2 }, { "x": 2, "y": 3 }])),
    )
    .with_value_field("y")
    .with_draggable("y", true)
    .with_trend("y", 1)
    .with_value_axis(0.0, 10.0)
}

fn trend_ys(editor: &ChartEditor<NullRenderer>) -> Vec<f64> {
    editor
        .trend("y")
        .expect("trend")
        .points()
        .iter()
        .map(|point| point.y)
        .collect()
}

fn drag(editor: &mut ChartEditor<NullRenderer>, row: usize, value: f64) {
    let (x, y) = editor
        .point_position("y", row)
        .expect("position")
        .expect("handle");
    editor.pointer_down(x, y).expect("down");
    let target = editor.value_to_pixel(value).expect("pixel");
    editor.pointer_move(x, target).expect("move");
    editor.pointer_up().expect("up");
}

#[test]
fn initial_trend_fits_the_host_data() {
    let editor = ChartEditor::mount(line_config(), NullRenderer::default(), RecordingSink::new())
        .expect("mount");

    let trend = editor.trend("y").expect("trend");
    assert_eq!(trend.order(), 1);
    let xs: Vec<f64> = trend.points().iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    assert_eq!(trend_ys(&editor), vec![1.0, 2.0, 3.0]);
}

#[test]
fn trend_refits_after_the_drag_ends() {
    let mut editor =
        ChartEditor::mount(line_config(), NullRenderer::default(), RecordingSink::new())
            .expect("mount");
    let (x, y) = editor
        .point_position("y", 2)
        .expect("position")
        .expect("handle");
    editor.pointer_down(x, y).expect("down");
    let target = editor.value_to_pixel(6.0).expect("pixel");
    editor.pointer_move(x, target).expect("move");

    assert_eq!(trend_ys(&editor), vec![1.0, 2.0, 3.0]);

    editor.pointer_up().expect("up");
    // least squares through (0, 1), (1, 2), (2, 6)
    let ys = trend_ys(&editor);
    assert_relative_eq!(ys[0], 0.5, epsilon = 1e-9);
    assert_relative_eq!(ys[1], 3.0, epsilon = 1e-9);
    assert_relative_eq!(ys[2], 5.5, epsilon = 1e-9);
}

#[test]
fn cancelled_drags_leave_the_trend_alone() {
    let mut editor =
        ChartEditor::mount(line_config(), NullRenderer::default(), RecordingSink::new())
            .expect("mount");
    let (x, y) = editor
        .point_position("y", 0)
        .expect("position")
        .expect("handle");
    editor.pointer_down(x, y).expect("down");
    editor.pointer_move(x, y - 50.0).expect("move");
    editor.cancel_drag().expect("cancel");

    assert_eq!(trend_ys(&editor), vec![1.0, 2.0, 3.0]);
}

#[test]
fn trend_fit_matches_the_local_copy() {
    let mut editor =
        ChartEditor::mount(line_config(), NullRenderer::default(), RecordingSink::new())
            .expect("mount");
    drag(&mut editor, 0, 4.0);

    let fit = editor.trend_fit("y").expect("fit").expect("configured trend");
    for point in editor.trend("y").expect("trend").points() {
        assert_relative_eq!(fit.evaluate(point.x), point.y, epsilon = 1e-12);
    }
    assert!(editor.trend_fit("other").expect("fit").is_none());
}

#[test]
fn quadratic_trend_is_drawn_as_dashed_segments() {
    let config = line_config().with_trend("y", 2);
    let editor =
        ChartEditor::mount(config, NullRenderer::default(), RecordingSink::new()).expect("mount");

    let curve = editor.project_trend("y").expect("curve");
    assert_eq!(curve.len(), 3);
    let frame = editor.renderer().last_frame.as_ref().expect("frame");
    let dashed = frame
        .lines
        .iter()
        .filter(|line| line.dash == vec![6.0, 3.0])
        .count();
    assert_eq!(dashed, 2);
}

#[test]
fn date_trends_regress_on_timestamps() {
    let config = ChartConfig::new(
        ChartKind::Scatter,
        "dated",
        "day",
        table(json!([
            { "day": "2024-01-01", "y": 1 },
            { "day": "2024-01-02", "y": 2 },
            { "day": "2024-01-03", "y": 3 }
        ])),
    )
    .with_value_field("y")
    .with_x_kind(XKind::Date)
    .with_draggable("y", true)
    .with_trend("y", 1)
    .with_value_axis(0.0, 10.0);
    let mut editor =
        ChartEditor::mount(config, NullRenderer::default(), RecordingSink::new()).expect("mount");
    let ys = trend_ys(&editor);
    assert_relative_eq!(ys[2], 3.0, epsilon = 1e-9);

    drag(&mut editor, 1, 5.0);
    // mean of 1, 5, 3 at the middle day
    let ys = trend_ys(&editor);
    assert_relative_eq!(ys[1], 3.0, epsilon = 1e-9);
    assert_relative_eq!(ys[0], 2.0, epsilon = 1e-9);
}

#[test]
fn bar_charts_ignore_trend_requests() {
    let config = ChartConfig::new(
        ChartKind::VerticalBar,
        "bars",
        "cat",
        table(json!([{ "cat": "A", "v": 1 }, { "cat": "B", "v": 2 }])),
    )
    .with_value_field("v")
    .with_trend("v", 1);
    let editor =
        ChartEditor::mount(config, NullRenderer::default(), RecordingSink::new()).expect("mount");

    assert!(editor.trends().is_empty());
    assert!(editor.project_trend("v").expect("curve").is_empty());
}
