use chart_editor::api::{ChartConfig, ChartKind};
use chart_editor::core::DataTable;
use chart_editor::host::RecordingSink;
use chart_editor::interaction::{DragTarget, InteractionMode};
use chart_editor::render::NullRenderer;
use chart_editor::{ChartEditor, ChartError, PointerOutcome};
use serde_json::json;

fn table(value: serde_json::Value) -> DataTable {
    serde_json::from_value(value).expect("table")
}

fn bar_config(kind: ChartKind) -> ChartConfig {
    ChartConfig::new(
        kind,
        "chart1",
        "cat",
        table(json!([{ "cat": "A", "v": 10 }, { "cat": "B", "v": -5 }])),
    )
    .with_value_field("v")
    .with_draggable("v", true)
    .with_value_axis(-20.0, 20.0)
}

fn mount(config: ChartConfig) -> (ChartEditor<NullRenderer>, RecordingSink) {
    let sink = RecordingSink::new();
    let editor = ChartEditor::mount(config, NullRenderer::default(), sink.clone()).expect("mount");
    sink.clear();
    (editor, sink)
}

fn handle(editor: &ChartEditor<NullRenderer>, field: &str, row: usize) -> (f64, f64) {
    editor
        .point_position(field, row)
        .expect("position")
        .expect("handle")
}

#[test]
fn dragging_a_column_reports_one_change() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar));
    let (x, y) = handle(&editor, "v", 0);

    let outcome = editor.pointer_down(x, y).expect("down");
    assert_eq!(outcome, PointerOutcome::DragStarted(DragTarget::new("v", 0)));
    assert_eq!(editor.interaction_mode(), InteractionMode::Dragging);

    let target = editor.value_to_pixel(17.0).expect("pixel");
    assert_eq!(editor.pointer_move(x, target).expect("move"), Some(17.0));
    assert!(sink.is_empty());

    let record = editor.pointer_up().expect("up").expect("change record");
    assert_eq!(record.index, 0);
    assert_eq!(record.value, 17.0);

    let changes = sink.with_key("chart1_change");
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0].payload,
        json!({ "index": 0, "category": "A", "field": "v", "value": 17.0 })
    );
    assert_eq!(sink.len(), 1);
    assert_eq!(
        serde_json::to_value(editor.local_data()).expect("local json"),
        json!([{ "cat": "A", "v": 17.0 }, { "cat": "B", "v": -5.0 }])
    );
    assert_eq!(editor.model().value(0, "v").expect("value"), Some(17.0));
    assert_eq!(editor.interaction_mode(), InteractionMode::Idle);
    assert_eq!(editor.last_change(), Some(&record));
    assert!(editor.is_synchronized());
}

#[test]
fn plotted_values_follow_the_pointer_before_release() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar));
    let (x, y) = handle(&editor, "v", 1);
    editor.pointer_down(x, y).expect("down");

    let target = editor.value_to_pixel(3.5).expect("pixel");
    editor.pointer_move(x, target).expect("move");

    assert_eq!(editor.model().value(1, "v").expect("value"), Some(3.5));
    assert_eq!(editor.local_data().number(1, "v").expect("local"), Some(-5.0));
    let (_, moved_y) = handle(&editor, "v", 1);
    assert!((moved_y - target).abs() <= 1e-9);
    assert!(sink.is_empty());
}

#[test]
fn drags_are_locked_to_the_value_axis() {
    let (mut editor, _) = mount(bar_config(ChartKind::VerticalBar));
    let (x, y) = handle(&editor, "v", 0);
    editor.pointer_down(x, y).expect("down");

    let target = editor.value_to_pixel(4.0).expect("pixel");
    assert_eq!(editor.pointer_move(x + 150.0, target).expect("move"), Some(4.0));
    let (moved_x, _) = handle(&editor, "v", 0);
    assert!((moved_x - x).abs() <= 1e-9);
}

#[test]
fn values_are_clamped_to_the_axis_bounds() {
    let (mut editor, _) = mount(bar_config(ChartKind::VerticalBar));
    let (x, y) = handle(&editor, "v", 0);
    editor.pointer_down(x, y).expect("down");

    assert_eq!(editor.pointer_move(x, -500.0).expect("move"), Some(20.0));
    assert_eq!(editor.pointer_move(x, 5_000.0).expect("move"), Some(-20.0));

    let record = editor.pointer_up().expect("up").expect("record");
    assert_eq!(record.value, -20.0);
    assert_eq!(editor.value_domain(), (-20.0, 20.0));
}

#[test]
fn horizontal_bars_drag_along_x() {
    let (mut editor, sink) = mount(bar_config(ChartKind::HorizontalBar));
    let (x, y) = handle(&editor, "v", 1);
    editor.pointer_down(x, y).expect("down");

    let target = editor.value_to_pixel(12.0).expect("pixel");
    assert_eq!(editor.pointer_move(target, y + 30.0).expect("move"), Some(12.0));
    let record = editor.pointer_up().expect("up").expect("record");

    assert_eq!(
        sink.last().expect("change").payload,
        json!({ "index": 1, "category": "B", "field": "v", "value": 12.0 })
    );
    assert_eq!(record.value, 12.0);
}

#[test]
fn non_draggable_fields_ignore_the_pointer() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar).with_draggable("v", false));
    let (x, y) = handle(&editor, "v", 0);

    assert_eq!(editor.pointer_down(x, y).expect("down"), PointerOutcome::Ignored);
    assert_eq!(editor.interaction_mode(), InteractionMode::Idle);
    assert!(matches!(
        editor.begin_drag("v", 0),
        Err(ChartError::InvalidData(_))
    ));
    assert!(editor.pointer_up().expect("up").is_none());
    assert!(sink.is_empty());
}

#[test]
fn begin_drag_rejects_unknown_and_empty_cells() {
    let (mut editor, _) = mount(bar_config(ChartKind::VerticalBar));

    assert!(matches!(
        editor.begin_drag("missing", 0),
        Err(ChartError::UnknownField(_))
    ));
    assert!(matches!(
        editor.begin_drag("v", 9),
        Err(ChartError::RowOutOfRange { row: 9, len: 2 })
    ));

    editor.begin_drag("v", 0).expect("first drag");
    assert!(editor.begin_drag("v", 1).is_err());
}

#[test]
fn pressing_empty_space_does_nothing() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar));
    let area = editor.plot_area();

    assert_eq!(
        editor.pointer_down(area.right() - 1.0, area.top + 1.0).expect("down"),
        PointerOutcome::Ignored
    );
    assert!(sink.is_empty());
}

#[test]
fn pressing_inside_a_bar_starts_a_drag() {
    let (mut editor, _) = mount(bar_config(ChartKind::VerticalBar));
    let bar = editor.project_bars("v").expect("bars")[0];

    let outcome = editor
        .pointer_down(bar.x + bar.width * 0.5, bar.y + bar.height - 2.0)
        .expect("down");
    assert_eq!(outcome, PointerOutcome::DragStarted(DragTarget::new("v", 0)));
}

#[test]
fn bar_body_drag_moves_the_value_with_the_pointer() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar));
    let bar = editor.project_bars("v").expect("bars")[0];
    let press_x = bar.x + bar.width * 0.5;
    let press_y = bar.y + bar.height * 0.5;

    editor.pointer_down(press_x, press_y).expect("down");
    let live = editor
        .pointer_move(press_x, press_y - 1.0)
        .expect("move")
        .expect("live value");

    let handle_y = editor.value_to_pixel(10.0).expect("pixel");
    let expected = editor
        .model()
        .pixel_to_value(handle_y - 1.0)
        .expect("value");
    assert!(live > 10.0);
    assert!((live - expected).abs() <= 1e-9);

    let record = editor.pointer_up().expect("up").expect("change record");
    assert!((record.value - expected).abs() <= 1e-9);
    assert_eq!(sink.with_key("chart1_change").len(), 1);
    assert!(editor.is_synchronized());
}

#[test]
fn horizontal_bar_body_drag_keeps_the_grab_offset() {
    let (mut editor, _) = mount(bar_config(ChartKind::HorizontalBar));
    let bar = editor.project_bars("v").expect("bars")[0];
    let press_x = bar.x + bar.width * 0.25;
    let press_y = bar.y + bar.height * 0.5;

    editor.pointer_down(press_x, press_y).expect("down");
    let live = editor
        .pointer_move(press_x + 2.0, press_y)
        .expect("move")
        .expect("live value");

    let handle_x = editor.value_to_pixel(10.0).expect("pixel");
    let expected = editor
        .model()
        .pixel_to_value(handle_x + 2.0)
        .expect("value");
    assert!((live - expected).abs() <= 1e-9);
}

#[test]
fn cancel_restores_the_start_value_silently() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar));
    let (x, y) = handle(&editor, "v", 0);
    editor.pointer_down(x, y).expect("down");
    let target = editor.value_to_pixel(-12.0).expect("pixel");
    editor.pointer_move(x, target).expect("move");

    assert!(editor.cancel_drag().expect("cancel"));
    assert_eq!(editor.model().value(0, "v").expect("value"), Some(10.0));
    assert_eq!(editor.interaction_mode(), InteractionMode::Idle);
    assert!(editor.is_synchronized());
    assert!(sink.is_empty());
    assert!(!editor.cancel_drag().expect("second cancel"));
}

#[test]
fn tooltip_follows_hover_and_hides_while_dragging() {
    let (mut editor, _) = mount(bar_config(ChartKind::VerticalBar).with_value_name("v", "Sales"));
    let (x, y) = handle(&editor, "v", 0);

    assert_eq!(editor.pointer_move(x, y).expect("hover"), None);
    assert_eq!(editor.hovered(), Some(&DragTarget::new("v", 0)));
    assert!(editor.tooltip().visible);
    assert_eq!(editor.tooltip().text, "Sales: 10");
    assert!(editor.tooltip().y < y);

    editor.pointer_down(x, y).expect("down");
    assert!(!editor.tooltip().visible);
    editor.pointer_move(x, y - 20.0).expect("drag");
    assert!(!editor.tooltip().visible);

    editor.pointer_up().expect("up");
    editor.pointer_leave().expect("leave");
    assert!(editor.hovered().is_none());
    assert!(!editor.tooltip().visible);
}

#[test]
fn custom_tooltip_templates_use_the_number_format() {
    let (mut editor, _) = mount(
        bar_config(ChartKind::VerticalBar)
            .with_tooltip("v", "{category} -> {value}")
            .with_number_format("#.00"),
    );
    let (x, y) = handle(&editor, "v", 1);
    editor.pointer_move(x, y).expect("hover");

    assert_eq!(editor.tooltip().text, "B -> -5.00");
}

#[test]
fn scatter_changes_report_the_x_value() {
    let config = ChartConfig::new(
        ChartKind::Scatter,
        "points",
        "x",
        table(json!([{ "x": 1.5, "y": 2 }, { "x": 4, "y": 8 }])),
    )
    .with_value_field("y")
    .with_draggable("y", true)
    .with_value_axis(0.0, 10.0);
    let (mut editor, sink) = mount(config);
    let (x, y) = handle(&editor, "y", 0);

    editor.pointer_down(x, y).expect("down");
    let target = editor.value_to_pixel(5.0).expect("pixel");
    editor.pointer_move(x, target).expect("move");
    editor.pointer_up().expect("up");

    assert_eq!(
        sink.last().expect("change").payload,
        json!({ "index": 0, "x": 1.5, "field": "y", "value": 5.0 })
    );
}

#[test]
fn range_area_open_field_is_draggable_on_its_own() {
    let config = ChartConfig::new(
        ChartKind::RangeArea,
        "band",
        "x",
        table(json!([
            { "x": 1, "hi": 6, "lo": 2 },
            { "x": 2, "hi": 7, "lo": 3 },
            { "x": 3, "hi": 8, "lo": 1 }
        ])),
    )
    .with_range_fields("hi", "lo")
    .with_draggable("lo", true)
    .with_value_axis(0.0, 10.0);
    let (mut editor, sink) = mount(config);

    let (hx, hy) = handle(&editor, "hi", 1);
    assert_eq!(editor.pointer_down(hx, hy).expect("down"), PointerOutcome::Ignored);

    let (x, y) = handle(&editor, "lo", 1);
    assert_eq!(
        editor.pointer_down(x, y).expect("down"),
        PointerOutcome::DragStarted(DragTarget::new("lo", 1))
    );
    let target = editor.value_to_pixel(4.0).expect("pixel");
    editor.pointer_move(x, target).expect("move");
    editor.pointer_up().expect("up");

    assert_eq!(
        sink.last().expect("change").payload,
        json!({ "index": 1, "x": 2.0, "field": "lo", "value": 4.0 })
    );
    assert_eq!(editor.local_data().number(1, "hi").expect("hi"), Some(7.0));
}

#[test]
fn repeated_drags_each_report_their_own_change() {
    let (mut editor, sink) = mount(bar_config(ChartKind::VerticalBar));

    for (row, value) in [(0, 1.0), (1, 2.0), (0, 3.0)] {
        let (x, y) = handle(&editor, "v", row);
        editor.pointer_down(x, y).expect("down");
        let target = editor.value_to_pixel(value).expect("pixel");
        editor.pointer_move(x, target).expect("move");
        editor.pointer_up().expect("up");
    }

    let values: Vec<f64> = sink
        .with_key("chart1_change")
        .iter()
        .filter_map(|message| message.payload["value"].as_f64())
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
    assert_eq!(
        serde_json::to_value(editor.local_data()).expect("local json"),
        json!([{ "cat": "A", "v": 3.0 }, { "cat": "B", "v": 2.0 }])
    );
}
