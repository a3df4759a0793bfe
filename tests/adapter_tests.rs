use chart_editor::api::{
    ChartConfig, ChartKind, FieldStyle, SeriesShape, Theme, build_series_adapters,
    build_trend_adapters, kind_defaults, parse_dash,
};
use chart_editor::core::DataTable;
use chart_editor::render::Color;
use serde_json::json;

fn config(kind: ChartKind) -> ChartConfig {
    let (x_field, data) = if kind.is_bar() {
        ("cat", json!([{ "cat": "A", "y": 1, "z": 2 }]))
    } else {
        ("x", json!([{ "x": 1, "y": 1, "z": 2 }]))
    };
    let data: DataTable = serde_json::from_value(data).expect("table");
    ChartConfig::new(kind, "chart", x_field, data)
}

#[test]
fn every_kind_has_a_defaults_row() {
    for kind in ChartKind::ALL {
        assert_eq!(kind_defaults(kind).kind, kind);
    }
    assert_eq!(kind_defaults(ChartKind::VerticalBar).shape, SeriesShape::Column);
    assert_eq!(kind_defaults(ChartKind::HorizontalBar).shape, SeriesShape::Bar);
    assert_eq!(kind_defaults(ChartKind::Scatter).shape, SeriesShape::Bullet);
    assert_eq!(kind_defaults(ChartKind::RangeArea).shape, SeriesShape::RangeArea);
}

#[test]
fn kind_defaults_fill_unstyled_series() {
    let adapters = build_series_adapters(&config(ChartKind::VerticalBar).with_value_field("y"))
        .expect("adapters");
    let bar = &adapters[0];

    assert_eq!(bar.field, "y");
    assert_eq!(bar.name, "y");
    assert_eq!(bar.corner_radius, 8.0);
    assert_eq!(bar.stroke_width, 0.0);
    assert!(!bar.draggable);
    assert_eq!(bar.tooltip_template, "{name}: {value}");
    assert_eq!(
        bar.color,
        Color::from_hex(Theme::Default.series_color(0)).expect("palette color")
    );
    assert_eq!(bar.stroke_color, bar.color);

    let line = build_series_adapters(&config(ChartKind::Line).with_value_field("y"))
        .expect("adapters");
    assert_eq!(line[0].stroke_width, 2.0);
    assert_eq!(line[0].tension, 0.8);
    assert!(line[0].static_bullets);
}

#[test]
fn field_styles_override_defaults() {
    let style = FieldStyle {
        color: Some("#ff0000".to_owned()),
        stroke_width: Some(3.5),
        dash: Some("4, 2".to_owned()),
        tension: Some(0.5),
        bullet_radius: Some(9.0),
        ..FieldStyle::default()
    };
    let adapters = build_series_adapters(
        &config(ChartKind::Line)
            .with_value_field("y")
            .with_style("y", style)
            .with_value_name("y", "Yield")
            .with_draggable("y", true)
            .with_tooltip("y", "{name} = {value}"),
    )
    .expect("adapters");
    let line = &adapters[0];

    assert_eq!(line.color, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(line.stroke_width, 3.5);
    assert_eq!(line.dash, vec![4.0, 2.0]);
    assert_eq!(line.tension, 0.5);
    assert_eq!(line.bullet_radius, 9.0);
    assert_eq!(line.name, "Yield");
    assert!(line.draggable);
    assert!(line.is_field_draggable("y"));
    assert_eq!(line.tooltip_template, "{name} = {value}");
}

#[test]
fn series_cycle_through_the_theme_palette() {
    let adapters = build_series_adapters(
        &config(ChartKind::Scatter)
            .with_theme(Theme::Dataviz)
            .with_value_field("y")
            .with_value_field("z"),
    )
    .expect("adapters");

    assert_eq!(
        adapters[1].color,
        Color::from_hex(Theme::Dataviz.series_color(1)).expect("palette color")
    );
    assert_ne!(adapters[0].color, adapters[1].color);
    assert_eq!(Theme::Microchart.series_color(7), "#000000");
}

#[test]
fn open_fields_have_their_own_drag_flag() {
    let adapters = build_series_adapters(
        &config(ChartKind::RangeArea)
            .with_range_fields("y", "z")
            .with_draggable("z", true),
    )
    .expect("adapters");
    let band = &adapters[0];

    assert!(band.owns_field("y"));
    assert!(band.owns_field("z"));
    assert!(!band.is_field_draggable("y"));
    assert!(band.is_field_draggable("z"));
    assert!(!band.is_field_draggable("other"));
}

#[test]
fn invalid_styles_are_config_errors() {
    for style in [
        FieldStyle {
            color: Some("red".to_owned()),
            ..FieldStyle::default()
        },
        FieldStyle {
            stroke_width: Some(-1.0),
            ..FieldStyle::default()
        },
        FieldStyle {
            tension: Some(2.0),
            ..FieldStyle::default()
        },
        FieldStyle {
            dash: Some("4,x".to_owned()),
            ..FieldStyle::default()
        },
    ] {
        let result = build_series_adapters(
            &config(ChartKind::Line)
                .with_value_field("y")
                .with_style("y", style),
        );
        assert!(result.is_err());
    }
}

#[test]
fn trends_inherit_series_color_and_default_dash() {
    let config = config(ChartKind::Line)
        .with_value_field("y")
        .with_trend("y", 2)
        .with_trend("missing", 1);
    let series = build_series_adapters(&config).expect("series");
    let trends = build_trend_adapters(&config, &series).expect("trends");

    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].field, "y");
    assert_eq!(trends[0].order, 2);
    assert_eq!(trends[0].color, series[0].color);
    assert_eq!(trends[0].width, 2.0);
    assert_eq!(trends[0].dash, vec![6.0, 3.0]);
}

#[test]
fn trends_are_ignored_on_bar_charts() {
    let config = config(ChartKind::VerticalBar)
        .with_value_field("y")
        .with_trend("y", 1);
    let series = build_series_adapters(&config).expect("series");
    assert!(build_trend_adapters(&config, &series).expect("trends").is_empty());
}

#[test]
fn dash_patterns_parse_comma_lists() {
    assert_eq!(parse_dash("4,2").expect("dash"), vec![4.0, 2.0]);
    assert_eq!(parse_dash(" 1 , 3 , 5 ").expect("dash"), vec![1.0, 3.0, 5.0]);
    assert!(parse_dash("").expect("empty").is_empty());
    assert!(parse_dash("-1").is_err());
    assert!(parse_dash("a").is_err());
}
