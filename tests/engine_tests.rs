use std::time::Duration;

use table_chart_rs::api::{ApplyStatus, ChartConfig, ChartEngine, ChartType, RetryPolicy};
use table_chart_rs::core::{DataSource, Dataset, Row, TableRow, TableSource};
use table_chart_rs::render::{AxisKind, NullRenderer};
use table_chart_rs::ChartError;

fn quarterly_source() -> DataSource {
    DataSource::new(
        Dataset::new(
            vec![
                Row::new(vec![10.0, 20.0]).with_label("North"),
                Row::new(vec![5.0, 15.0]).with_label("South"),
            ],
            vec!["Q1".to_owned(), "Q2".to_owned()],
            Some("Sales".to_owned()),
        )
        .expect("valid dataset"),
    )
}

fn line_config() -> ChartConfig {
    ChartConfig::new(ChartType::Line).with_dimensions(600, 400)
}

#[test]
fn set_data_renders_immediately_when_surface_is_ready() {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_config()).expect("engine");
    let status = engine.set_data(quarterly_source()).expect("apply");
    assert_eq!(status, ApplyStatus::Rendered { primitives: 2 });

    let renderer = engine.renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_primitive_count, 2);

    let frame = engine.last_frame().expect("frame");
    assert_eq!(frame.origin, (0.0, 400.0));
    assert_eq!(frame.title.as_ref().map(|title| title.text.as_str()), Some("Sales"));
    assert_eq!(frame.legend.len(), 2);
    assert_eq!(frame.legend[1].label.text, "South");
    assert!(engine.data_source().is_some());
    assert!(!engine.has_pending_apply());

    engine.render().expect("redraw");
    assert_eq!(engine.renderer().render_count, 2);
}

#[test]
fn frame_carries_category_and_value_axis_labels() {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_config()).expect("engine");
    engine.set_data(quarterly_source()).expect("apply");
    let frame = engine.last_frame().expect("frame");

    let categories: Vec<(&str, f64)> = frame
        .axis_labels
        .iter()
        .filter(|label| label.axis == AxisKind::Category)
        .map(|label| (label.label.text.as_str(), label.label.x))
        .collect();
    assert_eq!(categories, vec![("Q1", 0.0), ("Q2", 300.0)]);

    let values: Vec<&str> = frame
        .axis_labels
        .iter()
        .filter(|label| label.axis == AxisKind::Value)
        .map(|label| label.label.text.as_str())
        .collect();
    assert_eq!(values.first(), Some(&"0"));
    assert_eq!(values.last(), Some(&"20"));
}

#[test]
fn config_title_overrides_dataset_title() {
    let config = line_config().with_title("Override");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine.set_data(quarterly_source()).expect("apply");
    let title = engine
        .last_frame()
        .and_then(|frame| frame.title.as_ref())
        .expect("title");
    assert_eq!(title.text, "Override");
}

#[test]
fn pie_frame_has_no_axis_labels() {
    let config = ChartConfig::new(ChartType::Pie).with_dimensions(400, 300);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    let status = engine.set_data(quarterly_source()).expect("apply");
    assert_eq!(status, ApplyStatus::Rendered { primitives: 4 });
    let frame = engine.last_frame().expect("frame");
    assert!(frame.axis_labels.is_empty());
    assert_eq!(frame.origin, (0.0, 0.0));
}

#[test]
fn empty_pie_fails_synchronously_and_keeps_previous_frame() {
    let config = ChartConfig::new(ChartType::Pie);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine.set_data(quarterly_source()).expect("first apply");

    let empty = DataSource::new(Dataset::new(Vec::new(), Vec::new(), None).expect("empty"));
    let err = engine.set_data(empty).expect_err("empty pie");
    assert!(matches!(err, ChartError::EmptyDataset(_)));
    assert_eq!(engine.renderer().render_count, 1);
    assert!(engine.last_frame().is_some_and(|frame| !frame.primitives.is_empty()));
}

#[test]
fn empty_line_chart_renders_a_blank_frame() {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_config()).expect("engine");
    let empty = DataSource::new(Dataset::new(Vec::new(), Vec::new(), None).expect("empty"));
    let status = engine.set_data(empty).expect("apply");
    assert_eq!(status, ApplyStatus::Rendered { primitives: 0 });
}

#[test]
fn deferred_apply_renders_once_surface_becomes_ready() {
    let config = line_config().with_retry_policy(RetryPolicy::new(5, 100));
    let mut engine = ChartEngine::new(NullRenderer::not_ready(), config).expect("engine");

    let status = engine.set_data(quarterly_source()).expect("apply");
    assert_eq!(
        status,
        ApplyStatus::Deferred {
            attempt: 1,
            retry_after: Duration::from_millis(100)
        }
    );
    assert!(engine.has_pending_apply());
    assert!(engine.last_frame().is_none());

    let status = engine.retry_pending().expect("retry");
    assert!(matches!(status, ApplyStatus::Deferred { attempt: 2, .. }));

    engine.renderer_mut().surface_ready = true;
    let status = engine.retry_pending().expect("retry");
    assert_eq!(status, ApplyStatus::Rendered { primitives: 2 });
    assert!(!engine.has_pending_apply());
    assert_eq!(engine.renderer().render_count, 1);
    assert_eq!(engine.retry_pending().expect("idle"), ApplyStatus::Idle);
}

#[test]
fn retries_stop_with_surface_not_ready_after_bound() {
    let config = line_config().with_retry_policy(RetryPolicy::new(3, 10));
    let mut engine = ChartEngine::new(NullRenderer::not_ready(), config).expect("engine");

    engine.set_data(quarterly_source()).expect("deferred");
    engine.retry_pending().expect("second attempt");
    let err = engine.retry_pending().expect_err("bound reached");
    assert_eq!(err, ChartError::SurfaceNotReady { attempts: 3 });
    assert!(!engine.has_pending_apply());
    assert_eq!(engine.retry_pending().expect("idle"), ApplyStatus::Idle);
    assert_eq!(engine.renderer().render_count, 0);
}

#[test]
fn single_attempt_policy_fails_immediately() {
    let config = line_config().with_retry_policy(RetryPolicy::new(1, 10));
    let mut engine = ChartEngine::new(NullRenderer::not_ready(), config).expect("engine");
    let err = engine.set_data(quarterly_source()).expect_err("no retries");
    assert_eq!(err, ChartError::SurfaceNotReady { attempts: 1 });
    assert!(!engine.has_pending_apply());
}

#[test]
fn new_apply_supersedes_pending_one() {
    let mut engine =
        ChartEngine::new(NullRenderer::not_ready(), line_config()).expect("engine");
    engine.set_data(quarterly_source()).expect("deferred");
    engine.retry_pending().expect("second attempt");

    let replacement = DataSource::new(
        Dataset::new(vec![Row::new(vec![1.0])], vec!["only".to_owned()], None)
            .expect("valid dataset"),
    );
    let replacement_id = replacement.id();
    let status = engine.set_data(replacement).expect("replacement deferred");
    assert!(matches!(status, ApplyStatus::Deferred { attempt: 1, .. }));

    engine.renderer_mut().surface_ready = true;
    assert_eq!(
        engine.retry_pending().expect("render"),
        ApplyStatus::Rendered { primitives: 1 }
    );
    assert_eq!(engine.data_source().map(DataSource::id), Some(replacement_id));
}

#[test]
fn table_and_json_inputs_share_the_apply_path() {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_config()).expect("engine");
    let table = TableSource {
        caption: None,
        column_headers: vec!["Q1".to_owned(), "Q2".to_owned()],
        rows: vec![TableRow::new(Some("North"), &["10", "20"])],
    };
    assert_eq!(
        engine.set_table_data(&table).expect("table"),
        ApplyStatus::Rendered { primitives: 1 }
    );

    let err = engine
        .set_json_data(r#"{ "categories": ["a"], "rows": [ { "points": [1, 2] } ] }"#)
        .expect_err("length mismatch");
    assert!(matches!(err, ChartError::MalformedInput(_)));
    assert_eq!(engine.renderer().render_count, 1);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = line_config().with_dimensions(0, 400);
    let err = ChartEngine::new(NullRenderer::default(), config)
        .err()
        .expect("invalid viewport");
    assert_eq!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 400
        }
    );
}

#[test]
fn redraw_on_unready_surface_fails_without_drawing() {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_config()).expect("engine");
    engine.set_data(quarterly_source()).expect("apply");

    engine.renderer_mut().surface_ready = false;
    let err = engine.render().expect_err("surface gone");
    assert_eq!(err, ChartError::SurfaceNotReady { attempts: 1 });
    assert_eq!(engine.renderer().render_count, 1);
    assert!(!engine.has_pending_apply());
    assert!(engine.last_frame().is_some());
}

#[test]
fn huge_pinned_color_slot_reports_palette_exhaustion() {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_config()).expect("engine");
    let err = engine
        .set_json_data(
            r#"{"categories":["a"],"rows":[{"points":[1],"color":18446744073709551615}]}"#,
        )
        .expect_err("slot past palette");
    assert!(matches!(
        err,
        ChartError::PaletteExhausted { rows: usize::MAX, .. }
    ));
    assert_eq!(engine.renderer().render_count, 0);
}

#[test]
fn serialized_dataset_is_validated_on_the_way_back() {
    let mismatched =
        r#"{"rows":[{"points":[1,2,3],"label":null,"color":null}],"categories":["a"],"title":null}"#;
    assert!(serde_json::from_str::<Dataset>(mismatched).is_err());

    let dataset = quarterly_source().dataset().clone();
    let json = serde_json::to_string(&dataset).expect("serialize");
    let restored: Dataset = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, dataset);
}
