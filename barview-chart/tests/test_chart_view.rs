use barview_chart::view::{BAR_FILL, X_AXIS_GROUP, X_TITLE_MARK, Y_AXIS_GROUP, Y_TITLE_MARK};
use barview_chart::{ChartConfig, ChartError, ChartView, Margin, Record, RenderSummary};
use barview_scales::numeric::ContinuousNumericScale;
use barview_scenegraph::marks::mark::SceneMark;
use barview_scenegraph::marks::text::SceneTextMark;
use float_cmp::assert_approx_eq;

fn drinking() -> Vec<Record> {
    vec![
        Record::new("A", 10.0),
        Record::new("B", 30.0),
        Record::new("C", 20.0),
    ]
}

fn updated_view(data: Vec<Record>) -> ChartView {
    let mut view = ChartView::new(ChartConfig::new("#chart"), vec![]);
    view.update(data).unwrap();
    view
}

fn text_mark<'a>(view: &'a ChartView, group: &str, name: &str) -> &'a SceneTextMark {
    let group = view.scene_graph().find_group(group).unwrap();
    group
        .marks
        .iter()
        .find_map(|mark| match mark {
            SceneMark::Text(text) if text.name == name => Some(text.as_ref()),
            _ => None,
        })
        .unwrap()
}

#[test]
fn test_three_states_layout() {
    let view = updated_view(drinking());

    assert_eq!(view.inner_width(), 900.0);
    assert_eq!(view.inner_height(), 430.0);
    assert_eq!(view.y_scale().domain(), (0.0, 30.0));
    assert_eq!(view.x_scale().get_domain(), &vec!["A", "B", "C"]);

    let bars = view.bars();
    assert_eq!(bars.len(), 3);
    for bar in bars {
        assert_approx_eq!(f32, bar.width, 257.142_85, epsilon = 1e-3);
        assert_eq!(bar.fill, BAR_FILL);
    }

    assert_approx_eq!(f32, bars[0].height, 143.333_33, epsilon = 1e-3);
    assert_approx_eq!(f32, bars[1].height, 430.0, epsilon = 1e-3);
    assert_approx_eq!(f32, bars[2].height, 286.666_66, epsilon = 1e-3);

    assert_approx_eq!(f32, bars[0].y, 286.666_66, epsilon = 1e-3);
    assert_approx_eq!(f32, bars[1].y, 0.0, epsilon = 1e-3);

    assert_approx_eq!(f32, bars[0].x, 0.0, epsilon = 1e-3);
    assert_approx_eq!(f32, bars[1].x, 321.428_57, epsilon = 1e-3);
    assert_approx_eq!(f32, bars[2].x, 642.857_1, epsilon = 1e-3);
}

#[test]
fn test_bar_height_matches_scale() {
    let view = updated_view(vec![
        Record::new("A", 0.0),
        Record::new("B", 7.5),
        Record::new("C", 12.0),
        Record::new("D", 3.25),
    ]);
    for (record, bar) in view.data().iter().zip(view.bars()) {
        let expected = view.inner_height() - view.y_scale().scale_scalar(record.value);
        assert_approx_eq!(f32, bar.height, expected, epsilon = 1e-3);
        assert!(bar.height >= 0.0);
    }
    assert_eq!(view.bars()[0].height, 0.0);
}

#[test]
fn test_repeated_categories_share_band() {
    let view = updated_view(vec![
        Record::new("A", 1.0),
        Record::new("B", 2.0),
        Record::new("A", 3.0),
    ]);
    assert_eq!(view.x_scale().get_domain(), &vec!["A", "B"]);

    let bars = view.bars();
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].x, bars[2].x);
    assert_eq!(bars[0].width, bars[2].width);
    assert_ne!(bars[0].x, bars[1].x);
    assert_ne!(bars[0].height, bars[2].height);
}

#[test]
fn test_render_is_idempotent() {
    let mut view = updated_view(drinking());
    let bars = view.bars().to_vec();
    let scene = view.scene_graph().clone();

    let summary = view.render().unwrap();
    assert_eq!(
        summary,
        RenderSummary {
            entered: 0,
            updated: 3,
            exited: 0
        }
    );
    assert_eq!(view.bars(), bars.as_slice());
    assert_eq!(view.scene_graph(), &scene);
}

#[test]
fn test_join_summary_on_shrink_and_grow() {
    let mut view = ChartView::new(ChartConfig::new("#chart"), vec![]);
    let summary = view.update(drinking()).unwrap();
    assert_eq!(summary.entered, 3);

    let summary = view
        .update(vec![Record::new("A", 5.0), Record::new("B", 4.0)])
        .unwrap();
    assert_eq!(
        summary,
        RenderSummary {
            entered: 0,
            updated: 2,
            exited: 1
        }
    );
    assert_eq!(view.bars().len(), 2);

    let grown: Vec<Record> = (0..5).map(|i| Record::new(format!("S{i}"), i as f32)).collect();
    let summary = view.update(grown).unwrap();
    assert_eq!(
        summary,
        RenderSummary {
            entered: 3,
            updated: 2,
            exited: 0
        }
    );
    assert_eq!(view.bars().len(), 5);
    assert_eq!(view.y_scale().domain(), (0.0, 4.0));
}

#[test]
fn test_all_zero_values_draw_flat_bars() {
    let view = updated_view(vec![Record::new("A", 0.0), Record::new("B", 0.0)]);

    assert_eq!(view.y_scale().domain(), (0.0, 0.0));
    assert_eq!(view.bars().len(), 2);
    for bar in view.bars() {
        assert_eq!(bar.y, 430.0);
        assert_eq!(bar.height, 0.0);
    }
}

#[test]
fn test_axis_ticks() {
    let view = updated_view(drinking());

    let y_labels = text_mark(&view, Y_AXIS_GROUP, "tick-label").text_vec();
    let expected: Vec<String> = (0..=15).map(|i| (i * 2).to_string()).collect();
    assert_eq!(y_labels, expected);

    let x_labels = text_mark(&view, X_AXIS_GROUP, "tick-label");
    assert_eq!(x_labels.text_vec(), vec!["A", "B", "C"]);
    let centres: Vec<f32> = x_labels.x_iter().copied().collect();
    for (centre, bar) in centres.iter().zip(view.bars()) {
        assert_approx_eq!(f32, *centre, bar.x + bar.width / 2.0, epsilon = 1e-3);
    }
}

#[test]
fn test_titles_persist_across_updates() {
    let mut view = updated_view(drinking());
    view.update(vec![Record::new("Z", 1.0)]).unwrap();

    let x_title = text_mark(&view, X_AXIS_GROUP, X_TITLE_MARK);
    assert_eq!(x_title.text_vec(), vec!["State"]);
    assert_eq!(x_title.x.first(), Some(&450.0));

    let y_title = text_mark(&view, Y_AXIS_GROUP, Y_TITLE_MARK);
    assert_eq!(y_title.text_vec(), vec!["Percent Drinking"]);
    assert_eq!(y_title.angle.first(), Some(&-90.0));
    assert_eq!(y_title.x.first(), Some(&-50.0));
    assert_eq!(y_title.y.first(), Some(&215.0));

    let y_axis = view.scene_graph().find_group(Y_AXIS_GROUP).unwrap();
    assert_eq!(y_axis.marks.len(), 4);
}

#[test]
fn test_group_layout() {
    let config = ChartConfig::new("#chart")
        .with_container_width(600.0)
        .with_container_height(400.0)
        .with_margin(Margin {
            top: 10.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        });
    let view = ChartView::new(config, vec![]);
    assert_eq!(view.inner_width(), 540.0);
    assert_eq!(view.inner_height(), 360.0);

    let x_axis = view.scene_graph().find_group(X_AXIS_GROUP).unwrap();
    assert_eq!(x_axis.origin, [0.0, 360.0]);
    assert_eq!(
        view.scene_graph().get_absolute_origin(&[0, 1]).unwrap(),
        [40.0, 370.0]
    );
}

#[test]
fn test_empty_update_keeps_state() {
    let mut view = updated_view(drinking());
    let bars = view.bars().to_vec();

    assert!(matches!(view.update(vec![]), Err(ChartError::EmptyDataset)));
    assert_eq!(view.data(), drinking().as_slice());
    assert_eq!(view.bars(), bars.as_slice());
    assert_eq!(view.y_scale().domain(), (0.0, 30.0));
}

#[test]
fn test_non_finite_update_is_rejected() {
    let mut view = updated_view(drinking());
    let result = view.update(vec![Record::new("A", 1.0), Record::new("B", f32::NAN)]);
    assert!(matches!(
        result,
        Err(ChartError::NonFiniteValue { index: 1, .. })
    ));
    assert_eq!(view.data().len(), 3);
}

#[test]
fn test_render_before_update() {
    let mut view = ChartView::new(ChartConfig::new("#chart"), drinking());
    assert_eq!(view.data().len(), 3);
    assert!(view.bars().is_empty());
    assert!(matches!(
        view.render(),
        Err(ChartError::UnknownCategory(category)) if category == "A"
    ));

    let mut empty = ChartView::new(ChartConfig::new("#chart"), vec![]);
    assert_eq!(empty.render().unwrap(), RenderSummary::default());
}

#[test]
fn test_to_svg() {
    let view = updated_view(drinking());
    let svg = view.to_svg().unwrap();

    assert!(svg.contains(r#"width="1000" height="600""#));
    assert!(svg.contains(r#"<g class="chart" transform="translate(50,70)">"#));
    assert!(svg.contains(r#"<g class="x-axis axis" transform="translate(0,430)">"#));
    assert!(svg.contains(r#"<g class="y-axis axis">"#));
    assert_eq!(svg.matches(r#"<rect class="bar""#).count(), 3);
    assert!(svg.contains(r#"fill="rgb(70,130,180)""#));
    assert!(svg.contains(r#"class="axis-label x""#));
    assert!(svg.contains(">State</text>"));
    assert!(svg.contains(">Percent Drinking</text>"));
}
