use barview_common::types::BLACK;
use barview_scenegraph::error::SceneGraphError;
use barview_scenegraph::marks::group::{Clip, SceneGroup};
use barview_scenegraph::marks::mark::SceneMark;
use barview_scenegraph::marks::rect::SceneRectMark;
use barview_scenegraph::marks::rule::SceneRuleMark;
use barview_scenegraph::marks::text::SceneTextMark;
use barview_scenegraph::scene_graph::SceneGraph;

fn make_scene() -> SceneGraph {
    let mut inner = SceneGroup::new("chart", [50.0, 70.0]);
    let mut x_axis = SceneGroup::new("x-axis axis", [0.0, 430.0]);
    x_axis.marks.push(
        SceneTextMark {
            name: "axis-label x".to_string(),
            text: "State".into(),
            ..Default::default()
        }
        .into(),
    );
    inner.marks.push(SceneGroup::new("y-axis axis", [0.0, 0.0]).into());
    inner.marks.push(x_axis.into());

    let mut scene = SceneGraph::new(1000.0, 600.0);
    scene.marks.push(inner.into());
    scene
}

#[test]
fn test_group_paths_and_origins() {
    let scene = make_scene();
    assert_eq!(scene.group_paths(), vec![vec![0], vec![0, 0], vec![0, 1]]);
    assert_eq!(scene.get_absolute_origin(&[0, 1]), Some([50.0, 500.0]));
    assert_eq!(scene.get_absolute_origin(&[0, 5]), None);

    let names = scene.group_names();
    assert_eq!(names.get("x-axis axis"), Some(&vec![0, 1]));
}

#[test]
fn test_find_group_mut_and_upsert() -> Result<(), SceneGraphError> {
    let mut scene = make_scene();

    let chart = scene.find_group_mut("chart")?;
    chart.upsert_mark(
        SceneRectMark {
            name: "bar".to_string(),
            len: 2,
            fill: BLACK.into(),
            ..Default::default()
        }
        .into(),
    );
    // Second upsert replaces rather than appends
    chart.upsert_mark(
        SceneRectMark {
            name: "bar".to_string(),
            len: 3,
            ..Default::default()
        }
        .into(),
    );

    let chart = scene.find_group("chart").unwrap();
    let bars: Vec<&SceneMark> = chart.marks.iter().filter(|m| m.name() == "bar").collect();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].len(), 3);
    Ok(())
}

#[test]
fn test_missing_group() {
    let mut scene = make_scene();
    assert_eq!(
        scene.find_group_mut("legend").unwrap_err(),
        SceneGraphError::GroupNotFound("legend".to_string())
    );
}

#[test]
fn test_serde_round_trip_preserves_scene() {
    let scene = make_scene();
    let json = serde_json::to_string(&scene).unwrap();
    let parsed: SceneGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, scene);
}

#[test]
fn test_only_groups_carry_clip() {
    let mut plot = SceneGroup::new("plot", [0.0, 0.0]);
    plot.clip = Clip::Rect {
        x: 0.0,
        y: 0.0,
        width: 900.0,
        height: 430.0,
    };
    plot.marks.push(SceneRectMark::default().into());
    plot.marks.push(SceneRuleMark::default().into());
    plot.marks.push(SceneTextMark::default().into());

    let json = serde_json::to_value(SceneMark::from(plot)).unwrap();
    let group = &json["Group"];
    assert!(group["clip"].get("Rect").is_some());

    let marks = group["marks"].as_array().unwrap();
    assert_eq!(marks.len(), 3);
    for (mark, kind) in marks.iter().zip(["Rect", "Rule", "Text"]) {
        let fields = mark[kind].as_object().unwrap();
        assert!(fields.contains_key("name"));
        assert!(!fields.contains_key("clip"));
    }
}
