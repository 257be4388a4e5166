//! Serializes a [`SceneGraph`] to an SVG document.
//!
//! Groups become `<g>` elements translated by their origin, rect marks become
//! one `<rect>` per instance, rule marks one `<line>` per instance, and text
//! marks one `<text>` per instance. Every element carries its mark name as the
//! `class` attribute, so a chart's structure can be styled or queried the same
//! way as a hand-written d3 document.

use std::fmt::Write;

use barview_common::types::{
    to_css_rgb, FontWeight, FontWeightNameSpec, Rgba, StrokeCap, TextAlign, TextBaseline,
};
use barview_scenegraph::marks::group::{Clip, SceneGroup};
use barview_scenegraph::marks::mark::SceneMark;
use barview_scenegraph::marks::rect::SceneRectMark;
use barview_scenegraph::marks::rule::SceneRuleMark;
use barview_scenegraph::marks::text::SceneTextMark;
use barview_scenegraph::scene_graph::SceneGraph;
use itertools::izip;

use crate::error::SvgError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn scene_graph_to_svg(scene_graph: &SceneGraph) -> Result<String, SvgError> {
    let mut writer = SvgWriter::new();
    writer.write_scene_graph(scene_graph)?;
    Ok(writer.finish())
}

#[derive(Debug, Default)]
pub struct SvgWriter {
    out: String,
    depth: usize,
    clip_count: usize,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_scene_graph(&mut self, scene_graph: &SceneGraph) -> Result<(), SvgError> {
        let (width, height) = (scene_graph.width, scene_graph.height);
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(SvgError::InvalidImageSize { width, height });
        }

        writeln!(
            self.out,
            r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(width),
            h = fmt_num(height),
        )?;
        self.depth += 1;

        let translated = scene_graph.origin != [0.0, 0.0];
        if translated {
            self.open_group(None, scene_graph.origin, None)?;
        }
        self.write_marks(&scene_graph.marks)?;
        if translated {
            self.close_group()?;
        }

        self.depth -= 1;
        writeln!(self.out, "</svg>")?;
        log::trace!("wrote {} byte svg document", self.out.len());
        Ok(())
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write_marks(&mut self, marks: &[SceneMark]) -> Result<(), SvgError> {
        // Stable sort keeps insertion order among marks with equal zindex
        let mut ordered: Vec<&SceneMark> = marks.iter().collect();
        ordered.sort_by_key(|mark| mark.zindex().unwrap_or(0));

        for mark in ordered {
            match mark {
                SceneMark::Group(group) => self.write_group(group)?,
                SceneMark::Rect(rect) => self.write_rect_mark(rect)?,
                SceneMark::Rule(rule) => self.write_rule_mark(rule)?,
                SceneMark::Text(text) => self.write_text_mark(text)?,
            }
        }
        Ok(())
    }

    fn write_group(&mut self, group: &SceneGroup) -> Result<(), SvgError> {
        let clip_id = match &group.clip {
            Clip::None => None,
            Clip::Rect {
                x,
                y,
                width,
                height,
            } => {
                self.clip_count += 1;
                let id = format!("clip{}", self.clip_count);
                self.indent()?;
                writeln!(
                    self.out,
                    r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*width),
                    fmt_num(*height),
                )?;
                Some(id)
            }
        };

        let name = (!group.name.is_empty()).then_some(group.name.as_str());
        self.open_group(name, group.origin, clip_id.as_deref())?;
        self.write_marks(&group.marks)?;
        self.close_group()
    }

    fn open_group(
        &mut self,
        class: Option<&str>,
        origin: [f32; 2],
        clip_id: Option<&str>,
    ) -> Result<(), SvgError> {
        self.indent()?;
        self.out.push_str("<g");
        if let Some(class) = class {
            write!(self.out, r#" class="{}""#, escape(class))?;
        }
        if origin != [0.0, 0.0] {
            write!(
                self.out,
                r#" transform="translate({},{})""#,
                fmt_num(origin[0]),
                fmt_num(origin[1])
            )?;
        }
        if let Some(clip_id) = clip_id {
            write!(self.out, r#" clip-path="url(#{clip_id})""#)?;
        }
        self.out.push_str(">\n");
        self.depth += 1;
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), SvgError> {
        self.depth -= 1;
        self.indent()?;
        self.out.push_str("</g>\n");
        Ok(())
    }

    fn write_rect_mark(&mut self, mark: &SceneRectMark) -> Result<(), SvgError> {
        let class = escape(&mark.name);
        for (bounds, fill, stroke, stroke_width, corner_radius) in izip!(
            mark.bounds_vec(),
            mark.fill_iter(),
            mark.stroke_iter(),
            mark.stroke_width_iter(),
            mark.corner_radius_iter()
        ) {
            let [x, y, width, height] = bounds;
            self.indent()?;
            write!(
                self.out,
                r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(width),
                fmt_num(height),
            )?;
            if *corner_radius > 0.0 {
                write!(self.out, r#" rx="{}""#, fmt_num(*corner_radius))?;
            }
            self.write_paint("fill", fill)?;
            if stroke[3] > 0.0 && *stroke_width > 0.0 {
                self.write_paint("stroke", stroke)?;
                write!(self.out, r#" stroke-width="{}""#, fmt_num(*stroke_width))?;
            }
            self.out.push_str("/>\n");
        }
        Ok(())
    }

    fn write_rule_mark(&mut self, mark: &SceneRuleMark) -> Result<(), SvgError> {
        let class = escape(&mark.name);
        for (segment, stroke, stroke_width, cap) in izip!(
            mark.segments(),
            mark.stroke_iter(),
            mark.stroke_width_iter(),
            mark.stroke_cap_iter()
        ) {
            let [x, y, x2, y2] = segment;
            self.indent()?;
            write!(
                self.out,
                r#"<line class="{class}" x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(x2),
                fmt_num(y2),
            )?;
            self.write_paint("stroke", stroke)?;
            write!(self.out, r#" stroke-width="{}""#, fmt_num(*stroke_width))?;
            match cap {
                StrokeCap::Butt => {}
                StrokeCap::Round => self.out.push_str(r#" stroke-linecap="round""#),
                StrokeCap::Square => self.out.push_str(r#" stroke-linecap="square""#),
            }
            self.out.push_str("/>\n");
        }
        Ok(())
    }

    fn write_text_mark(&mut self, mark: &SceneTextMark) -> Result<(), SvgError> {
        let class = escape(&mark.name);
        for (text, x, y, align, baseline, angle, color, font, font_size, font_weight) in izip!(
            mark.text_iter(),
            mark.x_iter(),
            mark.y_iter(),
            mark.align_iter(),
            mark.baseline_iter(),
            mark.angle_iter(),
            mark.color_iter(),
            mark.font_iter(),
            mark.font_size_iter(),
            mark.font_weight_iter()
        ) {
            self.indent()?;
            write!(self.out, r#"<text class="{class}""#)?;
            if *angle == 0.0 {
                write!(self.out, r#" x="{}" y="{}""#, fmt_num(*x), fmt_num(*y))?;
            } else {
                write!(
                    self.out,
                    r#" transform="translate({},{}) rotate({})""#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*angle)
                )?;
            }
            write!(self.out, r#" text-anchor="{}""#, text_anchor(align))?;
            match baseline_shift(baseline) {
                BaselineShift::None => {}
                BaselineShift::Dy(dy) => write!(self.out, r#" dy="{dy}""#)?,
                BaselineShift::Dominant(value) => {
                    write!(self.out, r#" dominant-baseline="{value}""#)?
                }
            }
            write!(
                self.out,
                r#" font-family="{}" font-size="{}""#,
                escape(font),
                fmt_num(*font_size)
            )?;
            match font_weight {
                FontWeight::Name(FontWeightNameSpec::Normal) => {}
                FontWeight::Name(FontWeightNameSpec::Bold) => {
                    self.out.push_str(r#" font-weight="bold""#)
                }
                FontWeight::Number(weight) => {
                    write!(self.out, r#" font-weight="{}""#, fmt_num(*weight))?
                }
            }
            self.write_paint("fill", color)?;
            writeln!(self.out, ">{}</text>", escape(text))?;
        }
        Ok(())
    }

    fn write_paint(&mut self, attr: &str, color: &Rgba) -> Result<(), SvgError> {
        if color[3] <= 0.0 {
            write!(self.out, r#" {attr}="none""#)?;
            return Ok(());
        }
        write!(self.out, r#" {attr}="{}""#, to_css_rgb(color))?;
        if color[3] < 1.0 {
            write!(self.out, r#" {attr}-opacity="{}""#, fmt_num(color[3]))?;
        }
        Ok(())
    }

    fn indent(&mut self) -> Result<(), SvgError> {
        write!(self.out, "{:width$}", "", width = self.depth * 2)?;
        Ok(())
    }
}

enum BaselineShift {
    None,
    Dy(&'static str),
    Dominant(&'static str),
}

/// d3-axis style em offsets that place text relative to its anchor
fn baseline_shift(baseline: &TextBaseline) -> BaselineShift {
    match baseline {
        TextBaseline::Alphabetic => BaselineShift::None,
        TextBaseline::Top => BaselineShift::Dy("0.71em"),
        TextBaseline::Middle => BaselineShift::Dy("0.32em"),
        TextBaseline::LineTop => BaselineShift::Dy("1em"),
        TextBaseline::Bottom => BaselineShift::Dominant("text-after-edge"),
    }
}

fn text_anchor(align: &TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

/// Formats a coordinate with at most three decimals and no trailing zeros
pub fn fmt_num(value: f32) -> String {
    let rounded = (value as f64 * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{rounded}")
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use barview_common::types::parse_css_color;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(430.0), "430");
        assert_eq!(fmt_num(143.333_33), "143.333");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-9.0), "-9");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_rect_mark() {
        let mut scene = SceneGraph::new(100.0, 50.0);
        scene.marks.push(
            SceneRectMark {
                name: "bar".to_string(),
                len: 2,
                x: vec![0.0, 50.0].into(),
                y: vec![10.0, 20.0].into(),
                width: Some(40.0.into()),
                height: Some(vec![40.0, 30.0].into()),
                fill: parse_css_color("steelblue").unwrap().into(),
                ..Default::default()
            }
            .into(),
        );

        let svg = scene_graph_to_svg(&scene).unwrap();
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">"#
        ));
        assert!(svg.contains(
            r#"<rect class="bar" x="0" y="10" width="40" height="40" fill="rgb(70,130,180)"/>"#
        ));
        assert!(svg.contains(
            r#"<rect class="bar" x="50" y="20" width="40" height="30" fill="rgb(70,130,180)"/>"#
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_group_transform_and_rotated_text() {
        let mut group = SceneGroup::new("y-axis axis", [50.0, 70.0]);
        group.marks.push(
            SceneTextMark {
                name: "axis-label".to_string(),
                text: "Percent & Co".into(),
                x: (-40.0).into(),
                y: 215.0.into(),
                angle: (-90.0).into(),
                align: TextAlign::Center.into(),
                baseline: TextBaseline::LineTop.into(),
                ..Default::default()
            }
            .into(),
        );
        let mut scene = SceneGraph::new(1000.0, 600.0);
        scene.marks.push(group.into());

        let svg = scene_graph_to_svg(&scene).unwrap();
        assert!(svg.contains(r#"<g class="y-axis axis" transform="translate(50,70)">"#));
        assert!(svg.contains(
            r#"<text class="axis-label" transform="translate(-40,215) rotate(-90)" text-anchor="middle" dy="1em" font-family="sans-serif" font-size="10" fill="rgb(0,0,0)">Percent &amp; Co</text>"#
        ));
    }

    #[test]
    fn test_clip_path() {
        let mut group = SceneGroup::new("plot", [0.0, 0.0]);
        group.clip = Clip::Rect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let mut scene = SceneGraph::new(10.0, 10.0);
        scene.marks.push(group.into());

        let svg = scene_graph_to_svg(&scene).unwrap();
        assert!(svg.contains(r#"<clipPath id="clip1">"#));
        assert!(svg.contains(r#"<g class="plot" clip-path="url(#clip1)">"#));
    }

    #[test]
    fn test_invalid_size() {
        let scene = SceneGraph::new(f32::NAN, 10.0);
        assert!(matches!(
            scene_graph_to_svg(&scene),
            Err(SvgError::InvalidImageSize { .. })
        ));
    }
}
