//! Standalone HTML pages embedding one or more rendered charts.

use crate::error::ChartError;
use crate::view::ChartView;
use barview_svg::writer::escape;

/// Element a chart's selector resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerSelector {
    Id(String),
    Class(String),
    Tag(String),
}

impl ContainerSelector {
    /// Parses `#id`, `.class` or a bare tag name. Anything else falls back to a plain `div`.
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#').filter(|s| is_identifier(s)) {
            Self::Id(id.to_string())
        } else if let Some(class) = selector.strip_prefix('.').filter(|s| is_identifier(s)) {
            Self::Class(class.to_string())
        } else if is_identifier(selector) && selector.chars().all(|c| c.is_ascii_alphanumeric()) {
            Self::Tag(selector.to_ascii_lowercase())
        } else {
            log::warn!("unsupported container selector {selector:?}, using a div");
            Self::Tag("div".to_string())
        }
    }

    fn wrap(&self, content: &str) -> String {
        match self {
            // The document already has a body
            Self::Tag(tag) if tag == "body" => content.to_string(),
            Self::Tag(tag) => format!("<{tag}>\n{content}</{tag}>\n"),
            Self::Id(id) => format!("<div id=\"{}\">\n{content}</div>\n", escape(id)),
            Self::Class(class) => format!("<div class=\"{}\">\n{content}</div>\n", escape(class)),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One chart placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PageChart {
    pub selector: String,
    pub svg: String,
}

impl PageChart {
    pub fn from_view(view: &ChartView) -> Result<Self, ChartError> {
        Ok(Self {
            selector: view.config().parent_element.clone(),
            svg: view.to_svg()?,
        })
    }
}

pub fn render_page(title: &str, charts: &[PageChart]) -> String {
    let mut body = String::new();
    for chart in charts {
        body.push_str(&ContainerSelector::parse(&chart.selector).wrap(&chart.svg));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; }}
</style>
</head>
<body>
{body}</body>
</html>
"#,
        title = escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#chart", ContainerSelector::Id("chart".to_string()))]
    #[case(".bar-chart", ContainerSelector::Class("bar-chart".to_string()))]
    #[case("section", ContainerSelector::Tag("section".to_string()))]
    #[case("BODY", ContainerSelector::Tag("body".to_string()))]
    #[case("div > p", ContainerSelector::Tag("div".to_string()))]
    #[case("#", ContainerSelector::Tag("div".to_string()))]
    fn test_parse_selector(#[case] selector: &str, #[case] expected: ContainerSelector) {
        assert_eq!(ContainerSelector::parse(selector), expected);
    }

    #[test]
    fn test_render_page() {
        let charts = vec![
            PageChart {
                selector: "#chart".to_string(),
                svg: "<svg></svg>\n".to_string(),
            },
            PageChart {
                selector: "body".to_string(),
                svg: "<svg id=\"b\"></svg>\n".to_string(),
            },
        ];
        let page = render_page("Drinking <2020>", &charts);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Drinking &lt;2020&gt;</title>"));
        assert!(page.contains("<div id=\"chart\">\n<svg></svg>\n</div>\n"));
        assert!(page.contains("<body>\n<div id=\"chart\">"));
        assert!(page.contains("</div>\n<svg id=\"b\"></svg>\n</body>"));
    }

    #[test]
    fn test_render_page_escapes_quotes_in_title() {
        let page = render_page("Who's \"drinking\" & why", &[]);
        assert!(page.contains("<title>Who&apos;s &quot;drinking&quot; &amp; why</title>"));
    }
}
