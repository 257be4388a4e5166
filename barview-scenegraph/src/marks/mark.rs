use std::sync::Arc;

use crate::marks::group::SceneGroup;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneMark {
    Rect(SceneRectMark),
    Rule(SceneRuleMark),
    Text(Arc<SceneTextMark>),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn name(&self) -> &str {
        match self {
            Self::Rect(mark) => &mark.name,
            Self::Rule(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Rect(mark) => mark.zindex,
            Self::Rule(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
            Self::Group(mark) => mark.zindex,
        }
    }

    /// Number of drawn elements; groups count as one
    pub fn len(&self) -> usize {
        match self {
            Self::Rect(mark) => mark.len as usize,
            Self::Rule(mark) => mark.len as usize,
            Self::Text(mark) => mark.len as usize,
            Self::Group(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn children(&self) -> &[SceneMark] {
        match self {
            Self::Group(mark) => &mark.marks,
            _ => &[],
        }
    }
}
