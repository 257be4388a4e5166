use crate::error::SceneGraphError;
use crate::marks::mark::SceneMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Clip {
    #[default]
    None,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// A named container translated by `origin` relative to its parent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    pub name: String,
    pub origin: [f32; 2],
    pub clip: Clip,
    pub marks: Vec<SceneMark>,
    pub zindex: Option<i32>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>, origin: [f32; 2]) -> Self {
        Self {
            name: name.into(),
            origin,
            ..Default::default()
        }
    }

    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group.group_paths() {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    /// Depth-first search for a descendant group by name
    pub fn find_group(&self, name: &str) -> Option<&SceneGroup> {
        self.marks.iter().find_map(|mark| match mark {
            SceneMark::Group(group) if group.name == name => Some(group),
            SceneMark::Group(group) => group.find_group(name),
            _ => None,
        })
    }

    pub fn find_group_mut(&mut self, name: &str) -> Option<&mut SceneGroup> {
        for mark in self.marks.iter_mut() {
            if let SceneMark::Group(group) = mark {
                if group.name == name {
                    return Some(group);
                }
                if let Some(found) = group.find_group_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Replaces the direct child mark named `name`, or appends `mark` if there is none
    pub fn upsert_mark(&mut self, mark: SceneMark) {
        let name = mark.name().to_string();
        match self.marks.iter_mut().find(|m| m.name() == name) {
            Some(existing) => *existing = mark,
            None => self.marks.push(mark),
        }
    }

    pub fn child_group_mut(&mut self, name: &str) -> Result<&mut SceneGroup, SceneGraphError> {
        self.marks
            .iter_mut()
            .find_map(|mark| match mark {
                SceneMark::Group(group) if group.name == name => Some(group),
                _ => None,
            })
            .ok_or_else(|| SceneGraphError::GroupNotFound(name.to_string()))
    }
}

impl From<SceneGroup> for SceneMark {
    fn from(mark: SceneGroup) -> Self {
        SceneMark::Group(mark)
    }
}
