use std::collections::HashMap;

use crate::error::SceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

/// Root of a retained drawing: a fixed-size surface holding marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            marks: vec![],
            width,
            height,
            origin: [0.0, 0.0],
        }
    }

    pub fn groups(&self) -> Vec<&SceneGroup> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Group(g) = m else {
                    return None;
                };
                Some(g)
            })
            .collect()
    }

    pub fn children(&self) -> &[SceneMark] {
        &self.marks
    }

    pub fn get_mark(&self, mark_path: &[usize]) -> Option<&SceneMark> {
        // empty path is the root, which is not a mark
        let (first, rest) = mark_path.split_first()?;
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }
        Some(child)
    }

    /// Returns the absolute origin of the group at `group_path`
    pub fn get_absolute_origin(&self, group_path: &[usize]) -> Option<[f32; 2]> {
        let mut origin = self.origin;
        let mut siblings = self.marks.as_slice();
        for index in group_path {
            let SceneMark::Group(group) = siblings.get(*index)? else {
                return None;
            };
            origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
            siblings = &group.marks;
        }
        Some(origin)
    }

    /// Returns all of the group paths in the scene graph
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

    /// Returns mapping from the names of each named group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        self.group_paths()
            .into_iter()
            .filter_map(|path| match self.get_mark(&path) {
                Some(SceneMark::Group(group)) if !group.name.is_empty() => {
                    Some((group.name.clone(), path))
                }
                _ => None,
            })
            .collect()
    }

    pub fn find_group(&self, name: &str) -> Option<&SceneGroup> {
        self.marks.iter().find_map(|mark| match mark {
            SceneMark::Group(group) if group.name == name => Some(group),
            SceneMark::Group(group) => group.find_group(name),
            _ => None,
        })
    }

    pub fn find_group_mut(&mut self, name: &str) -> Result<&mut SceneGroup, SceneGraphError> {
        for mark in self.marks.iter_mut() {
            if let SceneMark::Group(group) = mark {
                if group.name == name {
                    return Ok(group);
                }
                if let Some(found) = group.find_group_mut(name) {
                    return Ok(found);
                }
            }
        }
        Err(SceneGraphError::GroupNotFound(name.to_string()))
    }
}
