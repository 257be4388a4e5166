use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneGraphError {
    #[error("No group named `{0}` in scene graph")]
    GroupNotFound(String),
}
