use std::ops::Range;

use serde::Serialize;

/// Counts of elements created, kept and removed by one render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Key-less join of `new_len` data items against `old_len` retained elements.
///
/// Items are matched by index: the first `min(old_len, new_len)` elements are
/// updated, surplus data enters and surplus elements exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
    pub enter: Range<usize>,
    pub update: Range<usize>,
    pub exit: Range<usize>,
}

impl JoinPlan {
    pub fn positional(old_len: usize, new_len: usize) -> Self {
        let kept = old_len.min(new_len);
        Self {
            enter: kept..new_len,
            update: 0..kept,
            exit: kept..old_len,
        }
    }

    pub fn summary(&self) -> RenderSummary {
        RenderSummary {
            entered: self.enter.len(),
            updated: self.update.len(),
            exited: self.exit.len(),
        }
    }
}
