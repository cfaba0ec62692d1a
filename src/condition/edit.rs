use super::{Condition, NodeKind};
use crate::config::EditorConfig;
use crate::error::EditError;

impl Condition {
    /// Returns the node addressed by `path`, a sequence of child indices.
    ///
    /// `All`/`Any` children are addressed by position; the single child of a
    /// `Not` is index 0.
    pub fn get_at_path(&self, path: &[usize]) -> Result<&Condition, EditError> {
        let mut node = self;
        for (step, &index) in path.iter().enumerate() {
            node = node.child_at(index).map_err(|reason| EditError::PathError {
                path: path.to_vec(),
                step,
                reason,
            })?;
        }
        Ok(node)
    }

    /// Returns a new tree with the node at `path` replaced by `next`.
    ///
    /// Only the nodes along the path are rebuilt; `self` is left untouched.
    pub fn replace_at_path(&self, path: &[usize], next: Condition) -> Result<Condition, EditError> {
        self.map_at(path, path.len(), 0, |_| Ok(next))
    }

    /// Removes the node at `path` from its parent.
    ///
    /// A group never becomes empty: removing its last child leaves a single
    /// default leaf. The child of a `Not` is reset to a default leaf.
    pub fn remove_at_path(&self, path: &[usize]) -> Result<Condition, EditError> {
        let Some((&index, parent_path)) = path.split_last() else {
            return Err(EditError::InvalidRemoval);
        };
        let step = parent_path.len();

        self.map_at(path, step, 0, |parent| match parent {
            Condition::All { children } => Ok(Condition::All {
                children: remove_child(children, index, path, step)?,
            }),
            Condition::Any { children } => Ok(Condition::Any {
                children: remove_child(children, index, path, step)?,
            }),
            Condition::Not { .. } if index == 0 => {
                tracing::debug!(?path, "reset NOT child to a default leaf");
                Ok(Condition::not(Condition::default_leaf()))
            }
            other => Err(EditError::PathError {
                path: path.to_vec(),
                step,
                reason: other.descend_error(index),
            }),
        })
    }

    /// Appends a new node of `kind` to the group at `path`.
    ///
    /// A `Not` holds exactly one child, so the new node replaces it.
    pub fn add_child(&self, path: &[usize], kind: NodeKind) -> Result<Condition, EditError> {
        self.map_at(path, path.len(), 0, |node| match node {
            Condition::All { children } => Ok(Condition::All {
                children: push_child(children, kind),
            }),
            Condition::Any { children } => Ok(Condition::Any {
                children: push_child(children, kind),
            }),
            Condition::Not { .. } => Ok(Condition::not(kind.new_node())),
            Condition::Leaf(_) => Err(EditError::NotAGroup {
                path: path.to_vec(),
            }),
        })
    }

    fn child_at(&self, index: usize) -> Result<&Condition, String> {
        match self {
            Condition::All { children } | Condition::Any { children } => {
                children.get(index).ok_or_else(|| self.descend_error(index))
            }
            Condition::Not { child } if index == 0 => Ok(child),
            _ => Err(self.descend_error(index)),
        }
    }

    fn descend_error(&self, index: usize) -> String {
        match self {
            Condition::All { children } | Condition::Any { children } => format!(
                "index {} is out of bounds for a group of {} child(ren)",
                index,
                children.len()
            ),
            Condition::Not { .. } => format!(
                "index {} is out of bounds for a NOT node, which has a single child",
                index
            ),
            Condition::Leaf(_) => "cannot descend into a leaf".to_string(),
        }
    }

    /// Rebuilds the spine from `self` down to `full[..end]` and applies `f` there.
    fn map_at<F>(&self, full: &[usize], end: usize, step: usize, f: F) -> Result<Condition, EditError>
    where
        F: FnOnce(&Condition) -> Result<Condition, EditError>,
    {
        if step == end {
            return f(self);
        }
        let index = full[step];
        let path_error = |reason: String| EditError::PathError {
            path: full.to_vec(),
            step,
            reason,
        };

        match self {
            Condition::All { children } | Condition::Any { children } => {
                let target = children
                    .get(index)
                    .ok_or_else(|| path_error(self.descend_error(index)))?;
                let replaced = target.map_at(full, end, step + 1, f)?;
                let mut next = children.clone();
                next[index] = replaced;
                Ok(match self {
                    Condition::Any { .. } => Condition::Any { children: next },
                    _ => Condition::All { children: next },
                })
            }
            Condition::Not { child } if index == 0 => {
                Ok(Condition::not(child.map_at(full, end, step + 1, f)?))
            }
            _ => Err(path_error(self.descend_error(index))),
        }
    }
}

fn remove_child(
    children: &[Condition],
    index: usize,
    path: &[usize],
    step: usize,
) -> Result<Vec<Condition>, EditError> {
    if index >= children.len() {
        return Err(EditError::PathError {
            path: path.to_vec(),
            step,
            reason: format!(
                "index {} is out of bounds for a group of {} child(ren)",
                index,
                children.len()
            ),
        });
    }
    if children.len() == 1 {
        tracing::debug!(?path, "removed last child; group keeps a default leaf");
        return Ok(vec![Condition::default_leaf()]);
    }
    let mut next = children.to_vec();
    next.remove(index);
    Ok(next)
}

fn push_child(children: &[Condition], kind: NodeKind) -> Vec<Condition> {
    let mut next = children.to_vec();
    next.push(kind.new_node());
    next
}

/// Whether the builder may add a nested group under the node at `path`.
///
/// The root group sits at level 1, so a group added under `path` lands at
/// level `path.len() + 2`.
pub fn group_child_allowed(path: &[usize], config: &EditorConfig) -> bool {
    path.len() + 2 <= config.max_depth
}
