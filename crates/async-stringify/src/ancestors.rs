//! Containers on the active descent path, for cycle detection.
//!
//! Membership mirrors the recursion stack: a container is entered before its
//! children are visited and left once they are done, so the same container
//! may appear any number of times in a graph as long as it is never its own
//! ancestor.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::value::ContainerId;

pub(crate) struct Ancestors {
    stack: RefCell<Vec<(ContainerId, String)>>,
    max_depth: Option<usize>,
}

impl Ancestors {
    pub(crate) fn new(max_depth: Option<usize>) -> Self {
        Self {
            stack: RefCell::new(Vec::new()),
            max_depth,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Pushes `id`, reached under `key`, for as long as the returned guard
    /// lives.
    pub(crate) fn enter(&self, id: ContainerId, key: &str) -> Result<AncestorGuard<'_>> {
        let mut stack = self.stack.borrow_mut();
        if stack.iter().any(|(seen, _)| *seen == id) {
            return Err(Error::CircularReference {
                path: format_path(&stack, key),
            });
        }
        if let Some(limit) = self.max_depth {
            if stack.len() >= limit {
                return Err(Error::DepthLimitExceeded {
                    limit,
                    path: format_path(&stack, key),
                });
            }
        }
        stack.push((id, key.to_string()));
        Ok(AncestorGuard { owner: self })
    }
}

pub(crate) struct AncestorGuard<'a> {
    owner: &'a Ancestors,
}

impl Drop for AncestorGuard<'_> {
    fn drop(&mut self) {
        self.owner.stack.borrow_mut().pop();
    }
}

// The first entry is always the root, reached under the empty key.
fn format_path(stack: &[(ContainerId, String)], key: &str) -> String {
    if stack.is_empty() {
        return String::from("<root>");
    }
    let segments: Vec<&str> = stack
        .iter()
        .skip(1)
        .map(|(_, k)| k.as_str())
        .chain(std::iter::once(key))
        .collect();
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;

    #[test]
    fn guard_pops_on_drop() {
        let ancestors = Ancestors::new(None);
        let a = Object::new();
        let b = Object::new();
        {
            let _root = ancestors.enter(a.id(), "").unwrap();
            {
                let _child = ancestors.enter(b.id(), "b").unwrap();
                assert_eq!(ancestors.depth(), 2);
            }
            assert_eq!(ancestors.depth(), 1);
            // b is no longer an ancestor, so it may be entered again.
            let _again = ancestors.enter(b.id(), "c").unwrap();
        }
        assert_eq!(ancestors.depth(), 0);
    }

    #[test]
    fn reentering_an_ancestor_reports_the_path() {
        let ancestors = Ancestors::new(None);
        let a = Object::new();
        let b = Object::new();
        let _root = ancestors.enter(a.id(), "").unwrap();
        let _b = ancestors.enter(b.id(), "b").unwrap();
        let err = ancestors.enter(a.id(), "back").err().unwrap();
        match err {
            Error::CircularReference { path } => assert_eq!(path, "b.back"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ancestors.depth(), 2);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let ancestors = Ancestors::new(Some(1));
        let a = Object::new();
        let b = Object::new();
        let _root = ancestors.enter(a.id(), "").unwrap();
        assert!(matches!(
            ancestors.enter(b.id(), "b"),
            Err(Error::DepthLimitExceeded { limit: 1, .. })
        ));
    }
}
