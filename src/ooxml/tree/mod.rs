//! Document object tree.
//!
//! The table grid never touches markup directly. It edits a tree of
//! WordprocessingML elements through the [`DocumentTree`] trait: creating
//! elements, attaching and detaching them, and reading or writing
//! attributes. [`MemoryTree`] is the arena-backed implementation used by
//! default; it can also parse and serialize the markup.
//!
//! Element names are qualified names as they appear in the part
//! (`w:tc`, `w:tcPr`, ...).

mod memory;
mod reader;
mod writer;

pub use memory::MemoryTree;

use crate::ooxml::error::{OoxmlError, Result};
use smallvec::SmallVec;
use std::fmt;

/// WordprocessingML main namespace.
pub const W_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Handle to an element in a [`DocumentTree`].
///
/// Handles are plain indices; they never own the element. A handle stays
/// valid after the element is detached, so callers can still inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable element tree the table model is built on.
///
/// Implementors provide the primitive operations; lookups by name and the
/// get-or-create walk are provided on top of them.
pub trait DocumentTree {
    /// Create a detached element.
    fn create_element(&mut self, name: &str) -> NodeId;

    /// Attach a detached element as the `index`-th child of `parent`.
    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()>;

    /// Detach an element from its parent. The element keeps its own subtree.
    fn remove(&mut self, node: NodeId) -> Result<()>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Result<&[NodeId]>;

    fn name(&self, node: NodeId) -> Result<&str>;

    fn attribute(&self, node: NodeId, key: &str) -> Result<Option<&str>>;

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<()>;

    fn remove_attribute(&mut self, node: NodeId, key: &str) -> Result<()>;

    /// Character content of an element (e.g. `w:t`).
    fn text(&self, node: NodeId) -> Result<Option<&str>>;

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()>;

    /// Attach a detached element as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = self.children(parent)?.len();
        self.insert_child(parent, len, child)
    }

    /// Create an element and append it to `parent`.
    fn create_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let child = self.create_element(name);
        self.append_child(parent, child)?;
        Ok(child)
    }

    fn first_child_named(&self, parent: NodeId, name: &str) -> Result<Option<NodeId>> {
        for &child in self.children(parent)? {
            if self.name(child)? == name {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    fn children_named(&self, parent: NodeId, name: &str) -> Result<SmallVec<[NodeId; 8]>> {
        let mut found = SmallVec::new();
        for &child in self.children(parent)? {
            if self.name(child)? == name {
                found.push(child);
            }
        }
        Ok(found)
    }

    /// All descendants named `name`, in document order.
    fn descendants_named(&self, parent: NodeId, name: &str) -> Result<Vec<NodeId>> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(parent)?.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.name(node)? == name {
                found.push(node);
            }
            stack.extend(self.children(node)?.iter().rev().copied());
        }
        Ok(found)
    }

    /// Return the child named `name`, creating it when absent.
    ///
    /// `order` lists sibling names in schema order. A new child is inserted
    /// before the first existing sibling that comes after it in `order`;
    /// siblings not listed are ignored. An empty `order` appends.
    fn get_or_create_child(
        &mut self,
        parent: NodeId,
        name: &str,
        order: &[&str],
    ) -> Result<NodeId> {
        if let Some(existing) = self.first_child_named(parent, name)? {
            return Ok(existing);
        }

        let rank = order.iter().position(|n| *n == name);
        let index = {
            let children = self.children(parent)?;
            let mut index = children.len();
            if let Some(rank) = rank {
                for (i, &child) in children.iter().enumerate() {
                    let child_name = self.name(child)?;
                    if order[rank + 1..].contains(&child_name) {
                        index = i;
                        break;
                    }
                }
            }
            index
        };

        let child = self.create_element(name);
        self.insert_child(parent, index, child)?;
        Ok(child)
    }

    /// Detach every child named `name`.
    fn remove_children_named(&mut self, parent: NodeId, name: &str) -> Result<()> {
        for child in self.children_named(parent, name)? {
            self.remove(child)?;
        }
        Ok(())
    }

    /// Parse a numeric attribute, treating absence as `None`.
    fn attribute_as<T: std::str::FromStr>(&self, node: NodeId, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.attribute(node, key)? {
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                OoxmlError::InvalidFormat(format!(
                    "attribute {} on {} has unparsable value {:?}",
                    key,
                    self.name(node).unwrap_or("?"),
                    raw
                ))
            }),
            None => Ok(None),
        }
    }
}
