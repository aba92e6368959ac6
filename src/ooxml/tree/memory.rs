//! Arena-backed implementation of [`DocumentTree`].
use super::{DocumentTree, NodeId, W_NAMESPACE};
use crate::ooxml::error::{OoxmlError, Result};
use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub(super) struct NodeData {
    pub(super) name: String,
    pub(super) attributes: SmallVec<[(String, String); 4]>,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
    pub(super) text: Option<String>,
}

impl NodeData {
    pub(super) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: SmallVec::new(),
            children: Vec::new(),
            parent: None,
            text: None,
        }
    }
}

/// An in-memory WordprocessingML element tree.
///
/// Elements live in an arena and are addressed by [`NodeId`]. Detaching an
/// element does not free its slot, so handles held by callers never dangle.
///
/// # Example
///
/// ```
/// use docx_fluent::ooxml::tree::{DocumentTree, MemoryTree};
///
/// let mut tree = MemoryTree::new();
/// let body = tree.body().unwrap();
/// let para = tree.create_child(body, "w:p").unwrap();
/// assert_eq!(tree.parent(para), Some(body));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryTree {
    pub(super) nodes: Vec<NodeData>,
    pub(super) root: NodeId,
}

impl MemoryTree {
    /// Create an empty `w:document` with a `w:body`.
    pub fn new() -> Self {
        let mut root = NodeData::new("w:document");
        root.attributes
            .push(("xmlns:w".to_string(), W_NAMESPACE.to_string()));
        let mut tree = Self {
            nodes: vec![root],
            root: NodeId(0),
        };
        let body = tree.create_element("w:body");
        tree.nodes[0].children.push(body);
        tree.nodes[body.index()].parent = Some(tree.root);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first `w:body` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        if self.nodes[self.root.index()].name == "w:body" {
            return Some(self.root);
        }
        self.descendants_named(self.root, "w:body")
            .ok()
            .and_then(|found| found.first().copied())
    }

    /// Whether `node` is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes.get(id.index()).and_then(|n| n.parent);
        }
        false
    }

    /// Total number of elements ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub(super) fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id.index()).ok_or(OoxmlError::NodeNotFound(id))
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(id.index())
            .ok_or(OoxmlError::NodeNotFound(id))
    }

    pub(super) fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree for MemoryTree {
    fn create_element(&mut self, name: &str) -> NodeId {
        self.push_node(NodeData::new(name))
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if self.node(child)?.parent.is_some() || child == self.root {
            return Err(OoxmlError::InvalidArgument(format!(
                "node {} is already attached",
                child
            )));
        }

        // Refuse to attach an element beneath its own subtree
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(OoxmlError::InvalidArgument(format!(
                    "node {} cannot be attached inside itself",
                    child
                )));
            }
            ancestor = self.node(id)?.parent;
        }

        let siblings = &mut self.node_mut(parent)?.children;
        if index > siblings.len() {
            return Err(OoxmlError::OutOfRange {
                what: "child index",
                index,
                bound: siblings.len(),
            });
        }
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<()> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != node);
        self.node_mut(node)?.parent = None;
        Ok(())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(node)?.children.as_slice())
    }

    fn name(&self, node: NodeId) -> Result<&str> {
        Ok(self.node(node)?.name.as_str())
    }

    fn attribute(&self, node: NodeId, key: &str) -> Result<Option<&str>> {
        Ok(self
            .node(node)?
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str()))
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<()> {
        let attributes = &mut self.node_mut(node)?.attributes;
        match attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            },
            None => attributes.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, key: &str) -> Result<()> {
        self.node_mut(node)?.attributes.retain(|(k, _)| k != key);
        Ok(())
    }

    fn text(&self, node: NodeId) -> Result<Option<&str>> {
        Ok(self.node(node)?.text.as_deref())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.node_mut(node)?.text = Some(text.to_string());
        Ok(())
    }
}
