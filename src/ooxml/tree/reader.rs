//! Building a [`MemoryTree`] from WordprocessingML markup.
use super::memory::{MemoryTree, NodeData};
use super::NodeId;
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

impl MemoryTree {
    /// Parse a document part (or any well-formed fragment with a single
    /// root element) into a tree.
    ///
    /// Whitespace between elements is dropped; character content of leaf
    /// elements such as `w:t` is kept verbatim.
    pub fn from_xml(xml: &str) -> Result<Self> {
        // No trim_text: leading/trailing spaces inside w:t are significant
        let mut reader = Reader::from_str(xml);

        let mut tree = MemoryTree {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        let mut root: Option<NodeId> = None;
        let mut stack: Vec<NodeId> = Vec::with_capacity(32);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = tree.open_element(&e, &stack, &mut root)?;
                    stack.push(id);
                },
                Ok(Event::Empty(e)) => {
                    tree.open_element(&e, &stack, &mut root)?;
                },
                Ok(Event::End(_)) => {
                    if let Some(id) = stack.pop() {
                        tree.close_element(id);
                    }
                },
                Ok(Event::Text(e)) => {
                    if let Some(&top) = stack.last() {
                        let raw = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        tree.push_text(top, &unescape_xml(raw));
                    }
                },
                Ok(Event::CData(e)) => {
                    if let Some(&top) = stack.last() {
                        let raw = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        tree.push_text(top, raw);
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(&top) = stack.last() {
                        let name = std::str::from_utf8(&e)
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        let resolved = resolve_entity(name).ok_or_else(|| {
                            OoxmlError::Xml(format!("unknown entity reference &{};", name))
                        })?;
                        let mut buf = [0u8; 4];
                        tree.push_text(top, resolved.encode_utf8(&mut buf));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {},
            }
        }

        if !stack.is_empty() {
            return Err(OoxmlError::Xml(format!(
                "{} element(s) left unclosed",
                stack.len()
            )));
        }
        tree.root = root.ok_or_else(|| OoxmlError::Xml("no root element".to_string()))?;
        Ok(tree)
    }

    fn open_element(
        &mut self,
        e: &BytesStart<'_>,
        stack: &[NodeId],
        root: &mut Option<NodeId>,
    ) -> Result<NodeId> {
        let qname = e.name();
        let name =
            std::str::from_utf8(qname.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        let mut data = NodeData::new(name);

        for attr in e.attributes() {
            let attr = attr.map_err(|e| OoxmlError::Xml(e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            let value =
                std::str::from_utf8(&attr.value).map_err(|e| OoxmlError::Xml(e.to_string()))?;
            data.attributes
                .push((key.to_string(), unescape_xml(value)));
        }

        match stack.last() {
            Some(&parent) => {
                data.parent = Some(parent);
                let id = self.push_node(data);
                self.nodes[parent.index()].children.push(id);
                Ok(id)
            },
            None if root.is_none() => {
                let id = self.push_node(data);
                *root = Some(id);
                Ok(id)
            },
            None => Err(OoxmlError::Xml(format!(
                "second root element <{}>",
                name
            ))),
        }
    }

    fn push_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.index()]
            .text
            .get_or_insert_with(String::new)
            .push_str(text);
    }

    fn close_element(&mut self, node: NodeId) {
        // Indentation between child elements is not content
        let data = &mut self.nodes[node.index()];
        if !data.children.is_empty()
            && data
                .text
                .as_deref()
                .is_some_and(|t| t.trim().is_empty())
        {
            data.text = None;
        }
    }
}
