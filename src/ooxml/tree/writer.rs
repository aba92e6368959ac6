//! Serializing a [`MemoryTree`] back to markup.
use super::memory::MemoryTree;
use super::NodeId;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

impl MemoryTree {
    /// Serialize the subtree rooted at `node`.
    pub fn to_xml(&self, node: NodeId) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        self.write_node(node, &mut xml)?;
        Ok(xml)
    }

    /// Serialize the whole document, including the XML declaration.
    pub fn document_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECLARATION);
        self.write_node(self.root, &mut xml)?;
        Ok(xml)
    }

    fn write_node(&self, node: NodeId, xml: &mut String) -> Result<()> {
        let data = self.node(node)?;

        write!(xml, "<{}", data.name)?;
        for (key, value) in &data.attributes {
            write!(xml, " {}=\"{}\"", key, escape_xml(value))?;
        }

        let text = data.text.as_deref().filter(|t| !t.is_empty());
        if data.children.is_empty() && text.is_none() {
            xml.push_str("/>");
            return Ok(());
        }

        xml.push('>');
        if let Some(text) = text {
            xml.push_str(&escape_xml(text));
        }
        for &child in &data.children {
            self.write_node(child, xml)?;
        }
        write!(xml, "</{}>", data.name)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::tree::DocumentTree;

    #[test]
    fn test_write_fragment() {
        let mut tree = MemoryTree::new();
        let body = tree.body().unwrap();
        let p = tree.create_child(body, "w:p").unwrap();
        let r = tree.create_child(p, "w:r").unwrap();
        let t = tree.create_child(r, "w:t").unwrap();
        tree.set_text(t, "A & B").unwrap();
        tree.create_child(body, "w:sectPr").unwrap();

        assert_eq!(
            tree.to_xml(body).unwrap(),
            "<w:body><w:p><w:r><w:t>A &amp; B</w:t></w:r></w:p><w:sectPr/></w:body>"
        );
    }

    #[test]
    fn test_document_declaration_and_reparse() {
        let mut tree = MemoryTree::new();
        let body = tree.body().unwrap();
        let shd = tree.create_child(body, "w:shd").unwrap();
        tree.set_attribute(shd, "w:fill", "\"quoted\"").unwrap();

        let xml = tree.document_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("w:fill=\"&quot;quoted&quot;\""));

        let reparsed = MemoryTree::from_xml(&xml).unwrap();
        let shd = reparsed
            .descendants_named(reparsed.root(), "w:shd")
            .unwrap()[0];
        assert_eq!(reparsed.attribute(shd, "w:fill").unwrap(), Some("\"quoted\""));
    }
}
