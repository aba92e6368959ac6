/// Paragraph helpers used by table cells.
///
/// Paragraph authoring proper belongs to the surrounding document API; cells
/// only need to create a paragraph holding a single text run and to read the
/// text back.
use crate::ooxml::error::Result;
use crate::ooxml::tree::{DocumentTree, NodeId};

/// Append `<w:p>` (with one run when `text` is non-empty) to `parent`.
pub(crate) fn append_paragraph<T: DocumentTree>(
    tree: &mut T,
    parent: NodeId,
    text: &str,
) -> Result<NodeId> {
    let para = tree.create_child(parent, "w:p")?;
    if !text.is_empty() {
        let run = tree.create_child(para, "w:r")?;
        let t = tree.create_child(run, "w:t")?;
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            tree.set_attribute(t, "xml:space", "preserve")?;
        }
        tree.set_text(t, text)?;
    }
    Ok(para)
}

/// Concatenated `w:t` content of one paragraph.
pub(crate) fn paragraph_text<T: DocumentTree>(tree: &T, para: NodeId) -> Result<String> {
    let mut text = String::new();
    for t in tree.descendants_named(para, "w:t")? {
        if let Some(content) = tree.text(t)? {
            text.push_str(content);
        }
    }
    Ok(text)
}
