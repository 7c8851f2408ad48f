/// Read-only view of a node in a parsed markup document.
pub trait MarkupNode: Sized {
    /// Qualified tag name, `None` for text nodes.
    fn tag_name(&self) -> Option<&str>;

    /// Concatenated text of this node and all of its descendants.
    fn text_content(&self) -> String;

    fn children(&self) -> &[Self];
}

/// What `walk` should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Descend,
    Skip,
}

pub trait Visitor<N: MarkupNode> {
    fn visit(&mut self, node: &N) -> Walk;
}

/// Depth-first pre-order traversal starting at `node`.
pub fn walk<N, V>(node: &N, visitor: &mut V)
where
    N: MarkupNode,
    V: Visitor<N>,
{
    if visitor.visit(node) == Walk::Skip {
        return;
    }
    for child in node.children() {
        walk(child, visitor);
    }
}
