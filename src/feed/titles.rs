use super::tree::{walk, MarkupNode, Visitor, Walk};

const TITLE_TAG: &str = "title";

/// Gathers the text of every `title` element not containing `excluded`.
///
/// Whitespace runs inside a title collapse to a single space, so every
/// headline can be typed on one line.
#[derive(Debug)]
pub struct TitleCollector<'a> {
    excluded: &'a str,
    titles: Vec<String>,
}

impl<'a> TitleCollector<'a> {
    pub fn new(excluded: &'a str) -> Self {
        Self {
            excluded,
            titles: Vec::new(),
        }
    }

    pub fn into_titles(self) -> Vec<String> {
        self.titles
    }

    fn is_excluded(&self, text: &str) -> bool {
        !self.excluded.is_empty() && text.contains(self.excluded)
    }
}

impl<N: MarkupNode> Visitor<N> for TitleCollector<'_> {
    fn visit(&mut self, node: &N) -> Walk {
        if node.tag_name() != Some(TITLE_TAG) {
            return Walk::Descend;
        }
        let text = node
            .text_content()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() && !self.is_excluded(&text) {
            self.titles.push(text);
        }
        Walk::Skip
    }
}

/// Titles of `root` in document order.
pub fn collect_titles<N: MarkupNode>(root: &N, excluded: &str) -> Vec<String> {
    let mut collector = TitleCollector::new(excluded);
    walk(root, &mut collector);
    collector.into_titles()
}
