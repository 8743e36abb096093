/// One `##` section block with its raw content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Trimmed heading text.
    pub name: String,
    /// 1-based line number of the heading.
    pub line: usize,
    /// Raw lines between this heading and the next, line terminators removed.
    pub lines: Vec<String>,
}

/// A document split into its title and section blocks, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ParsedDocument {
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Section names in the order they were encountered.
    pub fn heading_order(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.name.as_str()).collect()
    }
}
