use super::{
    StructureError,
    classify::LineClass,
    types::{Block, ParsedDocument},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Skipping leading blank lines, waiting for the title heading.
    BeforeTitle,
    /// Title seen; only blank lines are allowed until the first section.
    Preamble,
    /// Collecting lines into the last opened block.
    InSection,
}

/// Phase 2 of block splitting: a state machine fed one classified line at a time.
pub struct BlockBuilder {
    state: State,
    title: Option<String>,
    blocks: Vec<Block>,
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: State::BeforeTitle,
            title: None,
            blocks: vec![],
        }
    }

    /// Feeds the raw `text` of line `line_no` (1-based) classified as `class`.
    pub fn push(&mut self, line_no: usize, text: &str, class: &LineClass) -> Result<(), StructureError> {
        match (self.state, class) {
            (State::BeforeTitle, LineClass::Blank) => Ok(()),
            (State::BeforeTitle, LineClass::Title(title)) => {
                self.title = Some(title.to_string());
                self.state = State::Preamble;
                Ok(())
            }
            (State::BeforeTitle, _) => Err(StructureError::MalformedTitle {
                line: line_no,
                found: text.to_string(),
            }),
            (_, LineClass::Title(_)) => Err(StructureError::SecondTitle { line: line_no }),
            (_, LineClass::Section(name)) => self.open_block(line_no, name),
            (State::Preamble, LineClass::Blank) => Ok(()),
            (State::Preamble, _) => Err(StructureError::Preamble { line: line_no }),
            (State::InSection, _) => {
                if let Some(block) = self.blocks.last_mut() {
                    block.lines.push(text.to_string());
                }
                Ok(())
            }
        }
    }

    pub fn finish(self) -> Result<ParsedDocument, StructureError> {
        let title = self.title.ok_or(StructureError::MissingTitle)?;
        Ok(ParsedDocument {
            title,
            blocks: self.blocks,
        })
    }

    fn open_block(&mut self, line_no: usize, name: &str) -> Result<(), StructureError> {
        if let Some(first) = self.blocks.iter().find(|b| b.name == name) {
            return Err(StructureError::DuplicateSection {
                name: name.to_string(),
                line: line_no,
                first_line: first.line,
            });
        }
        self.blocks.push(Block {
            name: name.to_string(),
            line: line_no,
            lines: vec![],
        });
        self.state = State::InSection;
        Ok(())
    }
}
