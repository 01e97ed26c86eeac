use serde::{Deserialize, Serialize};

/// Structured rich-text content stored inside leaf blocks.
///
/// The top level is always a sequence of element nodes; text only appears
/// inside them as [`TextRun`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<ElementNode>);

/// The single wrapper element type used by the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    #[default]
    #[serde(rename = "div")]
    Div,
}

/// An element node with ordered children
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    pub children: Vec<Node>,
}

/// A child of an element node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(ElementNode),
    Text(TextRun),
}

/// An atomic styled span of text. Style flags are independent of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub italic: bool,
    #[serde(default, rename = "underScore")]
    pub under_score: bool,
}

/// Style flags a [`TextRun`] can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Italic,
    UnderScore,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::Italic, Mark::UnderScore];

    /// Name used by the toolbar and in log output
    pub fn name(self) -> &'static str {
        match self {
            Mark::Italic => "italic",
            Mark::UnderScore => "underScore",
        }
    }
}

/// A set of active marks, used for typing with stored marks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkSet {
    pub italic: bool,
    pub under_score: bool,
}

impl MarkSet {
    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Italic => self.italic,
            Mark::UnderScore => self.under_score,
        }
    }

    pub fn set(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Italic => self.italic = on,
            Mark::UnderScore => self.under_score = on,
        }
    }

    pub fn toggled(mut self, mark: Mark) -> Self {
        self.set(mark, !self.has(mark));
        self
    }
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: MarkSet) -> Self {
        Self {
            text: text.into(),
            italic: marks.italic,
            under_score: marks.under_score,
        }
    }

    pub fn marks(&self) -> MarkSet {
        MarkSet {
            italic: self.italic,
            under_score: self.under_score,
        }
    }

    pub fn has(&self, mark: Mark) -> bool {
        self.marks().has(mark)
    }

    pub fn set(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Italic => self.italic = on,
            Mark::UnderScore => self.under_score = on,
        }
    }

    /// Number of characters (not bytes) in this run
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl ElementNode {
    pub fn div(children: Vec<Node>) -> Self {
        Self {
            kind: ElementKind::Div,
            children,
        }
    }

    /// Concatenated text of every run below this element
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for run in self.runs() {
            out.push_str(&run.text);
        }
        out
    }

    /// Text runs in document order, descending into nested elements
    pub fn runs(&self) -> Vec<&TextRun> {
        let mut out = Vec::new();
        collect_runs(&self.children, &mut out);
        out
    }

    /// Total character count of all runs below this element
    pub fn char_len(&self) -> usize {
        self.runs().iter().map(|run| run.char_len()).sum()
    }
}

fn collect_runs<'a>(nodes: &'a [Node], out: &mut Vec<&'a TextRun>) {
    for node in nodes {
        match node {
            Node::Text(run) => out.push(run),
            Node::Element(element) => collect_runs(&element.children, out),
        }
    }
}

impl RichText {
    /// A single paragraph holding one plain run
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self(vec![ElementNode::div(vec![Node::Text(TextRun::plain(text))])])
    }

    pub fn elements(&self) -> &[ElementNode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paragraph texts joined with newlines
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .map(ElementNode::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<ElementNode>> for RichText {
    fn from(elements: Vec<ElementNode>) -> Self {
        Self(elements)
    }
}
