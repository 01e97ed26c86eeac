use crate::models::{ElementNode, Mark, MarkSet, Node, RichText, TextRun};

/// A caret position: index of a top-level element and a character offset
/// into the flattened text of its runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// The in-memory value an edit session works on.
///
/// Every keystroke and format toggle lands here. Nothing is written to the
/// block store until the session commits.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingContent {
    content: RichText,
    caret: Position,
    anchor: Option<Position>,
    stored_marks: Option<MarkSet>,
}

/// One piece of a rendered pending block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text {
        text: String,
        marks: MarkSet,
        selected: bool,
    },
    Caret,
}

/// Render-ready view of one top-level element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub segments: Vec<Segment>,
}

impl PendingContent {
    /// Start editing `content`, caret at the end. Empty content becomes a
    /// single empty paragraph so there is somewhere to type.
    pub fn new(content: RichText) -> Self {
        let content = if content.is_empty() {
            RichText::paragraph("")
        } else {
            content
        };
        let last = content.0.len() - 1;
        let caret = Position::new(last, content.0[last].char_len());
        Self {
            content,
            caret,
            anchor: None,
            stored_marks: None,
        }
    }

    pub fn content(&self) -> &RichText {
        &self.content
    }

    pub fn into_content(self) -> RichText {
        self.content
    }

    pub fn caret(&self) -> Position {
        self.caret
    }

    /// Ordered `(start, end)` of a non-empty selection
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.caret) {
            std::cmp::Ordering::Less => Some((anchor, self.caret)),
            std::cmp::Ordering::Greater => Some((self.caret, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn stored_marks(&self) -> Option<MarkSet> {
        self.stored_marks
    }

    pub(crate) fn block_count(&self) -> usize {
        self.content.0.len()
    }

    pub(crate) fn block_len(&self, block: usize) -> usize {
        self.content.0.get(block).map(ElementNode::char_len).unwrap_or(0)
    }

    pub(crate) fn set_caret(&mut self, caret: Position, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
        self.caret = caret;
        if self.anchor == Some(caret) {
            self.anchor = None;
        }
        self.stored_marks = None;
    }

    pub(crate) fn select_all(&mut self) {
        let last = self.block_count() - 1;
        self.anchor = Some(Position::new(0, 0));
        self.caret = Position::new(last, self.block_len(last));
        if self.anchor == Some(self.caret) {
            self.anchor = None;
        }
    }

    /// Marks typing would use right now
    pub fn active_marks(&self) -> MarkSet {
        self.stored_marks.unwrap_or_else(|| self.marks_at_caret())
    }

    fn marks_at_caret(&self) -> MarkSet {
        let Some(element) = self.content.0.get(self.caret.block) else {
            return MarkSet::default();
        };
        let offset = self.caret.offset;
        let spans = run_spans(&element.children);
        spans
            .iter()
            .find(|s| s.start < offset && offset <= s.start + s.len)
            .or_else(|| spans.iter().find(|s| s.start == offset))
            .map(|s| s.marks)
            .unwrap_or_default()
    }

    pub(crate) fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.delete_selection();
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.split_block();
            }
            if line.is_empty() {
                continue;
            }
            let marks = self.active_marks();
            let Position { block, offset } = self.caret;
            insert_run_text(&mut self.content.0[block], offset, line, marks);
            self.caret.offset += line.chars().count();
            self.stored_marks = None;
        }
        true
    }

    pub(crate) fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let Position { block, offset } = self.caret;
        if offset > 0 {
            let marks = self.marks_at_caret();
            delete_chars(&mut self.content.0[block], offset - 1, offset, marks);
            self.caret.offset -= 1;
            true
        } else if block > 0 {
            self.merge_with_previous(block);
            true
        } else {
            false
        }
    }

    pub(crate) fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let Position { block, offset } = self.caret;
        if offset < self.block_len(block) {
            let marks = self.marks_at_caret();
            delete_chars(&mut self.content.0[block], offset, offset + 1, marks);
            true
        } else if block + 1 < self.block_count() {
            let caret = self.caret;
            self.merge_with_previous(block + 1);
            self.caret = caret;
            true
        } else {
            false
        }
    }

    fn merge_with_previous(&mut self, block: usize) {
        let current = self.content.0.remove(block);
        let previous = &mut self.content.0[block - 1];
        let join_at = previous.char_len();
        previous.children.extend(current.children);
        prune(previous, MarkSet::default());
        self.caret = Position::new(block - 1, join_at);
        self.anchor = None;
    }

    pub(crate) fn split_block(&mut self) -> bool {
        self.delete_selection();
        let Position { block, offset } = self.caret;
        let marks = self.marks_at_caret();
        let element = &self.content.0[block];
        let len = element.char_len();
        let mut left = slice_element(element, 0, offset);
        let mut right = slice_element(element, offset, len);
        prune(&mut left, marks);
        prune(&mut right, marks);
        self.content.0.splice(block..=block, [left, right]);
        self.caret = Position::new(block + 1, 0);
        self.anchor = None;
        true
    }

    /// Remove the selected text. Returns false when nothing was selected.
    pub(crate) fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        if start.block == end.block {
            let marks = self.marks_at_caret();
            delete_chars(&mut self.content.0[start.block], start.offset, end.offset, marks);
        } else {
            let first = &self.content.0[start.block];
            let last = &self.content.0[end.block];
            let mut merged = slice_element(first, 0, start.offset);
            let tail = slice_element(last, end.offset, last.char_len());
            merged.children.extend(tail.children);
            prune(&mut merged, MarkSet::default());
            self.content.0.splice(start.block..=end.block, [merged]);
        }
        self.caret = start;
        self.anchor = None;
        true
    }

    /// Toggle a mark over the selection, or for the next typed text when
    /// the selection is collapsed
    pub(crate) fn toggle_mark(&mut self, mark: Mark) -> bool {
        let Some((start, end)) = self.selection() else {
            self.stored_marks = Some(self.active_marks().toggled(mark));
            return true;
        };

        let mut ranges = Vec::new();
        for block in start.block..=end.block {
            let from = if block == start.block { start.offset } else { 0 };
            let to = if block == end.block {
                end.offset
            } else {
                self.block_len(block)
            };
            if from < to {
                split_runs_at(&mut self.content.0[block], from);
                split_runs_at(&mut self.content.0[block], to);
                ranges.push((block, from, to));
            }
        }

        let mut all_marked = true;
        let mut any = false;
        for &(block, from, to) in &ranges {
            for_each_run_in(&mut self.content.0[block], from, to, &mut |run| {
                any = true;
                all_marked &= run.has(mark);
            });
        }
        if !any {
            return false;
        }
        for &(block, from, to) in &ranges {
            let element = &mut self.content.0[block];
            for_each_run_in(element, from, to, &mut |run| run.set(mark, !all_marked));
            prune(element, MarkSet::default());
        }
        true
    }

    /// Segments to draw for each block, with the selection and the caret
    pub fn view(&self) -> Vec<BlockView> {
        let selection = self.selection();
        self.content
            .0
            .iter()
            .enumerate()
            .map(|(block, element)| {
                let len = element.char_len();
                let (sel_from, sel_to) = match selection {
                    Some((start, end)) if start.block <= block && block <= end.block => (
                        if block == start.block { start.offset } else { 0 },
                        if block == end.block { end.offset } else { len },
                    ),
                    _ => (0, 0),
                };
                let caret = (self.caret.block == block).then_some(self.caret.offset);
                BlockView {
                    segments: block_segments(element, sel_from, sel_to, caret),
                }
            })
            .collect()
    }
}

fn block_segments(
    element: &ElementNode,
    sel_from: usize,
    sel_to: usize,
    caret: Option<usize>,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut caret_done = caret.is_none();

    for span in run_spans(&element.children) {
        if span.len == 0 {
            continue;
        }
        let end = span.start + span.len;
        let mut cuts = vec![span.start, end];
        for cut in [Some(sel_from), Some(sel_to), caret].into_iter().flatten() {
            if span.start < cut && cut < end {
                cuts.push(cut);
            }
        }
        cuts.sort_unstable();
        cuts.dedup();

        for window in cuts.windows(2) {
            let (from, to) = (window[0], window[1]);
            if !caret_done && caret == Some(from) {
                segments.push(Segment::Caret);
                caret_done = true;
            }
            segments.push(Segment::Text {
                text: char_slice(&span.text, from - span.start, to - span.start),
                marks: span.marks,
                selected: sel_from <= from && to <= sel_to && sel_from < sel_to,
            });
        }
    }
    if !caret_done {
        segments.push(Segment::Caret);
    }
    segments
}

/// Position of one run inside the flattened text of an element
struct RunSpan {
    start: usize,
    len: usize,
    marks: MarkSet,
    text: String,
}

fn run_spans(nodes: &[Node]) -> Vec<RunSpan> {
    fn walk(nodes: &[Node], cursor: &mut usize, out: &mut Vec<RunSpan>) {
        for node in nodes {
            match node {
                Node::Text(run) => {
                    let len = run.char_len();
                    out.push(RunSpan {
                        start: *cursor,
                        len,
                        marks: run.marks(),
                        text: run.text.clone(),
                    });
                    *cursor += len;
                }
                Node::Element(element) => walk(&element.children, cursor, out),
            }
        }
    }
    let mut out = Vec::new();
    walk(nodes, &mut 0, &mut out);
    out
}

fn char_slice(text: &str, from: usize, to: usize) -> String {
    text.chars().skip(from).take(to.saturating_sub(from)).collect()
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

/// Copy of `element` keeping only the characters in `from..to`. Nested
/// elements keep their shape; runs and elements left empty are dropped.
fn slice_element(element: &ElementNode, from: usize, to: usize) -> ElementNode {
    fn slice_nodes(nodes: &[Node], from: usize, to: usize, cursor: &mut usize) -> Vec<Node> {
        let mut out = Vec::new();
        for node in nodes {
            match node {
                Node::Text(run) => {
                    let start = *cursor;
                    let len = run.char_len();
                    *cursor += len;
                    let lo = from.max(start);
                    let hi = to.min(start + len);
                    if lo < hi {
                        out.push(Node::Text(TextRun {
                            text: char_slice(&run.text, lo - start, hi - start),
                            ..run.clone()
                        }));
                    }
                }
                Node::Element(nested) => {
                    let children = slice_nodes(&nested.children, from, to, cursor);
                    if !children.is_empty() {
                        out.push(Node::Element(ElementNode {
                            kind: nested.kind,
                            children,
                        }));
                    }
                }
            }
        }
        out
    }
    ElementNode {
        kind: element.kind,
        children: slice_nodes(&element.children, from, to, &mut 0),
    }
}

/// Make sure a run boundary falls exactly at `offset`
fn split_runs_at(element: &mut ElementNode, offset: usize) {
    fn split(nodes: &mut Vec<Node>, offset: usize, cursor: &mut usize) -> bool {
        let mut index = 0;
        while index < nodes.len() {
            let mut tail = None;
            match &mut nodes[index] {
                Node::Text(run) => {
                    let start = *cursor;
                    let len = run.char_len();
                    if start < offset && offset < start + len {
                        let at = byte_index(&run.text, offset - start);
                        let right = run.text.split_off(at);
                        tail = Some(Node::Text(TextRun {
                            text: right,
                            ..run.clone()
                        }));
                    } else {
                        *cursor += len;
                    }
                }
                Node::Element(nested) => {
                    if split(&mut nested.children, offset, cursor) {
                        return true;
                    }
                }
            }
            if let Some(tail) = tail {
                nodes.insert(index + 1, tail);
                return true;
            }
            index += 1;
        }
        false
    }
    split(&mut element.children, offset, &mut 0);
}

/// Call `f` on every non-empty run lying fully inside `from..to`
fn for_each_run_in(
    element: &mut ElementNode,
    from: usize,
    to: usize,
    f: &mut dyn FnMut(&mut TextRun),
) {
    fn visit(
        nodes: &mut [Node],
        from: usize,
        to: usize,
        cursor: &mut usize,
        f: &mut dyn FnMut(&mut TextRun),
    ) {
        for node in nodes {
            match node {
                Node::Text(run) => {
                    let start = *cursor;
                    let len = run.char_len();
                    *cursor += len;
                    if len > 0 && from <= start && start + len <= to {
                        f(run);
                    }
                }
                Node::Element(nested) => visit(&mut nested.children, from, to, cursor, f),
            }
        }
    }
    visit(&mut element.children, from, to, &mut 0, f);
}

/// Remove characters `from..to` in place
fn delete_chars(element: &mut ElementNode, from: usize, to: usize, fallback: MarkSet) {
    fn delete(nodes: &mut [Node], from: usize, to: usize, cursor: &mut usize) {
        for node in nodes {
            match node {
                Node::Text(run) => {
                    let start = *cursor;
                    let len = run.char_len();
                    *cursor += len;
                    let lo = from.max(start);
                    let hi = to.min(start + len);
                    if lo < hi {
                        let a = byte_index(&run.text, lo - start);
                        let b = byte_index(&run.text, hi - start);
                        run.text.replace_range(a..b, "");
                    }
                }
                Node::Element(nested) => delete(&mut nested.children, from, to, cursor),
            }
        }
    }
    delete(&mut element.children, from, to, &mut 0);
    prune(element, fallback);
}

/// Drop empty runs and elements and merge neighbouring runs with equal
/// marks. An element left without any run gets one empty run carrying
/// `fallback` marks.
fn prune(element: &mut ElementNode, fallback: MarkSet) {
    fn prune_nodes(nodes: &mut Vec<Node>) {
        nodes.retain_mut(|node| match node {
            Node::Text(run) => !run.text.is_empty(),
            Node::Element(nested) => {
                prune_nodes(&mut nested.children);
                !nested.children.is_empty()
            }
        });

        let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
        for node in nodes.drain(..) {
            if let (Some(Node::Text(previous)), Node::Text(run)) = (merged.last_mut(), &node)
                && previous.marks() == run.marks()
            {
                previous.text.push_str(&run.text);
                continue;
            }
            merged.push(node);
        }
        *nodes = merged;
    }
    prune_nodes(&mut element.children);
    if element.children.is_empty() {
        element
            .children
            .push(Node::Text(TextRun::with_marks("", fallback)));
    }
}

/// Insert `text` at `offset`, extending a neighbouring run when its marks
/// match and adding a new run otherwise
fn insert_run_text(element: &mut ElementNode, offset: usize, text: &str, marks: MarkSet) {
    split_runs_at(element, offset);

    fn place(
        nodes: &mut Vec<Node>,
        offset: usize,
        text: &str,
        marks: MarkSet,
        cursor: &mut usize,
    ) -> bool {
        let mut index = 0;
        while index < nodes.len() {
            let mut insert_after = false;
            match &mut nodes[index] {
                Node::Text(run) => {
                    let start = *cursor;
                    let len = run.char_len();
                    let end = start + len;
                    if len == 0 && start == offset {
                        run.text.push_str(text);
                        run.italic = marks.italic;
                        run.under_score = marks.under_score;
                        return true;
                    }
                    if end == offset && run.marks() == marks {
                        run.text.push_str(text);
                        return true;
                    }
                    if start == offset && run.marks() == marks {
                        run.text.insert_str(0, text);
                        return true;
                    }
                    if start == offset {
                        nodes.insert(index, Node::Text(TextRun::with_marks(text, marks)));
                        return true;
                    }
                    if end == offset {
                        insert_after = true;
                    }
                    *cursor = end;
                }
                Node::Element(nested) => {
                    if place(&mut nested.children, offset, text, marks, cursor) {
                        return true;
                    }
                }
            }
            if insert_after {
                // only insert here when no later sibling starts at `offset`
                // with matching marks
                let next_matches = matches!(
                    nodes.get(index + 1),
                    Some(Node::Text(next)) if next.marks() == marks
                );
                if !next_matches {
                    nodes.insert(index + 1, Node::Text(TextRun::with_marks(text, marks)));
                    return true;
                }
            }
            index += 1;
        }
        false
    }

    if !place(&mut element.children, offset, text, marks, &mut 0) {
        element
            .children
            .push(Node::Text(TextRun::with_marks(text, marks)));
    }
    prune(element, marks);
}
