//! Typed render model.
//!
//! Components render to a `Frame` instead of raw strings so identifier marks
//! can ride alongside the lines as queryable metadata. The harness reads marks;
//! the terminal front-end reads lines. Neither leaks into the other.

use std::ops::Range;

use crate::core::id::ElementId;

/// A contiguous run of rendered text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Span {
    text: String,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A single rendered line, a sequence of spans.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn into_string(self) -> String {
        let mut out = String::new();
        for span in self.spans {
            out.push_str(span.as_str());
        }
        out
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self::new(vec![Span::new(text)])
    }
}

/// A component-declared top-level node region of a frame.
///
/// Components that render a single block never declare roots; the whole frame
/// is one implicit root. A widget that decomposes into several logical nodes
/// (a popover's trigger and content, say) declares one root per node so each
/// stays individually addressable after tagging.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Root {
    range: Range<usize>,
    role: Option<String>,
}

impl Root {
    pub fn new(range: Range<usize>) -> Self {
        Self { range, role: None }
    }

    pub fn with_role(range: Range<usize>, role: impl Into<String>) -> Self {
        Self {
            range,
            role: Some(role.into()),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

/// An identifier attachment on a frame region. The sole attribute the external
/// harness reads.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mark {
    id: ElementId,
    range: Range<usize>,
    root: bool,
}

impl Mark {
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// A rendered frame: lines plus identifier metadata.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    lines: Vec<Line>,
    roots: Vec<Root>,
    marks: Vec<Mark>,
}

impl Frame {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            roots: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_strings(self) -> Vec<String> {
        self.lines.into_iter().map(Line::into_string).collect()
    }

    /// Declare the top-level node regions of this frame.
    ///
    /// Ranges must be in bounds, ascending, and non-overlapping; violations are
    /// programmer errors and panic.
    pub fn set_roots(&mut self, roots: Vec<Root>) {
        let mut previous_end = 0;
        for root in &roots {
            let range = root.range();
            assert!(range.start <= range.end, "root range must be ascending");
            assert!(
                range.end <= self.lines.len(),
                "root range {range:?} exceeds frame of {} lines",
                self.lines.len()
            );
            assert!(
                range.start >= previous_end,
                "root ranges must be ordered and non-overlapping"
            );
            previous_end = range.end;
        }
        self.roots = roots;
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Attach `id` to this frame's top-level node(s).
    ///
    /// A frame with zero or one declared roots receives `id` verbatim on the
    /// whole region. A multi-root frame receives one deterministically derived
    /// identifier per root: the root's role suffix when declared, the 1-based
    /// position otherwise (root 0 keeps the base identifier).
    ///
    /// Tagging replaces an existing root mark covering the same region, so
    /// re-tagging an already-tagged frame never accumulates duplicate marks:
    /// the outermost wrapper wins, and tagging twice with the same identifier
    /// is observably identical to tagging once. Marks inherited from child
    /// frames are never touched.
    pub fn tag(&mut self, id: &ElementId) {
        let targets: Vec<(ElementId, Range<usize>)> = if self.roots.len() <= 1 {
            let range = self
                .roots
                .first()
                .map(Root::range)
                .unwrap_or(0..self.lines.len());
            vec![(id.clone(), range)]
        } else {
            self.roots
                .iter()
                .enumerate()
                .map(|(index, root)| {
                    let derived = match (index, root.role()) {
                        (_, Some(role)) => id.derived(role),
                        (0, None) => id.clone(),
                        (index, None) => id.derived(&(index + 1).to_string()),
                    };
                    (derived, root.range())
                })
                .collect()
        };

        for (id, range) in targets {
            self.place_root_mark(id, range);
        }
    }

    fn place_root_mark(&mut self, id: ElementId, range: Range<usize>) {
        if let Some(existing) = self
            .marks
            .iter_mut()
            .find(|mark| mark.root && mark.range == range)
        {
            existing.id = id;
        } else {
            self.marks.push(Mark {
                id,
                range,
                root: true,
            });
        }
    }

    /// Append a child frame below this one, preserving the child's marks at
    /// their shifted positions. Child roots are not inherited; roots describe
    /// only the frame that declared them.
    pub fn append(&mut self, child: Frame) {
        let offset = self.lines.len();
        let Frame { lines, marks, .. } = child;
        self.lines.extend(lines);
        for mark in marks {
            self.marks.push(Mark {
                id: mark.id,
                range: mark.range.start + offset..mark.range.end + offset,
                root: false,
            });
        }
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// First mark carrying `id`, in document order.
    pub fn find(&self, id: &ElementId) -> Option<&Mark> {
        self.marks.iter().find(|mark| &mark.id == id)
    }
}

impl From<Vec<String>> for Frame {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines.into_iter().map(Line::from).collect())
    }
}
