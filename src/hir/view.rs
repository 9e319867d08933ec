//! Path-indexed view over a lowered document.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::base::{LineIndex, Position, Span, TextRange, TextSize};
use crate::syntax::{self, Element, ElementPath, ParseError, Segment, Table, Value};

/// Error for a path lookup that does not land where the caller expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("no element at `{0}`")]
    KeyNotFound(ElementPath),
    #[error("`{0}` is not a table")]
    NotATable(ElementPath),
}

/// Which part of an element a position falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPart {
    Key,
    Value,
}

/// Result of a reverse lookup from a source offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHit<'a> {
    pub element: &'a Element,
    pub part: ElementPart,
}

impl ElementHit<'_> {
    pub fn path(&self) -> &ElementPath {
        &self.element.path
    }

    pub fn is_key(&self) -> bool {
        self.part == ElementPart::Key
    }

    pub fn is_value(&self) -> bool {
        self.part == ElementPart::Value
    }

    /// The range the hit landed in.
    pub fn range(&self) -> TextRange {
        match self.part {
            ElementPart::Key => self.element.key_range,
            ElementPart::Value => self.element.value_range,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    range: TextRange,
    element: usize,
    part: ElementPart,
}

/// An immutable, path-indexed document.
///
/// Holds the value tree, every element in document order, a path index, a
/// sorted interval index for offset lookups, and the source text.
#[derive(Debug, Clone)]
pub struct DocumentView {
    text: String,
    root: Value,
    elements: Vec<Element>,
    by_path: FxHashMap<ElementPath, usize>,
    intervals: Vec<Interval>,
    line_index: LineIndex,
}

impl DocumentView {
    /// Parse and index `text`.
    pub fn from_source(text: &str) -> Result<Self, ParseError> {
        let lowered = syntax::lower(text)?;

        let by_path = lowered
            .elements
            .iter()
            .enumerate()
            .map(|(i, element)| (element.path.clone(), i))
            .collect();

        let mut intervals = Vec::with_capacity(lowered.elements.len() * 2);
        for (i, element) in lowered.elements.iter().enumerate() {
            intervals.push(Interval {
                range: element.key_range,
                element: i,
                part: ElementPart::Key,
            });
            if element.value_range != element.key_range {
                intervals.push(Interval {
                    range: element.value_range,
                    element: i,
                    part: ElementPart::Value,
                });
            } else if let Some(last) = intervals.last_mut() {
                // Array items cover the same text with key and value
                last.part = ElementPart::Value;
            }
        }
        intervals.sort_by_key(|interval| (interval.range.start(), interval.range.end()));

        Ok(Self {
            line_index: LineIndex::new(text),
            text: text.to_string(),
            root: Value::Table(lowered.root),
            elements: lowered.elements,
            by_path,
            intervals,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// The root value, always a table.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, path: &ElementPath) -> Option<&Element> {
        self.by_path.get(path).map(|&i| &self.elements[i])
    }

    pub fn contains(&self, path: &ElementPath) -> bool {
        path.is_root() || self.by_path.contains_key(path)
    }

    /// The value at `path`; the empty path yields the root table.
    pub fn value_at(&self, path: &ElementPath) -> Result<&Value, ViewError> {
        let mut current = &self.root;
        for segment in path.segments() {
            let next = match (segment, current) {
                (Segment::Key(key), Value::Table(table)) => table.get(key.as_str()),
                (Segment::Index(i), Value::Array(items)) => items.get(*i),
                _ => None,
            };
            current = next.ok_or_else(|| ViewError::KeyNotFound(path.clone()))?;
        }
        Ok(current)
    }

    /// The table at `path`.
    pub fn object_at(&self, path: &ElementPath) -> Result<&Table, ViewError> {
        self.value_at(path)?
            .as_table()
            .ok_or_else(|| ViewError::NotATable(path.clone()))
    }

    /// The most specific element whose key or value range contains `offset`.
    ///
    /// A range's end counts as inside it, so a cursor right after a token
    /// still hits that token. Among equally sized ranges the deeper path wins.
    pub fn element_at(&self, offset: TextSize) -> Option<ElementHit<'_>> {
        let upper = self
            .intervals
            .partition_point(|interval| interval.range.start() <= offset);
        self.intervals[..upper]
            .iter()
            .filter(|interval| offset <= interval.range.end())
            .min_by(|a, b| {
                a.range
                    .len()
                    .cmp(&b.range.len())
                    .then_with(|| {
                        let depth = |i: &Interval| self.elements[i.element].path.len();
                        depth(b).cmp(&depth(a))
                    })
                    .then_with(|| b.range.start().cmp(&a.range.start()))
            })
            .map(|interval| ElementHit {
                element: &self.elements[interval.element],
                part: interval.part,
            })
    }

    /// Reverse lookup by editor position.
    pub fn element_at_position(&self, position: Position) -> Option<ElementHit<'_>> {
        self.element_at(self.line_index.offset_at(position)?)
    }

    pub fn offset_at(&self, position: Position) -> Option<TextSize> {
        self.line_index.offset_at(position)
    }

    pub fn span(&self, range: TextRange) -> Span {
        self.line_index.span(range)
    }
}
