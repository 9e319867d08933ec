//! Element paths: the address of a value inside a document.

use std::fmt;

use smol_str::SmolStr;

use crate::parser::is_bare_key;

/// One step of an [`ElementPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A table key.
    Key(SmolStr),
    /// An array index.
    Index(usize),
}

impl Segment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(_) => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(SmolStr::new(key))
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// A sequence of keys and indices from the document root.
///
/// The empty path denotes the root table. Paths display as `a.b[0]`, with
/// keys that are not bare quoted: `a."x.y"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementPath(Vec<Segment>);

impl ElementPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Build a path of keys only.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self(keys.into_iter().map(Segment::from).collect())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// The last segment when it is a key.
    pub fn last_key(&self) -> Option<&str> {
        self.last().and_then(Segment::as_key)
    }

    pub fn parent(&self) -> Option<ElementPath> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    pub fn child(&self, segment: impl Into<Segment>) -> ElementPath {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn key(&self, key: impl Into<SmolStr>) -> ElementPath {
        self.child(Segment::Key(key.into()))
    }

    pub fn index(&self, index: usize) -> ElementPath {
        self.child(Segment::Index(index))
    }

    pub fn starts_with(&self, prefix: &ElementPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Parse the display form back into a path.
    ///
    /// Accepts bare and quoted keys separated by `.`, each followed by any
    /// number of `[n]` indices. Whitespace is only allowed inside quotes.
    /// Returns `None` for the empty string or malformed input.
    pub fn parse(text: &str) -> Option<ElementPath> {
        let mut segments = Vec::new();
        let mut chars = text.char_indices().peekable();
        loop {
            let key = match chars.peek().map(|(_, c)| *c) {
                Some(quote @ ('"' | '\'')) => {
                    chars.next();
                    let mut key = String::new();
                    loop {
                        match chars.next()?.1 {
                            c if c == quote => break,
                            '\\' if quote == '"' => key.push(chars.next()?.1),
                            c => key.push(c),
                        }
                    }
                    key
                }
                Some(_) => {
                    let mut key = String::new();
                    while let Some((_, c)) = chars.peek() {
                        if c.is_ascii_alphanumeric() || *c == '_' || *c == '-' {
                            key.push(*c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if key.is_empty() {
                        return None;
                    }
                    key
                }
                None => return None,
            };
            segments.push(Segment::Key(key.into()));

            while chars.peek().map(|(_, c)| *c) == Some('[') {
                chars.next();
                let mut digits = String::new();
                loop {
                    match chars.next()?.1 {
                        ']' => break,
                        c if c.is_ascii_digit() => digits.push(c),
                        _ => return None,
                    }
                }
                segments.push(Segment::Index(digits.parse().ok()?));
            }

            match chars.next() {
                None => return Some(Self(segments)),
                Some((_, '.')) => continue,
                Some(_) => return None,
            }
        }
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    if is_bare_key(key) {
                        f.write_str(key)?;
                    } else {
                        write!(f, "\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))?;
                    }
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for ElementPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}
