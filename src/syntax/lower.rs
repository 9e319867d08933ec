//! Lowering from the CST to the value tree.

use rowan::TextRange;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::literal;
use super::path::{ElementPath, Segment};
use super::value::{Table, Value};
use super::{Element, ParseError};
use crate::parser::{self, AstNode, AstToken, Key, KeyValue, Root, RootItem, ValueKind};

/// Result of lowering a document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredDocument {
    pub root: Table,
    /// Elements in document order, one per path.
    pub elements: Vec<Element>,
}

/// Parse and lower a document, failing on the first syntax or semantic error.
pub fn lower(text: &str) -> Result<LoweredDocument, ParseError> {
    let parse = parser::parse(text);
    if let Some(error) = parse.errors.first() {
        return Err(error.clone().into());
    }
    let root = Root::cast(parse.syntax())
        .ok_or_else(|| ParseError::new("expected a document", TextRange::default()))?;

    let mut lowerer = Lowerer::default();
    for item in root.items() {
        match item {
            RootItem::KeyValue(kv) => lowerer.key_value(&ElementPath::root(), &kv)?,
            RootItem::Table(table) => {
                let current = lowerer.table_header(&table)?;
                for kv in table.key_values() {
                    lowerer.key_value(&current, &kv)?;
                }
            }
        }
    }

    let root = match lowerer.root {
        Value::Table(table) => table,
        _ => Table::new(),
    };
    Ok(LoweredDocument {
        root,
        elements: lowerer.elements,
    })
}

/// How a path came to exist, which decides what may extend it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Created as a prefix of a `[header]`.
    Implicit,
    /// Defined by its own `[header]` or as an array-of-tables entry.
    Header,
    /// Created by a dotted key.
    Dotted,
    /// An inline table; sealed.
    Inline,
    /// Created by `[[header]]`.
    TableArray,
    /// Any other value, including inline arrays.
    Value,
}

struct Lowerer {
    root: Value,
    origins: FxHashMap<ElementPath, Origin>,
    elements: Vec<Element>,
    element_index: FxHashMap<ElementPath, usize>,
}

impl Default for Lowerer {
    fn default() -> Self {
        Self {
            root: Value::Table(Table::new()),
            origins: FxHashMap::default(),
            elements: Vec::new(),
            element_index: FxHashMap::default(),
        }
    }
}

impl Lowerer {
    /// Handle a `[a.b]` or `[[a.b]]` header; returns the path its pairs go into.
    fn table_header(&mut self, table: &parser::Table) -> Result<ElementPath, ParseError> {
        let section = table.section_range();
        let key = table
            .header_key()
            .ok_or_else(|| ParseError::new("expected a table name", section))?;
        let segments = key_segments(&key)?;
        let Some(((last, last_range), prefix)) = segments.split_last() else {
            return Err(ParseError::new("expected a table name", section));
        };

        let mut current = ElementPath::root();
        for (name, range) in prefix {
            let path = current.key(name.clone());
            current = match self.origins.get(&path).copied() {
                None => {
                    self.define(&path, Origin::Implicit, *range, section)?;
                    self.place(&path, Value::Table(Table::new()), *range)?;
                    path
                }
                Some(Origin::Implicit | Origin::Header | Origin::Dotted) => path,
                Some(Origin::TableArray) => {
                    let len = self.array_len(&path);
                    path.index(len.saturating_sub(1))
                }
                Some(Origin::Inline) => {
                    return Err(ParseError::new(
                        format!("inline table `{path}` cannot be extended"),
                        *range,
                    ));
                }
                Some(Origin::Value) => {
                    return Err(ParseError::new(format!("`{path}` is not a table"), *range));
                }
            };
        }

        let path = current.key(last.clone());
        if table.is_array() {
            match self.origins.get(&path).copied() {
                None => {
                    self.define(&path, Origin::TableArray, *last_range, section)?;
                    self.place(&path, Value::Array(Vec::new()), *last_range)?;
                }
                Some(Origin::TableArray) => {}
                Some(_) => {
                    return Err(ParseError::new(
                        format!("cannot append to `{path}`, it is not an array of tables"),
                        *last_range,
                    ));
                }
            }
            let item = path.index(self.array_len(&path));
            self.define(&item, Origin::Header, *last_range, section)?;
            self.place(&item, Value::Table(Table::new()), *last_range)?;
            Ok(item)
        } else {
            match self.origins.get(&path).copied() {
                None => {
                    self.define(&path, Origin::Header, *last_range, section)?;
                    self.place(&path, Value::Table(Table::new()), *last_range)?;
                }
                Some(Origin::Implicit) => {
                    self.origins.insert(path.clone(), Origin::Header);
                    if let Some(&i) = self.element_index.get(&path) {
                        self.elements[i].key_range = *last_range;
                        self.elements[i].value_range = section;
                    }
                }
                Some(_) => {
                    return Err(ParseError::new(
                        format!("table `{path}` is defined more than once"),
                        *last_range,
                    ));
                }
            }
            Ok(path)
        }
    }

    /// Handle `a.b.c = value` inside the table at `table`.
    fn key_value(&mut self, table: &ElementPath, kv: &KeyValue) -> Result<(), ParseError> {
        let kv_range = kv.syntax().text_range();
        let key = kv
            .key()
            .ok_or_else(|| ParseError::new("expected a key", kv_range))?;
        let value = kv
            .value()
            .ok_or_else(|| ParseError::new("expected a value", kv_range))?;
        let segments = key_segments(&key)?;
        let value_range = value.text_range();

        let mut current = table.clone();
        for (i, (name, range)) in segments.iter().enumerate().take(segments.len().saturating_sub(1)) {
            let path = current.key(name.clone());
            match self.origins.get(&path).copied() {
                None => {
                    let rest = TextRange::new(segments[i + 1].1.start(), value_range.end());
                    self.define(&path, Origin::Dotted, *range, rest)?;
                    self.place(&path, Value::Table(Table::new()), *range)?;
                }
                Some(Origin::Dotted) => {}
                Some(_) => {
                    return Err(ParseError::new(
                        format!("cannot extend `{path}` with a dotted key"),
                        *range,
                    ));
                }
            }
            current = path;
        }

        let Some((last, last_range)) = segments.last() else {
            return Err(ParseError::new("expected a key", kv_range));
        };
        let path = current.key(last.clone());
        if self.origins.contains_key(&path) {
            return Err(ParseError::new(
                format!("duplicate key `{path}`"),
                *last_range,
            ));
        }
        self.push_element(&path, *last_range, value_range);
        self.value(&path, &value)
    }

    /// Lower a value node and place it at `path`, recursing into containers.
    fn value(&mut self, path: &ElementPath, node: &parser::Value) -> Result<(), ParseError> {
        let range = node.text_range();
        match node.kind() {
            Some(ValueKind::Scalar(token)) => {
                let value = literal::scalar(token.kind(), token.text())
                    .map_err(|message| ParseError::new(message, token.text_range()))?;
                self.origins.insert(path.clone(), Origin::Value);
                self.place(path, value, range)
            }
            Some(ValueKind::Array(array)) => {
                self.origins.insert(path.clone(), Origin::Value);
                self.place(path, Value::Array(Vec::new()), range)?;
                for (i, item) in array.values().enumerate() {
                    let item_path = path.index(i);
                    let item_range = item.text_range();
                    self.push_element(&item_path, item_range, item_range);
                    self.value(&item_path, &item)?;
                }
                Ok(())
            }
            Some(ValueKind::InlineTable(inline)) => {
                // Dotted keys inside the braces may still build up sub-tables
                self.origins.insert(path.clone(), Origin::Dotted);
                self.place(path, Value::Table(Table::new()), range)?;
                for kv in inline.key_values() {
                    self.key_value(path, &kv)?;
                }
                self.origins.insert(path.clone(), Origin::Inline);
                self.seal(path);
                Ok(())
            }
            None => Err(ParseError::new("expected a value", range)),
        }
    }

    /// Mark every dotted table below an inline table as sealed.
    fn seal(&mut self, path: &ElementPath) {
        for (other, origin) in self.origins.iter_mut() {
            if *origin == Origin::Dotted && other.starts_with(path) {
                *origin = Origin::Inline;
            }
        }
    }

    fn define(
        &mut self,
        path: &ElementPath,
        origin: Origin,
        key_range: TextRange,
        value_range: TextRange,
    ) -> Result<(), ParseError> {
        if self.origins.insert(path.clone(), origin).is_some() {
            return Err(ParseError::new(
                format!("`{path}` is defined more than once"),
                key_range,
            ));
        }
        self.push_element(path, key_range, value_range);
        Ok(())
    }

    fn push_element(&mut self, path: &ElementPath, key_range: TextRange, value_range: TextRange) {
        self.element_index.insert(path.clone(), self.elements.len());
        self.elements.push(Element {
            path: path.clone(),
            key_range,
            value_range,
        });
    }

    fn array_len(&mut self, path: &ElementPath) -> usize {
        match value_mut(&mut self.root, path) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    /// Insert `value` under its parent, which must already exist.
    fn place(&mut self, path: &ElementPath, value: Value, range: TextRange) -> Result<(), ParseError> {
        let misplaced = || ParseError::new(format!("cannot place a value at `{path}`"), range);
        let (last, parent) = path.segments().split_last().ok_or_else(misplaced)?;
        let parent = ElementPath::new(parent.to_vec());
        match (last, value_mut(&mut self.root, &parent)) {
            (Segment::Key(key), Some(Value::Table(table))) => {
                table.insert(key.clone(), value);
                Ok(())
            }
            (Segment::Index(_), Some(Value::Array(items))) => {
                items.push(value);
                Ok(())
            }
            _ => Err(misplaced()),
        }
    }
}

fn value_mut<'v>(mut current: &'v mut Value, path: &ElementPath) -> Option<&'v mut Value> {
    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Key(key), Value::Table(table)) => table.get_mut(key.as_str())?,
            (Segment::Index(i), Value::Array(items)) => items.get_mut(*i)?,
            _ => return None,
        };
    }
    Some(current)
}

fn key_segments(key: &Key) -> Result<Vec<(SmolStr, TextRange)>, ParseError> {
    key.segments()
        .iter()
        .map(|segment| {
            literal::key(segment.kind(), segment.text())
                .map(|name| (name, segment.text_range()))
                .map_err(|message| ParseError::new(message, segment.text_range()))
        })
        .collect()
}
