use std::collections::HashMap;
use std::fmt;

use crate::field::Field;

/// Insertion-ordered collection of decoded fields, keyed by name.
///
/// This is the "struct" a buffer decodes into. Fields keep the position
/// of the first time their name was seen; inserting a field whose name
/// already exists replaces the stored value in place:
///
/// ```text
///   insert a=1   →  [a=1]
///   insert b=2   →  [a=1, b=2]
///   insert a=3   →  [a=3, b=2]     last write wins, order unchanged
/// ```
///
/// Cloning is cheap enough to hand out a snapshot after every decoded
/// field: blob bodies are reference-counted slices of the input buffer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Record {
  fields: Vec<Field>,
  index: HashMap<String, usize>,
}

impl Record {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a field, returning the field it replaced, if any.
  pub fn insert(&mut self, field: Field) -> Option<Field> {
    if let Some(&slot) = self.index.get(field.name()) {
      return Some(std::mem::replace(&mut self.fields[slot], field));
    }
    self.index.insert(field.name().to_string(), self.fields.len());
    self.fields.push(field);
    None
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Field> {
    self.index.get(name).map(|&slot| &self.fields[slot])
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.fields.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// Fields in insertion order.
  pub fn iter(&self) -> std::slice::Iter<'_, Field> {
    self.fields.iter()
  }

  /// Field names in insertion order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.fields.iter().map(Field::name)
  }
}

impl fmt::Debug for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
      .entries(self.fields.iter().map(|field| (field.name(), field)))
      .finish()
  }
}

impl<'a> IntoIterator for &'a Record {
  type Item = &'a Field;
  type IntoIter = std::slice::Iter<'a, Field>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl FromIterator<Field> for Record {
  fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
    let mut record = Self::new();
    for field in iter {
      record.insert(field);
    }
    record
  }
}
