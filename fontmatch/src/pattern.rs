// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered map from objects to prioritized value lists.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::charset::CharSet;
use crate::error::{MatchError, PatternError};
use crate::lang::LangSet;
use crate::object::Object;
use crate::value::{Binding, Boolean, Matrix, Range, Value, ValueEntry};

/// Values of one object, most specific first.
pub type ValueList = SmallVec<[ValueEntry; 1]>;

#[derive(Clone, PartialEq, Debug)]
struct Element {
    object: Object,
    values: ValueList,
}

/// A font description: a map from [`Object`] to a list of values.
///
/// Elements are kept in canonical object order. An element is never left
/// with an empty list by the public API.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Pattern {
    elements: Vec<Element>,
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the pattern holds no objects.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of objects in the pattern.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the objects and their values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Object, &[ValueEntry])> + '_ {
        self.elements
            .iter()
            .map(|elt| (elt.object, elt.values.as_slice()))
    }

    /// Returns true if the pattern declares `object`.
    pub fn contains(&self, object: Object) -> bool {
        self.position(object).is_ok()
    }

    fn position(&self, object: Object) -> Result<usize, usize> {
        self.elements.binary_search_by_key(&object, |elt| elt.object)
    }

    /// Returns the value list of `object`.
    pub fn values(&self, object: Object) -> Option<&[ValueEntry]> {
        self.position(object)
            .ok()
            .map(|pos| self.elements[pos].values.as_slice())
    }

    pub(crate) fn values_mut(&mut self, object: Object) -> Option<&mut ValueList> {
        let pos = self.position(object).ok()?;
        Some(&mut self.elements[pos].values)
    }

    /// Returns the value list of `object`, inserting an empty one if needed.
    ///
    /// Callers must not leave the list empty.
    pub(crate) fn entry(&mut self, object: Object) -> &mut ValueList {
        let pos = match self.position(object) {
            Ok(pos) => pos,
            Err(pos) => {
                self.elements.insert(
                    pos,
                    Element {
                        object,
                        values: ValueList::new(),
                    },
                );
                pos
            }
        };
        &mut self.elements[pos].values
    }

    /// Removes `object` if its value list is empty.
    pub(crate) fn canonicalize(&mut self, object: Object) {
        if let Ok(pos) = self.position(object) {
            if self.elements[pos].values.is_empty() {
                self.elements.remove(pos);
            }
        }
    }

    fn check(object: Object, value: &Value) -> Result<(), PatternError> {
        if object.accepts(value.value_type()) {
            Ok(())
        } else {
            Err(PatternError::InvalidType {
                object,
                found: value.value_type(),
            })
        }
    }

    /// Appends a strongly bound value.
    pub fn add(&mut self, object: Object, value: impl Into<Value>) -> Result<(), PatternError> {
        self.add_with_binding(object, value.into(), Binding::Strong, true)
    }

    /// Adds a value with an explicit binding, at the end of the list or at
    /// the front.
    pub fn add_with_binding(
        &mut self,
        object: Object,
        value: Value,
        binding: Binding,
        append: bool,
    ) -> Result<(), PatternError> {
        Self::check(object, &value)?;
        let list = self.entry(object);
        let entry = ValueEntry::new(value, binding);
        if append {
            list.push(entry);
        } else {
            list.insert(0, entry);
        }
        Ok(())
    }

    /// Adds several entries at once. Nothing is added if any entry has a
    /// type the object does not accept.
    pub fn add_list(
        &mut self,
        object: Object,
        entries: impl IntoIterator<Item = ValueEntry>,
        append: bool,
    ) -> Result<(), PatternError> {
        let entries: ValueList = entries.into_iter().collect();
        for entry in &entries {
            Self::check(object, &entry.value)?;
        }
        if entries.is_empty() {
            return Ok(());
        }
        let list = self.entry(object);
        if append {
            list.extend(entries);
        } else {
            list.insert_many(0, entries);
        }
        Ok(())
    }

    /// Appends a strongly bound value to the object called `name`.
    pub fn add_by_name(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PatternError> {
        let object =
            Object::from_name(name).ok_or_else(|| PatternError::UnknownObject(name.into()))?;
        self.add(object, value)
    }

    /// Removes every value of `object`. Returns the removed list.
    pub fn remove(&mut self, object: Object) -> Option<ValueList> {
        let pos = self.position(object).ok()?;
        Some(self.elements.remove(pos).values)
    }

    /// Removes the value at `index` of `object`. Returns false if there was
    /// no such value.
    pub fn remove_at(&mut self, object: Object, index: usize) -> bool {
        let Some(list) = self.values_mut(object) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        self.canonicalize(object);
        true
    }

    /// Returns the value at `index` of `object`.
    pub fn get(&self, object: Object, index: usize) -> Result<&Value, MatchError> {
        let list = self.values(object).ok_or(MatchError::NoMatch)?;
        list.get(index)
            .map(|entry| &entry.value)
            .ok_or(MatchError::NoId)
    }

    /// Returns an integer value. Doubles are truncated.
    pub fn get_integer(&self, object: Object, index: usize) -> Result<i32, MatchError> {
        match self.get(object, index)? {
            Value::Integer(i) => Ok(*i),
            #[expect(
                clippy::cast_possible_truncation,
                reason = "integer getters truncate doubles"
            )]
            Value::Double(d) => Ok(*d as i32),
            _ => Err(MatchError::TypeMismatch),
        }
    }

    /// Returns a numeric value as a double.
    pub fn get_double(&self, object: Object, index: usize) -> Result<f64, MatchError> {
        self.get(object, index)?
            .as_f64()
            .ok_or(MatchError::TypeMismatch)
    }

    /// Returns a string value.
    pub fn get_string(&self, object: Object, index: usize) -> Result<&str, MatchError> {
        self.get(object, index)?
            .as_str()
            .ok_or(MatchError::TypeMismatch)
    }

    /// Returns a boolean value.
    pub fn get_bool(&self, object: Object, index: usize) -> Result<Boolean, MatchError> {
        match self.get(object, index)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(MatchError::TypeMismatch),
        }
    }

    /// Returns a matrix value.
    pub fn get_matrix(&self, object: Object, index: usize) -> Result<Matrix, MatchError> {
        match self.get(object, index)? {
            Value::Matrix(m) => Ok(*m),
            _ => Err(MatchError::TypeMismatch),
        }
    }

    /// Returns a range value.
    pub fn get_range(&self, object: Object, index: usize) -> Result<Range, MatchError> {
        match self.get(object, index)? {
            Value::Range(r) => Ok(*r),
            _ => Err(MatchError::TypeMismatch),
        }
    }

    /// Returns a character set value.
    pub fn get_charset(&self, object: Object, index: usize) -> Result<&CharSet, MatchError> {
        match self.get(object, index)? {
            Value::CharSet(cs) => Ok(cs),
            _ => Err(MatchError::TypeMismatch),
        }
    }

    /// Returns a language set value.
    pub fn get_langset(&self, object: Object, index: usize) -> Result<&LangSet, MatchError> {
        match self.get(object, index)? {
            Value::LangSet(ls) => Ok(ls),
            _ => Err(MatchError::TypeMismatch),
        }
    }
}
