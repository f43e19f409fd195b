use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::PropError;

pub type Callback = Rc<dyn Fn()>;
pub type BoolCallback = Rc<dyn Fn(bool)>;

/// A callback that does nothing. Stands in for a missing mutator.
pub fn noop() -> Callback {
    Rc::new(|| {})
}

#[derive(Clone)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Callback(Callback),
    BoolCallback(BoolCallback),
}

impl PropValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropValue::Bool(_) => "bool",
            PropValue::Number(_) => "number",
            PropValue::Text(_) => "text",
            PropValue::Callback(_) => "callback",
            PropValue::BoolCallback(_) => "bool callback",
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Number(n) => write!(f, "{n}"),
            PropValue::Text(t) => write!(f, "{t:?}"),
            PropValue::Callback(_) => write!(f, "<callback>"),
            PropValue::BoolCallback(_) => write!(f, "<callback(bool)>"),
        }
    }
}

// Callbacks compare by identity.
impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Callback(a), PropValue::Callback(b)) => Rc::ptr_eq(a, b),
            (PropValue::BoolCallback(a), PropValue::BoolCallback(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Number(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Number(v as f64)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Text(v)
    }
}

impl From<Callback> for PropValue {
    fn from(v: Callback) -> Self {
        PropValue::Callback(v)
    }
}

impl From<BoolCallback> for PropValue {
    fn from(v: BoolCallback) -> Self {
        PropValue::BoolCallback(v)
    }
}

/// Insertion-ordered property bag attached to an element.
///
/// Most elements carry a handful of properties, so entries live inline and
/// lookups are linear.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Props(SmallVec<[(String, PropValue); 4]>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Replaces an existing entry in place, or appends a new one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merges `overrides` into `self`; colliding keys take the override.
    pub fn merge(&mut self, overrides: &Props) {
        for (k, v) in overrides.iter() {
            self.set(k, v.clone());
        }
    }

    pub fn merged(mut self, overrides: &Props) -> Self {
        self.merge(overrides);
        self
    }

    pub fn without(&self, keys: &[&str]) -> Props {
        Props(
            self.0
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .cloned()
                .collect(),
        )
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PropValue::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn callback(&self, key: &str) -> Option<Callback> {
        match self.get(key)? {
            PropValue::Callback(c) => Some(c.clone()),
            _ => None,
        }
    }

    pub fn bool_callback(&self, key: &str) -> Option<BoolCallback> {
        match self.get(key)? {
            PropValue::BoolCallback(c) => Some(c.clone()),
            _ => None,
        }
    }

    pub fn try_bool(&self, key: &str) -> Result<bool, PropError> {
        match self.get(key) {
            Some(PropValue::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(key, "bool", other)),
            None => Err(PropError::Missing(key.to_string())),
        }
    }

    pub fn try_callback(&self, key: &str) -> Result<Callback, PropError> {
        match self.get(key) {
            Some(PropValue::Callback(c)) => Ok(c.clone()),
            Some(other) => Err(mismatch(key, "callback", other)),
            None => Err(PropError::Missing(key.to_string())),
        }
    }
}

fn mismatch(key: &str, expected: &'static str, found: &PropValue) -> PropError {
    PropError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}
