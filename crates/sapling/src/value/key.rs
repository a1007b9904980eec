//! Map keys: the hashable subset of Value

use std::rc::Rc;

use super::Value;
use crate::error::{type_name, EvalError};

/// A map key.
///
/// Only strings and keywords can key a map; everything else is rejected
/// when converting from a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// String key: `"name"`
    String(Rc<str>),

    /// Keyword key: `:name`
    Keyword(Rc<str>),
}

impl MapKey {
    /// Check if a value can be used as a map key
    pub fn is_key(value: &Value) -> bool {
        matches!(value, Value::String(_) | Value::Keyword(_))
    }

    /// Convert back into the value it was made from
    pub fn to_value(&self) -> Value {
        match self {
            MapKey::String(s) => Value::String(s.clone()),
            MapKey::Keyword(k) => Value::Keyword(k.clone()),
        }
    }
}

impl TryFrom<&Value> for MapKey {
    type Error = EvalError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(MapKey::String(s.clone())),
            Value::Keyword(k) => Ok(MapKey::Keyword(k.clone())),
            other => Err(EvalError::type_error(format!(
                "map key must be a string or keyword, got {}",
                type_name(other)
            ))),
        }
    }
}

impl From<MapKey> for Value {
    fn from(key: MapKey) -> Self {
        match key {
            MapKey::String(s) => Value::String(s),
            MapKey::Keyword(k) => Value::Keyword(k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_keyword_are_distinct_keys() {
        let s = MapKey::try_from(&Value::string("a")).unwrap();
        let k = MapKey::try_from(&Value::keyword("a")).unwrap();
        assert_ne!(s, k);
        assert_eq!(k.to_value(), Value::keyword("a"));
    }

    #[test]
    fn test_non_key_rejected() {
        assert!(!MapKey::is_key(&Value::Int(1)));
        assert!(MapKey::try_from(&Value::Int(1)).is_err());
    }
}
