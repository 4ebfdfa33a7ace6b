use thiserror::Error as ThisError;

///
/// Value
/// A coerced input value, ready to be applied to a component field.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Nat(u64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Nat(_) => "nat",
            Self::Text(_) => "text",
        }
    }
}

///
/// ValueError
///

#[derive(Debug, ThisError)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl ValueError {
    const fn mismatch(expected: &'static str, value: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: value.label(),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueError::mismatch("bool", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(ValueError::mismatch("float", &other)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(ValueError::mismatch("int", &other)),
        }
    }
}

impl TryFrom<Value> for u64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Nat(n) => Ok(n),
            other => Err(ValueError::mismatch("nat", &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::mismatch("text", &other)),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = ValueError>,
{
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(ValueError::mismatch("list", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_conversions_require_the_matching_variant() {
        assert_eq!(u64::try_from(Value::Nat(7)).expect("nat should convert"), 7);
        assert_eq!(i64::try_from(Value::Int(-7)).expect("int should convert"), -7);
        assert_eq!(
            String::try_from(Value::Text("hi".into())).expect("text should convert"),
            "hi"
        );

        let err = u64::try_from(Value::Int(7)).expect_err("int into nat must fail");
        assert_eq!(err.to_string(), "expected nat, found int");
    }

    #[test]
    fn list_conversion_maps_each_element() {
        let list = Value::List(vec![Value::Text("a".into()), Value::Text("b".into())]);
        let strings: Vec<String> = list.try_into().expect("text list should convert");
        assert_eq!(strings, ["a", "b"]);

        let mixed = Value::List(vec![Value::Text("a".into()), Value::Nat(1)]);
        Vec::<String>::try_from(mixed).expect_err("mixed list must fail");
    }
}
