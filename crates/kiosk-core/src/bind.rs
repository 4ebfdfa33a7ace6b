//! Input binding: coerce raw query text into typed values and apply them to
//! a component's declared fields.

use crate::{
    input::{InputBag, RawValue},
    value::{Value, ValueError},
};
use kiosk_schema::{node::BindingModel, types::BindingPrim};
use thiserror::Error as ThisError;

///
/// CoerceError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum CoerceError {
    #[error("non-finite {prim} value '{value}'")]
    NonFinite { prim: BindingPrim, value: String },

    #[error("invalid {prim} value '{value}'")]
    Parse { prim: BindingPrim, value: String },

    #[error("expected a single value, found {found}")]
    Repeated { found: usize },
}

/// Coerce one raw input into the declared domain.
///
/// A `many` binding accepts any number of occurrences and always yields a
/// list; a scalar binding rejects repeated occurrences outright.
pub fn coerce(raw: &RawValue, prim: BindingPrim, many: bool) -> Result<Value, CoerceError> {
    if many {
        let items = match raw {
            RawValue::Many(values) => values.as_slice(),
            RawValue::One(value) => std::slice::from_ref(value),
        };
        let coerced = items
            .iter()
            .map(|item| coerce_one(item, prim))
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(Value::List(coerced));
    }

    match raw {
        RawValue::Many(values) => Err(CoerceError::Repeated {
            found: values.len(),
        }),
        RawValue::One(value) => coerce_one(value, prim),
    }
}

fn coerce_one(text: &str, prim: BindingPrim) -> Result<Value, CoerceError> {
    let parse_err = || CoerceError::Parse {
        prim,
        value: text.to_string(),
    };

    match prim {
        // No truthiness folding: exactly true/false/1/0.
        BindingPrim::Bool => match text {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(parse_err()),
        },
        BindingPrim::Float => {
            let parsed: f64 = text.parse().map_err(|_| parse_err())?;
            if parsed.is_finite() {
                Ok(Value::Float(parsed))
            } else {
                Err(CoerceError::NonFinite {
                    prim,
                    value: text.to_string(),
                })
            }
        }
        BindingPrim::Int => text.parse().map(Value::Int).map_err(|_| parse_err()),
        BindingPrim::Nat => text.parse().map(Value::Nat).map_err(|_| parse_err()),
        BindingPrim::Text => Ok(Value::Text(text.to_string())),
    }
}

///
/// BindError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum BindError {
    #[error("field '{field}': {cause}")]
    Apply {
        field: String,
        #[source]
        cause: ValueError,
    },

    #[error("input '{key}' (field '{field}'): {cause}")]
    Coerce {
        field: &'static str,
        key: &'static str,
        #[source]
        cause: CoerceError,
    },

    #[error("required input '{key}' is missing (field '{field}')")]
    Missing {
        field: &'static str,
        key: &'static str,
    },

    #[error("no binding declared for field '{field}'")]
    UnknownField { field: String },
}

impl BindError {
    #[must_use]
    pub fn apply(field: &str, cause: ValueError) -> Self {
        Self::Apply {
            field: field.to_string(),
            cause,
        }
    }

    #[must_use]
    pub fn unknown_field(field: &str) -> Self {
        Self::UnknownField {
            field: field.to_string(),
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

///
/// BindTarget
/// Per-component binding contract emitted by the attribute macro: the
/// declared binding table plus a field-wise setter.
///

pub trait BindTarget {
    const BINDINGS: &'static [BindingModel];

    fn apply(&mut self, field: &str, value: Value) -> Result<(), BindError>;
}

/// Walk the declared bindings and fill the target from the bag.
///
/// Absent optional keys leave constructed defaults untouched; the first
/// missing required key or coercion failure aborts the bind.
pub fn bind<T: BindTarget>(target: &mut T, inputs: &InputBag) -> Result<(), BindError> {
    for model in T::BINDINGS {
        match inputs.get(model.key) {
            None if model.required => {
                return Err(BindError::Missing {
                    field: model.field,
                    key: model.key,
                });
            }
            None => {}
            Some(raw) => {
                let value = coerce(raw, model.prim, model.many).map_err(|cause| {
                    BindError::Coerce {
                        field: model.field,
                        key: model.key,
                        cause,
                    }
                })?;
                target.apply(model.field, value)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Probe {
        count: u64,
        term: Option<String>,
        tags: Vec<String>,
    }

    impl BindTarget for Probe {
        const BINDINGS: &'static [BindingModel] = &[
            BindingModel {
                field: "count",
                key: "count",
                prim: BindingPrim::Nat,
                many: false,
                required: true,
            },
            BindingModel {
                field: "term",
                key: "term",
                prim: BindingPrim::Text,
                many: false,
                required: false,
            },
            BindingModel {
                field: "tags",
                key: "tag",
                prim: BindingPrim::Text,
                many: true,
                required: false,
            },
        ];

        fn apply(&mut self, field: &str, value: Value) -> Result<(), BindError> {
            match field {
                "count" => {
                    self.count = value.try_into().map_err(|e| BindError::apply("count", e))?;
                }
                "term" => {
                    self.term =
                        Some(value.try_into().map_err(|e| BindError::apply("term", e))?);
                }
                "tags" => {
                    self.tags = value.try_into().map_err(|e| BindError::apply("tags", e))?;
                }
                other => return Err(BindError::unknown_field(other)),
            }

            Ok(())
        }
    }

    #[test]
    fn numeric_text_coerces_into_the_declared_field() {
        let mut probe = Probe::default();
        bind(&mut probe, &InputBag::from_pairs([("count", "42")]))
            .expect("valid input should bind");
        assert_eq!(probe.count, 42);
        assert_eq!(probe.term, None);
    }

    #[test]
    fn non_numeric_text_is_an_invalid_input() {
        let mut probe = Probe::default();
        let err = bind(&mut probe, &InputBag::from_pairs([("count", "abc")]))
            .expect_err("'abc' into nat must fail");
        assert!(
            matches!(err, BindError::Coerce { field: "count", .. }),
            "got: {err}"
        );
        assert!(err.to_string().contains("invalid Nat value 'abc'"), "got: {err}");
    }

    #[test]
    fn missing_required_key_names_field_and_key() {
        let mut probe = Probe::default();
        let err = bind(&mut probe, &InputBag::new()).expect_err("missing count must fail");
        assert!(err.is_missing());
        assert!(
            err.to_string()
                .contains("required input 'count' is missing"),
            "got: {err}"
        );
    }

    #[test]
    fn absent_optional_key_keeps_the_default() {
        let mut probe = Probe {
            term: Some("seeded".into()),
            ..Probe::default()
        };
        bind(&mut probe, &InputBag::from_pairs([("count", "1")]))
            .expect("optional key may be absent");
        assert_eq!(probe.term.as_deref(), Some("seeded"));
    }

    #[test]
    fn repeated_scalar_key_is_rejected() {
        let mut probe = Probe::default();
        let err = bind(
            &mut probe,
            &InputBag::from_pairs([("count", "1"), ("count", "2")]),
        )
        .expect_err("repeated scalar must fail");
        assert!(
            err.to_string().contains("expected a single value, found 2"),
            "got: {err}"
        );
    }

    #[test]
    fn single_occurrence_of_many_key_becomes_one_element_list() {
        let mut probe = Probe::default();
        bind(
            &mut probe,
            &InputBag::from_pairs([("count", "1"), ("tag", "solo")]),
        )
        .expect("single many-occurrence should bind");
        assert_eq!(probe.tags, ["solo"]);
    }

    #[test]
    fn repeated_many_key_preserves_arrival_order() {
        let mut probe = Probe::default();
        bind(
            &mut probe,
            &InputBag::from_pairs([("count", "1"), ("tag", "b"), ("tag", "a")]),
        )
        .expect("many-occurrences should bind");
        assert_eq!(probe.tags, ["b", "a"]);
    }

    #[test]
    fn bool_coercion_accepts_exactly_four_spellings() {
        for (text, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
            let value = coerce(&RawValue::One(text.into()), BindingPrim::Bool, false)
                .expect("spelling should coerce");
            assert_eq!(value, Value::Bool(expected), "for '{text}'");
        }

        for text in ["TRUE", "yes", "on", "2", ""] {
            coerce(&RawValue::One(text.into()), BindingPrim::Bool, false)
                .expect_err("truthiness folding must fail");
        }
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        for text in ["NaN", "inf", "-inf", "infinity"] {
            let err = coerce(&RawValue::One(text.into()), BindingPrim::Float, false)
                .expect_err("non-finite float must fail");
            assert!(matches!(err, CoerceError::NonFinite { .. }), "for '{text}': {err}");
        }

        coerce(&RawValue::One("2.5".into()), BindingPrim::Float, false)
            .expect("finite float should coerce");
    }

    proptest! {
        #[test]
        fn every_i64_round_trips_through_int_coercion(n in any::<i64>()) {
            let value = coerce(&RawValue::One(n.to_string()), BindingPrim::Int, false)
                .expect("decimal text should coerce");
            prop_assert_eq!(value, Value::Int(n));
        }

        #[test]
        fn every_u64_round_trips_through_nat_coercion(n in any::<u64>()) {
            let value = coerce(&RawValue::One(n.to_string()), BindingPrim::Nat, false)
                .expect("decimal text should coerce");
            prop_assert_eq!(value, Value::Nat(n));
        }

        #[test]
        fn alphabetic_text_never_coerces_to_a_number(s in "[a-z]{1,12}") {
            prop_assert!(coerce(&RawValue::One(s.clone()), BindingPrim::Int, false).is_err());
            prop_assert!(coerce(&RawValue::One(s.clone()), BindingPrim::Nat, false).is_err());
        }

        #[test]
        fn text_coercion_is_lossless(s in ".*") {
            let value = coerce(&RawValue::One(s.clone()), BindingPrim::Text, false)
                .expect("text always coerces");
            prop_assert_eq!(value, Value::Text(s));
        }
    }
}
