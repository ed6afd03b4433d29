//! Scalar parameter values carried by clause fragments.
//!
//! Clause builders never interpolate values into SQL text; they return them next to
//! the clause as a [`Value`] list that is bound positionally at execution time.
//! Keeping the set of value kinds closed makes fragments comparable in tests and
//! lets the binding step narrow integers to the column's actual wire type.

use bytes::BytesMut;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A bindable scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL (binds against any column type)
    Null,
    Bool(bool),
    /// Integer, narrowed to `int2`/`int4` with a range check when bound
    Int(i64),
    /// Exact numeric (`numeric` columns such as `equity`)
    Decimal(Decimal),
    Text(String),
}

impl Value {
    /// Borrow the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness used for flag-style filters.
    ///
    /// Query strings deliver booleans as text, so `"true"` (any case) counts as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Text(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

fn mismatch(value: &Value, ty: &Type) -> Box<dyn Error + Sync + Send> {
    format!("cannot bind {} value to column of type {}", value.kind(), ty).into()
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) if *ty == Type::BOOL => b.to_sql(ty, out),
            Value::Int(i) => {
                if *ty == Type::INT2 {
                    i16::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    i.to_sql(ty, out)
                } else if *ty == Type::NUMERIC {
                    Decimal::from(*i).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*i as f64).to_sql(ty, out)
                } else {
                    Err(mismatch(self, ty))
                }
            }
            Value::Decimal(d) => {
                if *ty == Type::NUMERIC {
                    d.to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    d.to_f64()
                        .ok_or_else(|| mismatch(self, ty))?
                        .to_sql(ty, out)
                } else {
                    Err(mismatch(self, ty))
                }
            }
            Value::Text(s) if <&str as ToSql>::accepts(ty) => s.as_str().to_sql(ty, out),
            _ => Err(mismatch(self, ty)),
        }
    }

    // The concrete variant is only known per value, so type checking happens in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &Value, ty: &Type) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        let mut buf = BytesMut::new();
        value.to_sql_checked(ty, &mut buf)
    }

    #[test]
    fn int_narrows_to_int4() {
        let mut buf = BytesMut::new();
        let res = Value::Int(200_000).to_sql_checked(&Type::INT4, &mut buf);
        assert!(matches!(res, Ok(IsNull::No)));
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn int_out_of_range_for_int4_is_an_error() {
        assert!(encode(&Value::Int(i64::MAX), &Type::INT4).is_err());
    }

    #[test]
    fn null_binds_to_any_type() {
        assert!(matches!(encode(&Value::Null, &Type::NUMERIC), Ok(IsNull::Yes)));
        assert!(matches!(encode(&Value::Null, &Type::TEXT), Ok(IsNull::Yes)));
    }

    #[test]
    fn text_rejects_integer_column() {
        assert!(encode(&Value::from("eng"), &Type::INT4).is_err());
        assert!(encode(&Value::from("eng"), &Type::VARCHAR).is_ok());
    }

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::from("TRUE").is_truthy());
        assert!(!Value::from("false").is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Int(1).is_truthy());
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5_i32)), Value::Int(5));
    }
}
