//! Zero values.
//!
//! The zero value fills struct-literal fields that are left out and
//! initializes package-level variables declared without a value.

use crate::core::Type;

/// Default value of a type, in the shape of that type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ZeroValue {
    /// `0` of any integer type
    Int,
    /// `0.0` of any float type
    Float,
    /// `false`
    Bool,
    /// `""`
    Str,
    /// Null function pointer or reference
    Null,
    /// Array of `count` zero elements
    Repeat { count: u64, elem: Box<ZeroValue> },
    /// Tuple or struct whose elements are all zero
    Aggregate(Vec<ZeroValue>),
    /// Zero of the first variant of a union
    Variant(Box<ZeroValue>),
}

impl Type {
    /// The zero value of this type.
    ///
    /// `None` for types without runtime values (`void`, `X`) and for
    /// placeholders, whose zero is only known after substitution.
    pub fn zero_value(&self) -> Option<ZeroValue> {
        match self {
            Type::SignedInt(_) | Type::UnsignedInt(_) => Some(ZeroValue::Int),
            Type::Float(_) => Some(ZeroValue::Float),
            Type::Bool => Some(ZeroValue::Bool),
            Type::Str => Some(ZeroValue::Str),
            Type::Function(_) | Type::Reference { .. } => Some(ZeroValue::Null),
            Type::Array { size, elem } => Some(ZeroValue::Repeat {
                count: *size,
                elem: Box::new(elem.zero_value()?),
            }),
            Type::Tuple(elems) => elems
                .iter()
                .map(Type::zero_value)
                .collect::<Option<Vec<_>>>()
                .map(ZeroValue::Aggregate),
            Type::Struct(st) => st
                .fields
                .iter()
                .map(|f| f.ty.zero_value())
                .collect::<Option<Vec<_>>>()
                .map(ZeroValue::Aggregate),
            Type::Union(variants) => variants
                .first()
                .and_then(Type::zero_value)
                .map(|v| ZeroValue::Variant(Box::new(v))),
            Type::Empty | Type::NoReturn | Type::Generic(_) | Type::SelfType => None,
        }
    }
}

#[cfg(test)]
mod tests;
