use super::*;
use crate::core::{Field, StructType};
use pretty_assertions::assert_eq;
use sim_ir::Name;
use std::sync::Arc;

#[test]
fn scalars() {
    assert_eq!(Type::I32.zero_value(), Some(ZeroValue::Int));
    assert_eq!(Type::USIZE.zero_value(), Some(ZeroValue::Int));
    assert_eq!(Type::F64.zero_value(), Some(ZeroValue::Float));
    assert_eq!(Type::Bool.zero_value(), Some(ZeroValue::Bool));
    assert_eq!(Type::Str.zero_value(), Some(ZeroValue::Str));
    assert_eq!(Type::reference(false, Type::I8).zero_value(), Some(ZeroValue::Null));
}

#[test]
fn aggregates_are_zero_all_the_way_down() {
    let st = Type::Struct(Arc::new(StructType {
        package: Name::EMPTY,
        name: Name::EMPTY,
        fields: vec![Field {
            public: false,
            mutable: false,
            name: Name::EMPTY,
            ty: Type::Tuple(vec![Type::Bool, Type::array(3, Type::U8)]),
        }],
    }));

    assert_eq!(
        st.zero_value(),
        Some(ZeroValue::Aggregate(vec![ZeroValue::Aggregate(vec![
            ZeroValue::Bool,
            ZeroValue::Repeat {
                count: 3,
                elem: Box::new(ZeroValue::Int),
            },
        ])]))
    );
}

#[test]
fn valueless_types_have_no_zero() {
    assert_eq!(Type::Empty.zero_value(), None);
    assert_eq!(Type::NoReturn.zero_value(), None);
    assert_eq!(Type::SelfType.zero_value(), None);
    assert_eq!(Type::Tuple(vec![Type::I8, Type::NoReturn]).zero_value(), None);
}
