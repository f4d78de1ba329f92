//! Core type definitions.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use sim_ir::{Name, StringInterner};

/// Semantic type.
///
/// Equality is structural and recursive. Unions are kept normalized
/// (flattened, sorted, deduplicated) by [`Type::union`], so the derived
/// equality compares them as sets.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub enum Type {
    // ===== Primitives =====
    /// `void`, the type of statements and value-less returns
    Empty,
    /// Bottom type of expressions that never produce a value
    NoReturn,
    /// Signed integer of the given bit width; 0 is pointer-sized (`isize`)
    SignedInt(u16),
    /// Unsigned integer of the given bit width; 0 is pointer-sized (`usize`)
    UnsignedInt(u16),
    /// IEEE float of the given bit width
    Float(u16),
    Bool,
    Str,

    // ===== Compound types =====
    /// `[size]elem`
    Array { size: u64, elem: Box<Type> },
    /// `(a, b, ...)`
    Tuple(Vec<Type>),
    /// `func(params) ret`
    Function(FuncType),
    /// `&pointee` or `&mut pointee`
    Reference { mutable: bool, pointee: Box<Type> },
    /// Struct with ordered fields
    Struct(Arc<StructType>),
    /// `a | b`, normalized
    Union(Vec<Type>),

    // ===== Placeholders =====
    /// Type parameter of a generic function
    Generic(GenericParam),
    /// `Self` inside a trait method signature
    SelfType,
}

/// Function signature.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct FuncType {
    pub params: Vec<Type>,
    pub ret: Box<Type>,
}

impl FuncType {
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        FuncType {
            params,
            ret: Box::new(ret),
        }
    }
}

/// Type parameter `index` of a generic function, named for display.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct GenericParam {
    pub name: Name,
    pub index: u32,
}

/// Struct field in declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct Field {
    pub public: bool,
    pub mutable: bool,
    pub name: Name,
    pub ty: Type,
}

/// Struct type.
///
/// `package` and `name` identify the declaration (for method lookup and
/// visibility) but take no part in equality, hashing or ordering: two struct
/// types are equal iff their field lists are.
#[derive(Clone, Debug)]
pub struct StructType {
    pub package: Name,
    pub name: Name,
    pub fields: Vec<Field>,
}

impl StructType {
    /// Find a field by name, with its position.
    pub fn field(&self, name: Name) -> Option<(usize, &Field)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }
}

impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for StructType {}

impl Hash for StructType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields.hash(state);
    }
}

impl PartialOrd for StructType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StructType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fields.cmp(&other.fields)
    }
}

impl Type {
    // ===== Builtin constants =====

    pub const ISIZE: Type = Type::SignedInt(0);
    pub const I8: Type = Type::SignedInt(8);
    pub const I16: Type = Type::SignedInt(16);
    pub const I32: Type = Type::SignedInt(32);
    pub const I64: Type = Type::SignedInt(64);
    pub const I128: Type = Type::SignedInt(128);
    pub const USIZE: Type = Type::UnsignedInt(0);
    pub const U8: Type = Type::UnsignedInt(8);
    pub const U16: Type = Type::UnsignedInt(16);
    pub const U32: Type = Type::UnsignedInt(32);
    pub const U64: Type = Type::UnsignedInt(64);
    pub const U128: Type = Type::UnsignedInt(128);
    pub const F32: Type = Type::Float(32);
    pub const F64: Type = Type::Float(64);

    /// Resolve a builtin type name (`i32`, `usize`, `str`, ...).
    pub fn builtin(name: &str) -> Option<Type> {
        let ty = match name {
            "isize" => Type::ISIZE,
            "i8" => Type::I8,
            "i16" => Type::I16,
            "i32" => Type::I32,
            "i64" => Type::I64,
            "i128" => Type::I128,
            "usize" => Type::USIZE,
            "u8" => Type::U8,
            "u16" => Type::U16,
            "u32" => Type::U32,
            "u64" => Type::U64,
            "u128" => Type::U128,
            "f32" => Type::F32,
            "f64" => Type::F64,
            "bool" => Type::Bool,
            "str" => Type::Str,
            "void" => Type::Empty,
            _ => return None,
        };
        Some(ty)
    }

    // ===== Constructors =====

    pub fn array(size: u64, elem: Type) -> Type {
        Type::Array {
            size,
            elem: Box::new(elem),
        }
    }

    pub fn function(params: Vec<Type>, ret: Type) -> Type {
        Type::Function(FuncType::new(params, ret))
    }

    pub fn reference(mutable: bool, pointee: Type) -> Type {
        Type::Reference {
            mutable,
            pointee: Box::new(pointee),
        }
    }

    /// Build a normalized union: nested unions are flattened, duplicates
    /// removed, variants sorted. A union of one variant is that variant.
    pub fn union(variants: impl IntoIterator<Item = Type>) -> Type {
        let mut flat = Vec::new();
        for variant in variants {
            match variant {
                Type::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        flat.sort();
        flat.dedup();
        if flat.len() == 1 {
            flat.pop().unwrap_or(Type::Empty)
        } else {
            Type::Union(flat)
        }
    }

    // ===== Classification =====

    /// Signed or unsigned integer, or float.
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Signed or unsigned integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::SignedInt(_) | Type::UnsignedInt(_))
    }

    pub fn is_signed_int(&self) -> bool {
        matches!(self, Type::SignedInt(_))
    }

    pub fn is_unsigned_int(&self) -> bool {
        matches!(self, Type::UnsignedInt(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Type::Empty)
    }

    pub fn is_no_return(&self) -> bool {
        matches!(self, Type::NoReturn)
    }

    /// Types `==` and `!=` apply to.
    pub fn is_equatable(&self) -> bool {
        self.is_number()
            || matches!(
                self,
                Type::Bool | Type::Function(_) | Type::Array { .. } | Type::Tuple(_) | Type::Struct(_)
            )
    }

    /// Integer width in bits, resolving pointer-sized integers against
    /// `pointer_width`.
    pub fn int_bits(&self, pointer_width: u16) -> Option<u16> {
        match self {
            Type::SignedInt(0) | Type::UnsignedInt(0) => Some(pointer_width),
            Type::SignedInt(bits) | Type::UnsignedInt(bits) => Some(*bits),
            _ => None,
        }
    }

    // ===== Projections =====

    pub fn as_function(&self) -> Option<&FuncType> {
        match self {
            Type::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Arc<StructType>> {
        match self {
            Type::Struct(st) => Some(st),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Type]> {
        match self {
            Type::Tuple(elems) => Some(elems),
            _ => None,
        }
    }

    /// Element type of an array.
    pub fn array_elem(&self) -> Option<&Type> {
        match self {
            Type::Array { elem, .. } => Some(elem),
            _ => None,
        }
    }

    // ===== Rendering =====

    /// Canonical rendering, used in diagnostics.
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_to(&mut out, interner);
        out
    }

    fn write_to(&self, out: &mut String, interner: &StringInterner) {
        match self {
            Type::Empty => out.push_str("void"),
            Type::NoReturn => out.push('X'),
            Type::SignedInt(0) => out.push_str("isize"),
            Type::UnsignedInt(0) => out.push_str("usize"),
            Type::SignedInt(bits) => {
                out.push('i');
                out.push_str(&bits.to_string());
            }
            Type::UnsignedInt(bits) => {
                out.push('u');
                out.push_str(&bits.to_string());
            }
            Type::Float(bits) => {
                out.push('f');
                out.push_str(&bits.to_string());
            }
            Type::Bool => out.push_str("bool"),
            Type::Str => out.push_str("str"),
            Type::Array { size, elem } => {
                out.push('[');
                out.push_str(&size.to_string());
                out.push(']');
                elem.write_to(out, interner);
            }
            Type::Tuple(elems) => {
                out.push('(');
                write_list(out, elems, ", ", interner);
                out.push(')');
            }
            Type::Function(func) => {
                out.push_str("func(");
                write_list(out, &func.params, ", ", interner);
                out.push(')');
                if !func.ret.is_empty() {
                    func.ret.write_to(out, interner);
                }
            }
            Type::Reference { mutable, pointee } => {
                out.push_str(if *mutable { "&mut " } else { "&" });
                pointee.write_to(out, interner);
            }
            Type::Struct(st) => {
                out.push_str("struct{");
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        out.push(';');
                    }
                    out.push_str(interner.lookup(field.name));
                    out.push(':');
                    field.ty.write_to(out, interner);
                }
                out.push('}');
            }
            Type::Union(variants) => write_list(out, variants, " | ", interner),
            Type::Generic(param) => out.push_str(interner.lookup(param.name)),
            Type::SelfType => out.push_str("Self"),
        }
    }
}

fn write_list(out: &mut String, types: &[Type], sep: &str, interner: &StringInterner) {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        ty.write_to(out, interner);
    }
}
