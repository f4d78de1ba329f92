//! Package-level definitions.
//!
//! A [`Package`] is frozen once its declarations are resolved; other
//! packages then see it through `Arc<Package>` and only its public names.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sim_ir::Name;
use sim_types::{FuncType, StructType, Type};

use crate::conformance::TraitDef;
use crate::generic::GenericFuncDef;

#[derive(Clone, Debug)]
pub struct GlobalVar {
    pub public: bool,
    pub mutable: bool,
    pub name: Name,
    pub ty: Type,
    pub extern_name: Option<Name>,
}

#[derive(Clone, Debug)]
pub struct FunctionDef {
    pub public: bool,
    pub name: Name,
    pub sig: FuncType,
    /// Symbol of an externally defined function.
    pub extern_name: Option<Name>,
}

/// A value visible at package level.
#[derive(Clone, Debug)]
pub enum GlobalValue {
    Variable(Arc<GlobalVar>),
    Function(Arc<FunctionDef>),
    GenericFunction(Arc<GenericFuncDef>),
}

impl GlobalValue {
    pub fn is_public(&self) -> bool {
        match self {
            GlobalValue::Variable(v) => v.public,
            GlobalValue::Function(f) => f.public,
            GlobalValue::GenericFunction(g) => g.public,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StructDef {
    pub public: bool,
    pub ty: Arc<StructType>,
    /// Traits the struct declares, checked when the package is declared.
    pub implements: Vec<Arc<TraitDef>>,
}

#[derive(Clone, Debug)]
pub struct AliasDef {
    pub public: bool,
    pub name: Name,
    pub ty: Type,
}

#[derive(Clone, Debug)]
pub enum TypeDef {
    Struct(Arc<StructDef>),
    Alias(Arc<AliasDef>),
}

impl TypeDef {
    pub fn is_public(&self) -> bool {
        match self {
            TypeDef::Struct(s) => s.public,
            TypeDef::Alias(a) => a.public,
        }
    }

    /// The type this definition names.
    pub fn ty(&self) -> Type {
        match self {
            TypeDef::Struct(s) => Type::Struct(Arc::clone(&s.ty)),
            TypeDef::Alias(a) => a.ty.clone(),
        }
    }
}

/// A method bound to a struct of the same package.
#[derive(Clone, Debug)]
pub struct MethodDef {
    pub public: bool,
    pub receiver: Name,
    pub receiver_mutable: bool,
    pub name: Name,
    /// Signature without the receiver.
    pub sig: FuncType,
}

/// Declarations of one package.
#[derive(Debug)]
pub struct Package {
    pub path: Name,
    pub(crate) values: FxHashMap<Name, GlobalValue>,
    pub(crate) types: FxHashMap<Name, TypeDef>,
    pub(crate) traits: FxHashMap<Name, Arc<TraitDef>>,
    pub(crate) methods: FxHashMap<(Name, Name), Arc<MethodDef>>,
}

impl Package {
    pub fn new(path: Name) -> Self {
        Package {
            path,
            values: FxHashMap::default(),
            types: FxHashMap::default(),
            traits: FxHashMap::default(),
            methods: FxHashMap::default(),
        }
    }

    pub fn value(&self, name: Name) -> Option<&GlobalValue> {
        self.values.get(&name)
    }

    pub fn type_def(&self, name: Name) -> Option<&TypeDef> {
        self.types.get(&name)
    }

    pub fn trait_def(&self, name: Name) -> Option<&Arc<TraitDef>> {
        self.traits.get(&name)
    }

    pub fn struct_def(&self, name: Name) -> Option<&Arc<StructDef>> {
        match self.types.get(&name) {
            Some(TypeDef::Struct(def)) => Some(def),
            _ => None,
        }
    }

    /// Method `name` of the struct named `receiver`.
    pub fn method(&self, receiver: Name, name: Name) -> Option<&Arc<MethodDef>> {
        self.methods.get(&(receiver, name))
    }
}
