//! Traits and structural conformance.
//!
//! A struct satisfies a trait when, for every trait method, the struct has
//! a method of the same name whose signature equals the trait signature
//! with `Self` replaced by the struct type. There is no declaration-site
//! requirement: conformance is checked wherever it is needed.

use std::sync::Arc;

use sim_ir::Name;
use sim_types::{FuncType, Subst, Type};

use crate::package::Package;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TraitMethod {
    pub name: Name,
    /// Signature without the receiver; may mention `Self`.
    pub sig: FuncType,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TraitDef {
    pub public: bool,
    pub package: Name,
    pub name: Name,
    pub methods: Vec<TraitMethod>,
}

impl TraitDef {
    /// The builtin `default` trait for `ty`: one method `default() ty`.
    pub fn default_trait(package: Name, default_name: Name, ty: Type) -> TraitDef {
        TraitDef {
            public: true,
            package,
            name: default_name,
            methods: vec![TraitMethod {
                name: default_name,
                sig: FuncType::new(Vec::new(), ty),
            }],
        }
    }

    /// First trait method `owner` lacks (or has with another signature).
    pub fn first_missing(&self, owner: &Package, receiver: Name) -> Option<Name> {
        let struct_ty = Type::Struct(Arc::clone(&owner.struct_def(receiver)?.ty));
        let subst = Subst::with_self(&struct_ty);
        self.methods
            .iter()
            .find(|required| match owner.method(receiver, required.name) {
                Some(method) => !method.sig.eq_under(&required.sig, &subst),
                None => true,
            })
            .map(|required| required.name)
    }
}

/// Whether the struct `receiver` of `owner` satisfies `trait_def`.
///
/// A name that is not a struct of `owner` satisfies nothing.
pub fn satisfies(owner: &Package, receiver: Name, trait_def: &TraitDef) -> bool {
    owner.struct_def(receiver).is_some() && trait_def.first_missing(owner, receiver).is_none()
}
