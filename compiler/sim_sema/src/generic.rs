//! Generic functions and their instance cache.
//!
//! A generic function is analyzed once, in terms of its placeholders. Each
//! distinct tuple of type arguments used at a call site becomes one
//! [`GenericInstance`]; the cache guarantees that equal argument tuples
//! (structurally) share a single handle, even when bodies are analyzed in
//! parallel.

use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use sim_ir::Name;
use sim_types::{FuncType, GenericParam, Subst, Type};

/// Structural key of an instantiation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InstanceKey(pub SmallVec<[Type; 2]>);

/// One instantiation of a generic function.
#[derive(Debug)]
pub struct GenericInstance {
    /// Package of the generic definition.
    pub package: Name,
    /// Name of the generic definition.
    pub name: Name,
    pub args: Vec<Type>,
    /// Signature with every placeholder replaced by `args`.
    pub sig: FuncType,
}

/// Wrong number of type arguments for a generic function.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ArityMismatch {
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug)]
pub struct GenericFuncDef {
    pub public: bool,
    pub package: Name,
    pub name: Name,
    pub params: Vec<GenericParam>,
    /// Signature in terms of `params`.
    pub sig: FuncType,
    instances: DashMap<InstanceKey, Arc<GenericInstance>, FxBuildHasher>,
}

impl GenericFuncDef {
    pub fn new(
        public: bool,
        package: Name,
        name: Name,
        params: Vec<GenericParam>,
        sig: FuncType,
    ) -> Self {
        GenericFuncDef {
            public,
            package,
            name,
            params,
            sig,
            instances: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// The instance for `args`, created on first request.
    ///
    /// Two requests with structurally equal arguments return the same
    /// handle (`Arc::ptr_eq`).
    pub fn instantiate(&self, args: &[Type]) -> Result<Arc<GenericInstance>, ArityMismatch> {
        if args.len() != self.params.len() {
            return Err(ArityMismatch {
                expected: self.params.len(),
                found: args.len(),
            });
        }

        let key = InstanceKey(args.iter().cloned().collect());
        let entry = self.instances.entry(key).or_insert_with(|| {
            tracing::trace!(args = args.len(), "new generic instance");
            Arc::new(GenericInstance {
                package: self.package,
                name: self.name,
                args: args.to_vec(),
                sig: self.sig.apply(&Subst::with_generics(args)),
            })
        });
        Ok(Arc::clone(entry.value()))
    }

    /// Number of distinct instances so far.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
