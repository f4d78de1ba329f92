//! Name resolution scopes.
//!
//! Two layers:
//! - [`PackageScope`]: the package's own declarations plus its imports
//!   (qualified externs and unqualified links)
//! - [`ScopeStack`]: function and block frames pushed while a body is
//!   analyzed; lookups walk it innermost first, then fall back to the
//!   package scope

mod package;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sim_ir::Name;
use sim_types::{GenericParam, Type};

use crate::generic::GenericFuncDef;
use crate::ir::LocalId;

pub(crate) use package::PackageScope;

/// Identity of a loop, for `break` and `continue` targets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LoopId(pub u32);

/// Where a name was bound.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolOrigin {
    Param,
    Local,
    LoopCursor,
    Function,
    GlobalVar,
}

/// What a name resolves to.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub ty: Type,
    pub mutable: bool,
    pub origin: SymbolOrigin,
    pub(crate) target: SymbolTarget,
}

#[derive(Clone, Debug)]
pub(crate) enum SymbolTarget {
    Local(LocalId),
    Global { package: Name, name: Name },
    Generic(Arc<GenericFuncDef>),
}

#[derive(Debug)]
pub(crate) enum FrameKind {
    /// Body of a function: owns the return type and generic parameters.
    Function {
        ret: Type,
        generics: Vec<GenericParam>,
    },
    /// Any nested block; a loop body carries its loop.
    Block { loop_id: Option<LoopId> },
}

#[derive(Debug)]
pub(crate) struct Frame {
    kind: FrameKind,
    symbols: FxHashMap<Name, Symbol>,
}

impl Frame {
    pub(crate) fn function(ret: Type, generics: Vec<GenericParam>) -> Self {
        Frame {
            kind: FrameKind::Function { ret, generics },
            symbols: FxHashMap::default(),
        }
    }

    pub(crate) fn block(loop_id: Option<LoopId>) -> Self {
        Frame {
            kind: FrameKind::Block { loop_id },
            symbols: FxHashMap::default(),
        }
    }
}

/// Stack of frames inside one body.
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame.
    ///
    /// A function frame rejects a second binding of the same name
    /// (returns `false`); a block frame replaces it.
    pub(crate) fn declare(&mut self, name: Name, symbol: Symbol) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        if matches!(frame.kind, FrameKind::Function { .. }) && frame.symbols.contains_key(&name) {
            return false;
        }
        frame.symbols.insert(name, symbol);
        true
    }

    pub(crate) fn lookup(&self, name: Name) -> Option<&Symbol> {
        self.frames.iter().rev().find_map(|f| f.symbols.get(&name))
    }

    /// Innermost enclosing loop of the current function.
    pub(crate) fn current_loop(&self) -> Option<LoopId> {
        for frame in self.frames.iter().rev() {
            match frame.kind {
                FrameKind::Block {
                    loop_id: Some(id), ..
                } => return Some(id),
                FrameKind::Block { loop_id: None } => {}
                FrameKind::Function { .. } => return None,
            }
        }
        None
    }

    fn function_frame(&self) -> Option<(&Type, &[GenericParam])> {
        self.frames.iter().rev().find_map(|f| match &f.kind {
            FrameKind::Function { ret, generics } => Some((ret, generics.as_slice())),
            FrameKind::Block { .. } => None,
        })
    }

    /// Declared return type of the enclosing function.
    pub(crate) fn return_type(&self) -> Option<&Type> {
        self.function_frame().map(|(ret, _)| ret)
    }

    /// Generic parameters of the enclosing function.
    pub(crate) fn generics(&self) -> &[GenericParam] {
        self.function_frame().map_or(&[], |(_, generics)| generics)
    }
}
