use crate::compiler::chunk::{Block, UserFunc};
use crate::core::value::Val;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::rc::Rc;

pub const INLINE_ARG_CAPACITY: usize = 8;
pub type ArgList = SmallVec<[Val; INLINE_ARG_CAPACITY]>;

/// One activation of a callable, as the interpreter tracks it.
///
/// The context only moves frames around; every field is owned by the
/// interpreter driving execution.
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub body: Rc<Block>,
    pub func: Option<Rc<UserFunc>>,
    pub ip: usize,
    pub locals: HashMap<Vec<u8>, Val>,
    pub args: ArgList,
}

impl CallFrame {
    pub fn new(body: Rc<Block>) -> Self {
        Self {
            body,
            func: None,
            ip: 0,
            locals: HashMap::new(),
            args: ArgList::new(),
        }
    }
}
