use crate::core::value::Val;
use std::rc::Rc;

/// Compiled body of a callable.
///
/// The instructions live with the interpreter; the context only needs an
/// identity it can share between a function record and a class constructor.
#[derive(Debug, Default)]
pub struct Block {
    pub name: Vec<u8>, // File/Func name
}

impl Block {
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FuncParam {
    pub name: Vec<u8>,
    pub by_ref: bool,
    pub is_variadic: bool,
    pub default_value: Option<Val>,
}

impl FuncParam {
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            by_ref: false,
            is_variadic: false,
            default_value: None,
        }
    }
}

/// A user function as handed over by the front end.
#[derive(Debug, Clone)]
pub struct UserFunc {
    pub name: Vec<u8>,
    pub params: Vec<FuncParam>,
    pub body: Rc<Block>,
    pub is_generator: bool,
    pub returns_ref: bool,
}

impl UserFunc {
    pub fn new(name: impl AsRef<[u8]>, body: Rc<Block>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            params: Vec::new(),
            body,
            is_generator: false,
            returns_ref: false,
        }
    }

    pub fn with_param(mut self, param: FuncParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}
