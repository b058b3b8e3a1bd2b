//! Common test helpers for php-vm context tests

#![allow(dead_code)]

use php_vm::compiler::chunk::{Block, UserFunc};
use php_vm::runtime::context::{Context, VmContext};
use php_vm::vm::frame::CallFrame;
use std::rc::Rc;

/// Fresh context with tracing hooked up when `RUST_LOG` is set.
pub fn new_context() -> VmContext {
    php_vm::init_tracing();
    Context::new()
}

/// A user function with an empty body named after it.
pub fn user_func(name: &str) -> Rc<UserFunc> {
    Rc::new(UserFunc::new(name, Rc::new(Block::new(name))))
}

/// A frame whose body is named `name`, so frames can be told apart.
pub fn frame(name: &str) -> CallFrame {
    CallFrame::new(Rc::new(Block::new(name)))
}

pub fn frame_name(frame: &CallFrame) -> &str {
    std::str::from_utf8(&frame.body.name).expect("frame names are utf-8 in tests")
}
