pub mod frame;
pub mod stack;
