use thiserror::Error;

/// Recoverable failures reported by the execution context.
///
/// Undefined symbols are not errors (lookups return `None`), and misuse of
/// the save/restore protocol panics instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A user constant with this exact name already exists
    #[error("Constant {name} already defined")]
    ConstantRedefined { name: String },
    /// The name collides with one of the `null`/`true`/`false` literals
    #[error("{name} is a reserved constant and cannot be redefined")]
    ReservedConstant { name: String },
}
