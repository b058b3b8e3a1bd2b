use super::class_entry::ClassEntry;
use super::constants::ConstantTable;
use super::error::ContextError;
use super::registry::SymbolRegistry;
use crate::compiler::chunk::UserFunc;
use crate::core::value::Val;
use crate::vm::frame::CallFrame;
use crate::vm::stack::{FrameStack, SavedStack};
use std::rc::Rc;

/// Context driven by the bytecode interpreter.
pub type VmContext = Context<CallFrame>;

/// Configuration for a new [`Context`]
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Frames preallocated for the frame stack
    pub stack_capacity: usize,
    /// Register PHP_VERSION, PHP_EOL, E_* and friends
    pub core_constants: bool,
    /// Additional constants defined before any code runs
    pub constants: Vec<(Vec<u8>, Val)>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            stack_capacity: 64,
            core_constants: false,
            constants: Vec::new(),
        }
    }
}

/// Execution context of one VM instance.
///
/// Holds the frame stack, the function/class tables and the constant table.
/// A context is confined to one thread; nested runs of the VM on the same
/// context go through [`Context::save`] and [`Context::restore`].
#[derive(Debug)]
pub struct Context<F> {
    symbols: SymbolRegistry,
    constants: ConstantTable,
    stack: FrameStack<F>,
}

impl<F> Default for Context<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Context<F> {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        let mut constants = ConstantTable::new();
        if config.core_constants {
            constants.register_core_constants();
        }
        for (name, value) in config.constants {
            constants.insert_builtin(&name, value);
        }
        tracing::debug!(
            stack_capacity = config.stack_capacity,
            constants = constants.len(),
            "context created"
        );
        Self {
            symbols: SymbolRegistry::new(),
            constants,
            stack: FrameStack::with_capacity(config.stack_capacity),
        }
    }

    // Symbols

    /// Register a function under its lowercased name. Redeclaration replaces.
    pub fn declare_function(&mut self, func: Rc<UserFunc>) {
        self.symbols.declare_function(func);
    }

    /// Register a class under its lowercased name. Redeclaration replaces.
    pub fn declare_class(&mut self, class: ClassEntry) {
        self.symbols.declare_class(class);
    }

    pub fn lookup_function(&self, name: impl AsRef<[u8]>) -> Option<&Rc<UserFunc>> {
        self.symbols.lookup_function(name.as_ref())
    }

    pub fn lookup_class(&self, name: impl AsRef<[u8]>) -> Option<&ClassEntry> {
        self.symbols.lookup_class(name.as_ref())
    }

    pub fn lookup_class_mut(&mut self, name: impl AsRef<[u8]>) -> Option<&mut ClassEntry> {
        self.symbols.lookup_class_mut(name.as_ref())
    }

    pub fn symbols(&self) -> &SymbolRegistry {
        &self.symbols
    }

    // Constants

    /// Resolve `null`/`true`/`false` (any case) or a user constant (exact case).
    pub fn constant_fetch(&self, name: impl AsRef<[u8]>) -> Option<Val> {
        self.constants.resolve(name.as_ref())
    }

    pub fn declare_constant(&mut self, name: impl AsRef<[u8]>, value: Val) -> Result<(), ContextError> {
        let name = name.as_ref();
        self.constants.declare(name, value).inspect_err(|err| {
            tracing::debug!(error = %err, "constant declaration rejected");
        })
    }

    pub fn is_constant_defined(&self, name: impl AsRef<[u8]>) -> bool {
        self.constants.is_defined(name.as_ref())
    }

    // Frames

    /// Make `frame` current; the previous current frame is saved beneath it.
    pub fn push(&mut self, frame: F) {
        self.stack.push(frame);
        tracing::trace!(depth = self.stack.len(), "frame pushed");
    }

    /// Remove the current frame and hand it back. `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<F> {
        let frame = self.stack.pop();
        if frame.is_some() {
            tracing::trace!(depth = self.stack.len(), "frame popped");
        }
        frame
    }

    pub fn current(&self) -> Option<&F> {
        self.stack.peek()
    }

    pub fn current_mut(&mut self) -> Option<&mut F> {
        self.stack.peek_mut()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Frames from newest to oldest.
    pub fn frames(&self) -> impl Iterator<Item = &F> {
        self.stack.iter()
    }

    /// Push `frame` and detach the whole chain, leaving the context with an
    /// empty stack for a nested run.
    pub fn save(&mut self, frame: F) -> SavedStack<F> {
        let saved = self.stack.save(frame);
        tracing::trace!(depth = saved.depth(), "frame stack saved");
        saved
    }

    /// Reinstate a saved chain and return the frame that was current at save time.
    ///
    /// # Panics
    ///
    /// Panics if the context still has frames on its stack.
    pub fn restore(&mut self, saved: SavedStack<F>) -> F {
        let depth = saved.depth();
        let frame = self.stack.restore(saved);
        tracing::trace!(depth, "frame stack restored");
        frame
    }
}

impl Context<CallFrame> {
    /// Fluent construction. `build` can still produce a context for any frame type.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }
}

/// Builder for constructing a [`Context`]
///
/// # Example
/// ```
/// use php_vm::core::value::Val;
/// use php_vm::runtime::context::VmContext;
///
/// let ctx: VmContext = VmContext::builder()
///     .with_core_constants()
///     .with_constant("APP_ENV", Val::string("test"))
///     .build();
/// assert_eq!(ctx.constant_fetch("E_ALL"), Some(Val::Int(32767)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    config: ContextConfig,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_core_constants(mut self) -> Self {
        self.config.core_constants = true;
        self
    }

    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.config.stack_capacity = capacity;
        self
    }

    pub fn with_constant(mut self, name: impl AsRef<[u8]>, value: Val) -> Self {
        self.config.constants.push((name.as_ref().to_vec(), value));
        self
    }

    pub fn build<F>(self) -> Context<F> {
        Context::with_config(self.config)
    }
}
