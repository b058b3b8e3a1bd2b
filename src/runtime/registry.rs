use super::class_entry::ClassEntry;
use crate::compiler::chunk::UserFunc;
use std::collections::HashMap;
use std::rc::Rc;

/// Function and class tables.
///
/// PHP resolves function and class names case-insensitively, so both tables
/// are keyed by the ASCII-lowercased name. There is no removal: entries live
/// as long as the context that holds them.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    /// User function definitions (lowercased name -> definition)
    functions: HashMap<Vec<u8>, Rc<UserFunc>>,
    /// Class entries (lowercased name -> entry)
    classes: HashMap<Vec<u8>, ClassEntry>,
}

fn normalize(name: &[u8]) -> Vec<u8> {
    name.to_ascii_lowercase()
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any earlier one with the same normalized name.
    ///
    /// Returns the replaced definition, if any.
    pub fn declare_function(&mut self, func: Rc<UserFunc>) -> Option<Rc<UserFunc>> {
        let key = normalize(&func.name);
        let previous = self.functions.insert(key, Rc::clone(&func));
        if previous.is_some() {
            tracing::debug!(name = %func.display_name(), "function redeclared");
        } else {
            tracing::debug!(name = %func.display_name(), "function declared");
        }
        previous
    }

    /// Register a class, replacing any earlier one with the same normalized name.
    pub fn declare_class(&mut self, class: ClassEntry) -> Option<ClassEntry> {
        let key = normalize(class.name());
        let name = class.display_name();
        let previous = self.classes.insert(key, class);
        if previous.is_some() {
            tracing::debug!(%name, "class redeclared");
        } else {
            tracing::debug!(%name, "class declared");
        }
        previous
    }

    pub fn lookup_function(&self, name: &[u8]) -> Option<&Rc<UserFunc>> {
        self.functions.get(&normalize(name))
    }

    pub fn lookup_class(&self, name: &[u8]) -> Option<&ClassEntry> {
        self.classes.get(&normalize(name))
    }

    pub fn lookup_class_mut(&mut self, name: &[u8]) -> Option<&mut ClassEntry> {
        self.classes.get_mut(&normalize(name))
    }

    pub fn has_function(&self, name: &[u8]) -> bool {
        self.functions.contains_key(&normalize(name))
    }

    pub fn has_class(&self, name: &[u8]) -> bool {
        self.classes.contains_key(&normalize(name))
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Normalized names of all declared functions, in no particular order.
    pub fn function_names(&self) -> impl Iterator<Item = &[u8]> {
        self.functions.keys().map(|k| k.as_slice())
    }

    /// Normalized names of all declared classes, in no particular order.
    pub fn class_names(&self) -> impl Iterator<Item = &[u8]> {
        self.classes.keys().map(|k| k.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::chunk::Block;

    fn func(name: &str) -> Rc<UserFunc> {
        Rc::new(UserFunc::new(name, Rc::new(Block::new(name))))
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = SymbolRegistry::new();
        registry.declare_function(func("strToUpper2"));

        assert!(registry.lookup_function(b"STRTOUPPER2").is_some());
        assert!(registry.lookup_function(b"strtoupper2").is_some());
        assert!(registry.has_function(b"StrToUpper2"));
        assert!(registry.lookup_function(b"strtoupper3").is_none());
    }

    #[test]
    fn test_last_declaration_wins() {
        let mut registry = SymbolRegistry::new();
        let first = func("Foo");
        let second = func("foo");

        assert!(registry.declare_function(Rc::clone(&first)).is_none());
        let replaced = registry.declare_function(Rc::clone(&second)).unwrap();

        assert!(Rc::ptr_eq(&replaced, &first));
        assert_eq!(registry.function_count(), 1);
        assert!(Rc::ptr_eq(registry.lookup_function(b"FOO").unwrap(), &second));
        assert_eq!(registry.function_names().collect::<Vec<_>>(), vec![&b"foo"[..]]);
    }

    #[test]
    fn test_class_table() {
        let mut registry = SymbolRegistry::new();
        registry.declare_class(ClassEntry::new("CaseExample"));

        let class = registry.lookup_class(b"caseexample").unwrap();
        assert_eq!(class.name(), b"CaseExample");
        assert!(registry.has_class(b"CASEEXAMPLE"));

        registry
            .lookup_class_mut(b"caseExample")
            .unwrap()
            .declare_property("x", Default::default());
        assert_eq!(registry.lookup_class(b"CaseExample").unwrap().properties.len(), 1);

        let replaced = registry.declare_class(ClassEntry::new("CASEEXAMPLE")).unwrap();
        assert_eq!(replaced.properties.len(), 1);
        assert_eq!(registry.class_count(), 1);
        assert_eq!(registry.lookup_class(b"caseexample").unwrap().name(), b"CASEEXAMPLE");
    }

    #[test]
    fn test_functions_and_classes_are_separate_namespaces() {
        let mut registry = SymbolRegistry::new();
        registry.declare_function(func("Thing"));

        assert!(registry.lookup_class(b"thing").is_none());
        assert_eq!(registry.class_names().count(), 0);
    }
}
