use super::error::ContextError;
use crate::core::value::Val;
use std::collections::HashMap;

/// The literal keywords that always resolve, regardless of case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Null,
    False,
    True,
}

impl Keyword {
    pub fn parse(name: &[u8]) -> Option<Self> {
        if name.eq_ignore_ascii_case(b"null") {
            Some(Keyword::Null)
        } else if name.eq_ignore_ascii_case(b"false") {
            Some(Keyword::False)
        } else if name.eq_ignore_ascii_case(b"true") {
            Some(Keyword::True)
        } else {
            None
        }
    }

    /// A fresh value each time; keyword values are never shared.
    pub fn to_val(self) -> Val {
        match self {
            Keyword::Null => Val::Null,
            Keyword::False => Val::Bool(false),
            Keyword::True => Val::Bool(true),
        }
    }
}

/// User and core constants, keyed case-sensitively.
#[derive(Debug, Default, Clone)]
pub struct ConstantTable {
    values: HashMap<Vec<u8>, Val>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a constant name: keyword literals first, user constants second.
    ///
    /// `None` means the name is not resolvable here and the caller should
    /// fall back to a run-time constant fetch.
    pub fn resolve(&self, name: &[u8]) -> Option<Val> {
        if let Some(keyword) = Keyword::parse(name) {
            return Some(keyword.to_val());
        }
        self.values.get(name).cloned()
    }

    /// Define a constant. Like PHP's `define()`, the first definition wins.
    pub fn declare(&mut self, name: &[u8], value: Val) -> Result<(), ContextError> {
        if Keyword::parse(name).is_some() {
            return Err(ContextError::ReservedConstant {
                name: String::from_utf8_lossy(name).into_owned(),
            });
        }
        if self.values.contains_key(name) {
            return Err(ContextError::ConstantRedefined {
                name: String::from_utf8_lossy(name).into_owned(),
            });
        }
        self.values.insert(name.to_vec(), value);
        Ok(())
    }

    /// Insert without the redefinition check; used for engine-provided constants.
    pub(crate) fn insert_builtin(&mut self, name: &[u8], value: Val) {
        self.values.insert(name.to_vec(), value);
    }

    pub fn is_defined(&self, name: &[u8]) -> bool {
        Keyword::parse(name).is_some() || self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Register core PHP constants
    ///
    /// Core constants registered here:
    /// - PHP version info (PHP_VERSION, PHP_VERSION_ID, etc.)
    /// - System constants (PHP_OS, PHP_EOL, PHP_INT_*)
    /// - Path separators (DIRECTORY_SEPARATOR, PATH_SEPARATOR)
    /// - Error reporting levels (E_ERROR, E_WARNING, etc.)
    pub(crate) fn register_core_constants(&mut self) {
        const PHP_VERSION_STR: &str = "8.2.0";
        const PHP_VERSION_ID_VALUE: i64 = 80200;

        self.insert_builtin(b"PHP_VERSION", Val::string(PHP_VERSION_STR));
        self.insert_builtin(b"PHP_VERSION_ID", Val::Int(PHP_VERSION_ID_VALUE));
        self.insert_builtin(b"PHP_MAJOR_VERSION", Val::Int(8));
        self.insert_builtin(b"PHP_MINOR_VERSION", Val::Int(2));
        self.insert_builtin(b"PHP_RELEASE_VERSION", Val::Int(0));
        self.insert_builtin(b"PHP_EXTRA_VERSION", Val::string(""));

        let os = match std::env::consts::OS {
            "macos" => "Darwin",
            "windows" => "WINNT",
            "linux" => "Linux",
            other => other,
        };
        self.insert_builtin(b"PHP_OS", Val::string(os));
        self.insert_builtin(b"PHP_EOL", Val::string("\n"));
        self.insert_builtin(b"PHP_INT_MAX", Val::Int(i64::MAX));
        self.insert_builtin(b"PHP_INT_MIN", Val::Int(i64::MIN));
        self.insert_builtin(b"PHP_INT_SIZE", Val::Int(8));

        let dir_sep = std::path::MAIN_SEPARATOR.to_string();
        self.insert_builtin(b"DIRECTORY_SEPARATOR", Val::string(dir_sep));
        let path_sep = if cfg!(windows) { ";" } else { ":" };
        self.insert_builtin(b"PATH_SEPARATOR", Val::string(path_sep));

        const ERROR_LEVELS: [(&[u8], i64); 16] = [
            (b"E_ERROR", 1),
            (b"E_WARNING", 2),
            (b"E_PARSE", 4),
            (b"E_NOTICE", 8),
            (b"E_CORE_ERROR", 16),
            (b"E_CORE_WARNING", 32),
            (b"E_COMPILE_ERROR", 64),
            (b"E_COMPILE_WARNING", 128),
            (b"E_USER_ERROR", 256),
            (b"E_USER_WARNING", 512),
            (b"E_USER_NOTICE", 1024),
            (b"E_STRICT", 2048),
            (b"E_RECOVERABLE_ERROR", 4096),
            (b"E_DEPRECATED", 8192),
            (b"E_USER_DEPRECATED", 16384),
            (b"E_ALL", 32767),
        ];
        for (name, level) in ERROR_LEVELS {
            self.insert_builtin(name, Val::Int(level));
        }
    }
}
