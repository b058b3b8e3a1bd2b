use crate::compiler::chunk::Block;
use crate::core::value::{Val, Visibility};
use bitflags::bitflags;
use indexmap::IndexMap;
use std::rc::Rc;

/// Property name -> value, in declaration order.
pub type PropertyTable = IndexMap<Vec<u8>, Val>;

/// Retain-predicate applied by [`ClassEntry::get_properties`].
///
/// Returning `false` hides the property from the caller.
pub type PropertyFilter = fn(class: &ClassEntry, name: &[u8], value: &Val) -> bool;

bitflags! {
    /// Why the properties of an instance are being read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyPurpose: u32 {
        /// var_dump(), print_r(), debug_zval_dump()
        const DEBUG = 1;
    }
}

#[derive(Debug, Clone)]
pub struct PropertyInfo {
    pub default_value: Option<Val>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
}

impl Default for PropertyInfo {
    fn default() -> Self {
        Self {
            default_value: None,
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
        }
    }
}

/// Compiled metadata for one declared class.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    name: Vec<u8>,
    /// Body of `__construct`, shared with the function that defines it.
    pub constructor: Option<Rc<Block>>,
    pub properties: IndexMap<Vec<u8>, PropertyInfo>,
    property_filters: Vec<(PropertyPurpose, PropertyFilter)>,
}

impl ClassEntry {
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            constructor: None,
            properties: IndexMap::new(),
            property_filters: Vec::new(),
        }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    pub fn with_constructor(mut self, body: Rc<Block>) -> Self {
        self.constructor = Some(body);
        self
    }

    /// Declare a property. Redeclaring keeps the original position.
    pub fn declare_property(&mut self, name: impl AsRef<[u8]>, info: PropertyInfo) {
        self.properties.insert(name.as_ref().to_vec(), info);
    }

    /// Non-static declarations in declaration order (instance layout).
    pub fn instance_properties(&self) -> impl Iterator<Item = (&[u8], &PropertyInfo)> {
        self.properties
            .iter()
            .filter(|(_, info)| !info.is_static)
            .map(|(name, info)| (name.as_slice(), info))
    }

    /// The property table a freshly constructed instance starts with.
    pub fn default_properties(&self) -> PropertyTable {
        self.instance_properties()
            .map(|(name, info)| {
                (
                    name.to_vec(),
                    info.default_value.clone().unwrap_or(Val::Null),
                )
            })
            .collect()
    }

    /// Register a filter applied when properties are read for `purpose`.
    pub fn set_property_filter(&mut self, purpose: PropertyPurpose, filter: PropertyFilter) {
        self.property_filters.push((purpose, filter));
    }

    /// Properties of an instance as they should be exposed for `reason`.
    ///
    /// Without a matching filter the table is returned unchanged. Filters can
    /// only drop entries, so the result is always a subset of `properties`.
    pub fn get_properties(&self, mut properties: PropertyTable, reason: PropertyPurpose) -> PropertyTable {
        for (purpose, filter) in &self.property_filters {
            if purpose.intersects(reason) {
                properties.retain(|name, value| filter(self, name, value));
            }
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hide_private(class: &ClassEntry, name: &[u8], _value: &Val) -> bool {
        class
            .properties
            .get(name)
            .is_none_or(|info| info.visibility != Visibility::Private)
    }

    #[test]
    fn test_debug_properties_default_to_identity() {
        let class = ClassEntry::new("Point");
        let mut props = PropertyTable::new();
        props.insert(b"x".to_vec(), Val::Int(1));
        props.insert(b"y".to_vec(), Val::Int(2));

        let result = class.get_properties(props.clone(), PropertyPurpose::DEBUG);
        assert_eq!(result, props);

        let empty = class.get_properties(PropertyTable::new(), PropertyPurpose::DEBUG);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_debug_filter_drops_entries() {
        let mut class = ClassEntry::new("Account");
        class.declare_property(
            "secret",
            PropertyInfo {
                visibility: Visibility::Private,
                ..Default::default()
            },
        );
        class.declare_property("owner", PropertyInfo::default());
        class.set_property_filter(PropertyPurpose::DEBUG, hide_private);

        let mut props = class.default_properties();
        props.insert(b"dynamic".to_vec(), Val::Bool(true));

        let result = class.get_properties(props.clone(), PropertyPurpose::DEBUG);
        let names: Vec<&[u8]> = result.keys().map(|k| k.as_slice()).collect();
        assert_eq!(names, vec![&b"owner"[..], &b"dynamic"[..]]);
        assert!(result.keys().all(|k| props.contains_key(k)));

        // Filters only apply to the purpose they were registered for
        let unfiltered = class.get_properties(props.clone(), PropertyPurpose::empty());
        assert_eq!(unfiltered, props);
    }

    #[test]
    fn test_instance_layout_skips_statics() {
        let mut class = ClassEntry::new("Counter");
        class.declare_property(
            "count",
            PropertyInfo {
                default_value: Some(Val::Int(0)),
                ..Default::default()
            },
        );
        class.declare_property(
            "instances",
            PropertyInfo {
                is_static: true,
                ..Default::default()
            },
        );
        class.declare_property("label", PropertyInfo::default());

        let defaults = class.default_properties();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults.get(&b"count"[..]), Some(&Val::Int(0)));
        assert_eq!(defaults.get(&b"label"[..]), Some(&Val::Null));
    }

    #[test]
    fn test_redeclared_property_keeps_position() {
        let mut class = ClassEntry::new("A");
        class.declare_property("first", PropertyInfo::default());
        class.declare_property("second", PropertyInfo::default());
        class.declare_property(
            "first",
            PropertyInfo {
                is_readonly: true,
                ..Default::default()
            },
        );

        let names: Vec<&[u8]> = class.properties.keys().map(|k| k.as_slice()).collect();
        assert_eq!(names, vec![&b"first"[..], &b"second"[..]]);
        assert!(class.properties[&b"first"[..]].is_readonly);
    }

    #[test]
    fn test_constructor_is_shared() {
        let body = Rc::new(Block::new("Point::__construct"));
        let class = ClassEntry::new("Point").with_constructor(Rc::clone(&body));

        assert!(Rc::ptr_eq(class.constructor.as_ref().unwrap(), &body));
        assert_eq!(class.name(), b"Point");
    }
}
