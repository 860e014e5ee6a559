//! Type catalog capability and the in-memory registry.

use crate::error::RegistryError;
use crate::types::{ComponentAnnotation, Property, TypeInfo, TypeKey, TypeKind, WellKnown};
use std::collections::{HashMap, HashSet};

/// Read access to an introspected type graph.
///
/// The generator only ever talks to this trait, so a catalog can be built by
/// hand, parsed from a description file, or produced by any other means.
pub trait TypeCatalog {
    /// Root component types, in enumeration order.
    fn root_types(&self) -> &[TypeKey];

    /// Looks up a type by key.
    fn get(&self, key: TypeKey) -> Option<&TypeInfo>;

    /// Returns the type carrying the given well-known tag.
    fn well_known(&self, tag: WellKnown) -> Option<TypeKey>;

    /// Looks up a type by key, failing if it is absent.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownKey` if the key is not in the catalog.
    fn type_info(&self, key: TypeKey) -> Result<&TypeInfo, RegistryError> {
        self.get(key).ok_or(RegistryError::UnknownKey { key })
    }

    /// Returns true if `key` is the type tagged with `tag`.
    fn is_well_known(&self, key: TypeKey, tag: WellKnown) -> bool {
        self.well_known(tag) == Some(key)
    }

    /// Returns true if `key` is, or transitively derives from, the type tagged `tag`.
    ///
    /// # Errors
    /// Returns `RegistryError` if the base chain is circular or references a
    /// missing type.
    fn inherits_from(&self, key: TypeKey, tag: WellKnown) -> Result<bool, RegistryError> {
        let Some(target) = self.well_known(tag) else {
            return Ok(false);
        };

        let mut seen = HashSet::new();
        let mut current = Some(key);
        while let Some(k) = current {
            if k == target {
                return Ok(true);
            }
            let info = self.type_info(k)?;
            if !seen.insert(k) {
                return Err(RegistryError::CircularBase {
                    path: info.name.clone(),
                });
            }
            current = info.base;
        }

        Ok(false)
    }
}

/// Arena-backed type registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: Vec<TypeInfo>,
    by_name: HashMap<String, TypeKey>,
    roots: Vec<TypeKey>,
    well_known: HashMap<WellKnown, TypeKey>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new type without base or properties.
    ///
    /// # Errors
    /// Returns `RegistryError::DuplicateType` if the name is already declared.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        kind: TypeKind,
    ) -> Result<TypeKey, RegistryError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateType { name });
        }

        let key = TypeKey::new(self.types.len());
        self.by_name.insert(name.clone(), key);
        self.types.push(TypeInfo::new(name, kind));
        Ok(key)
    }

    /// Looks up a type key by canonical name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeKey> {
        self.by_name.get(name).copied()
    }

    /// Returns a mutable reference to a type.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownKey` if the key is not in the registry.
    pub fn type_info_mut(&mut self, key: TypeKey) -> Result<&mut TypeInfo, RegistryError> {
        self.types
            .get_mut(key.index())
            .ok_or(RegistryError::UnknownKey { key })
    }

    /// Sets the base type of `key`.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownKey` if either key is unknown.
    pub fn set_base(&mut self, key: TypeKey, base: TypeKey) -> Result<(), RegistryError> {
        self.type_info(base)?;
        self.type_info_mut(key)?.base = Some(base);
        Ok(())
    }

    /// Appends an own property to `key`.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownKey` if the type or a referenced type is unknown.
    pub fn add_property(&mut self, key: TypeKey, property: Property) -> Result<(), RegistryError> {
        self.type_info(property.value_type)?;
        if let Some(element) = &property.array_element {
            self.type_info(element.item_type)?;
        }
        self.type_info_mut(key)?.properties.push(property);
        Ok(())
    }

    /// Attaches a name-override annotation to `key`.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownKey` if the key is unknown.
    pub fn set_component(
        &mut self,
        key: TypeKey,
        annotation: ComponentAnnotation,
    ) -> Result<(), RegistryError> {
        self.type_info_mut(key)?.component = Some(annotation);
        Ok(())
    }

    /// Registers `key` as a root component type. Adding a root twice is a no-op.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownKey` if the key is unknown.
    pub fn add_root(&mut self, key: TypeKey) -> Result<(), RegistryError> {
        self.type_info(key)?;
        if !self.roots.contains(&key) {
            self.roots.push(key);
        }
        Ok(())
    }

    /// Tags `key` as the framework type `tag`.
    ///
    /// # Errors
    /// Returns `RegistryError::DuplicateWellKnown` if another type holds the tag.
    pub fn mark_well_known(&mut self, tag: WellKnown, key: TypeKey) -> Result<(), RegistryError> {
        if let Some(&existing) = self.well_known.get(&tag) {
            if existing != key {
                return Err(RegistryError::DuplicateWellKnown {
                    tag,
                    existing: self.type_info(existing)?.name.clone(),
                });
            }
        }
        self.type_info_mut(key)?.well_known = Some(tag);
        self.well_known.insert(tag, key);
        Ok(())
    }

    /// Returns the number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over all types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeKey, &TypeInfo)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, info)| (TypeKey::new(idx), info))
    }
}

impl TypeCatalog for Registry {
    fn root_types(&self) -> &[TypeKey] {
        &self.roots
    }

    fn get(&self, key: TypeKey) -> Option<&TypeInfo> {
        self.types.get(key.index())
    }

    fn well_known(&self, tag: WellKnown) -> Option<TypeKey> {
        self.well_known.get(&tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    fn component_registry() -> (Registry, TypeKey, TypeKey, TypeKey) {
        let mut registry = Registry::new();
        let object = registry.declare("Object", TypeKind::Structured).unwrap();
        registry.mark_well_known(WellKnown::Root, object).unwrap();
        let target = registry.declare("Target", TypeKind::Structured).unwrap();
        registry.set_base(target, object).unwrap();
        registry.mark_well_known(WellKnown::Component, target).unwrap();
        let file = registry.declare("FileTarget", TypeKind::Structured).unwrap();
        registry.set_base(file, target).unwrap();
        (registry, object, target, file)
    }

    #[test]
    fn test_declare_and_lookup() {
        let (registry, object, _, file) = component_registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("Object"), Some(object));
        assert_eq!(registry.lookup("FileTarget"), Some(file));
        assert_eq!(registry.lookup("Missing"), None);
    }

    #[test]
    fn test_declare_duplicate() {
        let (mut registry, ..) = component_registry();
        let err = registry.declare("Target", TypeKind::Structured).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateType { .. }));
    }

    #[test]
    fn test_inherits_from() {
        let (registry, object, target, file) = component_registry();
        assert!(registry.inherits_from(file, WellKnown::Component).unwrap());
        assert!(registry.inherits_from(target, WellKnown::Component).unwrap());
        assert!(!registry.inherits_from(object, WellKnown::Component).unwrap());
        assert!(!registry.inherits_from(file, WellKnown::Layout).unwrap());
    }

    #[test]
    fn test_inherits_from_cycle() {
        let mut registry = Registry::new();
        let a = registry.declare("A", TypeKind::Structured).unwrap();
        let b = registry.declare("B", TypeKind::Structured).unwrap();
        let c = registry.declare("C", TypeKind::Structured).unwrap();
        registry.mark_well_known(WellKnown::Component, c).unwrap();
        registry.set_base(a, b).unwrap();
        registry.set_base(b, a).unwrap();

        let err = registry.inherits_from(a, WellKnown::Component).unwrap_err();
        assert!(matches!(err, RegistryError::CircularBase { .. }));
    }

    #[test]
    fn test_mark_well_known_twice() {
        let (mut registry, object, _, file) = component_registry();
        registry.mark_well_known(WellKnown::Root, object).unwrap();
        let err = registry.mark_well_known(WellKnown::Root, file).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateWellKnown { .. }));
        assert!(registry.is_well_known(object, WellKnown::Root));
    }

    #[test]
    fn test_add_property_unknown_type() {
        let (mut registry, _, _, file) = component_registry();
        let err = registry
            .add_property(file, Property::new("Ghost", TypeKey::new(99)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownKey { .. }));

        let int = registry
            .declare("Int32", TypeKind::Primitive(Primitive::Int32))
            .unwrap();
        registry
            .add_property(file, Property::new("BufferSize", int))
            .unwrap();
        assert_eq!(registry.type_info(file).unwrap().properties.len(), 1);
    }

    #[test]
    fn test_add_root_is_idempotent() {
        let (mut registry, _, _, file) = component_registry();
        registry.add_root(file).unwrap();
        registry.add_root(file).unwrap();
        assert_eq!(registry.root_types(), &[file]);
    }
}
