//! Registry validation utilities.
//!
//! This module checks a registry for the structural properties the schema
//! generator relies on before any traversal starts.

use crate::catalog::{Registry, TypeCatalog};
use crate::error::RegistryError;
use crate::types::{TypeInfo, TypeKey, TypeKind, WellKnown};
use std::collections::HashSet;

/// Validates a registry for consistency.
///
/// # Arguments
/// * `registry` - The registry to validate
///
/// # Returns
/// Ok(()) if valid, or RegistryError describing the first issue found.
///
/// # Errors
/// Returns `RegistryError` if validation fails.
pub fn validate_registry(registry: &Registry) -> Result<(), RegistryError> {
    validate_well_known(registry)?;
    validate_bases(registry)?;
    validate_types(registry)?;
    validate_roots(registry)?;
    Ok(())
}

/// Validates the framework type tags.
fn validate_well_known(registry: &Registry) -> Result<(), RegistryError> {
    let Some(root) = registry.well_known(WellKnown::Root) else {
        return Err(RegistryError::validation(
            "registry has no type tagged as the universal root",
        ));
    };

    let root_info = registry.type_info(root)?;
    if root_info.base.is_some() {
        return Err(RegistryError::validation(format!(
            "universal root '{}' must not have a base type",
            root_info.name
        )));
    }

    Ok(())
}

/// Validates that every structured base chain is acyclic and ends at the root.
fn validate_bases(registry: &Registry) -> Result<(), RegistryError> {
    let root = registry.well_known(WellKnown::Root);

    for (key, info) in registry.iter() {
        let mut seen = HashSet::new();
        let mut path = vec![info.name.as_str()];
        let mut current = key;
        seen.insert(key);

        while let Some(base) = registry.type_info(current)?.base {
            let base_info = registry.type_info(base)?;
            path.push(base_info.name.as_str());
            if !seen.insert(base) {
                return Err(RegistryError::CircularBase {
                    path: path.join(" -> "),
                });
            }
            current = base;
        }

        if info.is_structured() && Some(current) != root {
            return Err(RegistryError::validation(format!(
                "base chain of '{}' ends at '{}' instead of the universal root",
                info.name,
                registry.type_info(current)?.name
            )));
        }
    }

    Ok(())
}

/// Validates per-type contents.
fn validate_types(registry: &Registry) -> Result<(), RegistryError> {
    for (_, info) in registry.iter() {
        match &info.kind {
            TypeKind::Enum(members) => validate_enum(info, members)?,
            TypeKind::Structured => validate_properties(registry, info)?,
            _ => {
                if !info.properties.is_empty() {
                    return Err(RegistryError::validation(format!(
                        "non-structured type '{}' declares properties",
                        info.name
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Validates an enumeration's member list.
fn validate_enum(info: &TypeInfo, members: &[String]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();

    for member in members {
        if member.is_empty() {
            return Err(RegistryError::validation(format!(
                "empty member name in enum '{}'",
                info.name
            )));
        }
        if !seen.insert(member) {
            return Err(RegistryError::validation(format!(
                "Duplicate enum member '{}' in enum '{}'",
                member, info.name
            )));
        }
    }

    Ok(())
}

/// Validates the own properties of a structured type.
fn validate_properties(registry: &Registry, info: &TypeInfo) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();

    for prop in &info.properties {
        if !seen.insert(&prop.name) {
            return Err(RegistryError::validation(format!(
                "Duplicate property '{}' on type '{}'",
                prop.name, info.name
            )));
        }

        if let Some(element) = &prop.array_element {
            if element.element_name.is_empty() {
                return Err(RegistryError::validation(format!(
                    "property '{}.{}' has an empty element name",
                    info.name, prop.name
                )));
            }
            if registry.type_info(element.item_type)?.is_array() {
                return Err(RegistryError::validation(format!(
                    "item type of '{}.{}' must not be an array type",
                    info.name, prop.name
                )));
            }
        }

        if prop.accepts_layout && prop.accepts_condition {
            return Err(RegistryError::validation(format!(
                "property '{}.{}' accepts both a layout and a condition",
                info.name, prop.name
            )));
        }
    }

    Ok(())
}

/// Validates that every root is a structured type.
fn validate_roots(registry: &Registry) -> Result<(), RegistryError> {
    for &key in registry.root_types() {
        let info = registry.type_info(key)?;
        if !info.is_structured() {
            return Err(RegistryError::validation(format!(
                "root type '{}' is not a structured type",
                info.name
            )));
        }
        if is_reserved(registry, key) {
            return Err(RegistryError::validation(format!(
                "root type '{}' is a reserved framework type",
                info.name
            )));
        }
    }
    Ok(())
}

fn is_reserved(registry: &Registry, key: TypeKey) -> bool {
    WellKnown::ALL
        .iter()
        .any(|&tag| registry.is_well_known(key, tag))
}
