//! Type graph walker.
//!
//! Starting from the catalog's root types, the generator visits every type
//! reachable through base types, array item types and scalar property types,
//! and emits at most one definition per type. A type is marked visited before
//! anything it references is examined, so cyclic graphs terminate; the types
//! it references are visited only after its own definition is complete.
//! Output order is therefore discovery order, and a definition may refer by
//! name to a type defined further down. Two types mapping to the same schema
//! name both get a definition; the collision is only logged.

use crate::classify::{TypeShape, classify};
use crate::defs::SchemaDef;
use crate::enums::emit_enumeration;
use crate::error::CodegenError;
use crate::structured::StructuredEmitter;
use crate::visited::VisitedSet;
use logxsd_registry::{TypeCatalog, TypeKey};
use std::collections::HashMap;

/// Schema definition generator over a type catalog.
pub struct Generator<'a, C: TypeCatalog + ?Sized> {
    catalog: &'a C,
}

/// Mutable state of one generation run.
struct Walk {
    visited: VisitedSet,
    defs: Vec<SchemaDef>,
    names: HashMap<String, TypeKey>,
}

impl<'a, C: TypeCatalog + ?Sized> Generator<'a, C> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Generates definitions for every type reachable from the root types.
    ///
    /// # Errors
    /// Returns `CodegenError` if the catalog is inconsistent.
    pub fn generate(&self) -> Result<Vec<SchemaDef>, CodegenError> {
        self.generate_from(self.catalog.root_types())
    }

    /// Generates definitions for every type reachable from `roots`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the catalog is inconsistent.
    pub fn generate_from(&self, roots: &[TypeKey]) -> Result<Vec<SchemaDef>, CodegenError> {
        let mut walk = Walk {
            visited: VisitedSet::seeded(self.catalog),
            defs: Vec::new(),
            names: HashMap::new(),
        };

        for &root in roots {
            self.visit(root, &mut walk)?;
        }

        tracing::info!(
            "Generated {} definitions from {} root types ({} types examined)",
            walk.defs.len(),
            roots.len(),
            walk.visited.len()
        );
        Ok(walk.defs)
    }

    fn visit(&self, key: TypeKey, walk: &mut Walk) -> Result<(), CodegenError> {
        if !walk.visited.insert(key) {
            return Ok(());
        }

        let info = self.catalog.type_info(key)?;
        match classify(info) {
            TypeShape::Skip(reason) => {
                tracing::debug!("Skipping {} ({:?})", info.name, reason);
            }
            TypeShape::Enumeration(members) => {
                let def = SchemaDef::Enumeration(emit_enumeration(info, members));
                self.push(key, def, walk)?;
            }
            TypeShape::Structured => {
                let output = StructuredEmitter::new(self.catalog).emit(key)?;
                self.push(key, SchemaDef::Complex(output.def), walk)?;
                for referenced in output.referenced {
                    self.visit(referenced, walk)?;
                }
            }
        }

        Ok(())
    }

    fn push(&self, key: TypeKey, def: SchemaDef, walk: &mut Walk) -> Result<(), CodegenError> {
        match walk.names.get(def.name()) {
            Some(&first) => {
                let first = self.catalog.type_info(first)?;
                let second = self.catalog.type_info(key)?;
                tracing::warn!(
                    "Schema type name '{}' is produced by both '{}' and '{}'",
                    def.name(),
                    first.name,
                    second.name
                );
            }
            None => {
                walk.names.insert(def.name().to_string(), key);
            }
        }

        tracing::debug!("Emitting {}", def.name());
        walk.defs.push(def);
        Ok(())
    }
}
