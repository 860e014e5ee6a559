//! Complex type emission for structured types.

use crate::defs::{AttributeDef, ComplexTypeDef, ElementDef};
use crate::error::CodegenError;
use crate::naming::{
    CONDITION_TYPE_NAME, IMPLICIT_LAYOUT_ATTRIBUTE, LAYOUT_TYPE_NAME, attribute_name,
    schema_type_name,
};
use logxsd_registry::{Property, TypeCatalog, TypeInfo, TypeKey, WellKnown};

/// Result of emitting one structured type.
#[derive(Debug, Clone)]
pub struct StructuredOutput {
    /// The complex type definition.
    pub def: ComplexTypeDef,
    /// Referenced types to visit next: base type first, then array item
    /// types, then scalar property types, each in declaration order.
    pub referenced: Vec<TypeKey>,
}

/// Emitter for complex type definitions.
pub struct StructuredEmitter<'a, C: TypeCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: TypeCatalog + ?Sized> StructuredEmitter<'a, C> {
    /// Creates a new emitter over a catalog.
    #[must_use]
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Emits the complex type definition of `key`.
    ///
    /// # Errors
    /// Returns `CodegenError` if a referenced type is missing from the catalog
    /// or the base chain is circular.
    pub fn emit(&self, key: TypeKey) -> Result<StructuredOutput, CodegenError> {
        let info = self.catalog.type_info(key)?;
        let mut def = ComplexTypeDef::new(schema_type_name(info));
        let mut referenced = Vec::new();

        if let Some(base) = info.base {
            referenced.push(base);
            if !self.catalog.is_well_known(base, WellKnown::Root) {
                def.extends = Some(schema_type_name(self.catalog.type_info(base)?).to_string());
            }
        }

        self.emit_elements(info, &mut def, &mut referenced)?;
        self.emit_attributes(info, &mut def, &mut referenced)?;

        if self.accepts_implicit_layout(key, info)? {
            def.attributes
                .push(AttributeDef::new(IMPLICIT_LAYOUT_ATTRIBUTE, LAYOUT_TYPE_NAME));
        }

        Ok(StructuredOutput { def, referenced })
    }

    /// Emits one repeatable element per array-valued property.
    fn emit_elements(
        &self,
        info: &TypeInfo,
        def: &mut ComplexTypeDef,
        referenced: &mut Vec<TypeKey>,
    ) -> Result<(), CodegenError> {
        for element in info.properties.iter().filter_map(|p| p.array_element.as_ref()) {
            let item = self.catalog.type_info(element.item_type)?;
            def.elements.push(ElementDef::new(
                element.element_name.as_str(),
                schema_type_name(item),
            ));
            referenced.push(element.item_type);
        }
        Ok(())
    }

    /// Emits one attribute per writable scalar property.
    fn emit_attributes(
        &self,
        info: &TypeInfo,
        def: &mut ComplexTypeDef,
        referenced: &mut Vec<TypeKey>,
    ) -> Result<(), CodegenError> {
        for prop in &info.properties {
            if prop.array_element.is_some() || self.is_reserved(prop.value_type) || !prop.writable
            {
                continue;
            }

            let type_name = self.attribute_type(prop)?;
            def.attributes
                .push(AttributeDef::new(attribute_name(&prop.name), type_name));
            referenced.push(prop.value_type);
        }
        Ok(())
    }

    fn attribute_type(&self, prop: &Property) -> Result<String, CodegenError> {
        if prop.accepts_layout {
            return Ok(LAYOUT_TYPE_NAME.to_string());
        }
        if prop.accepts_condition {
            return Ok(CONDITION_TYPE_NAME.to_string());
        }
        Ok(schema_type_name(self.catalog.type_info(prop.value_type)?).to_string())
    }

    /// Returns true for plugin-child and deferred-expression types.
    fn is_reserved(&self, key: TypeKey) -> bool {
        self.catalog
            .get(key)
            .and_then(|info| info.well_known)
            .is_some_and(|tag| tag.is_reserved_property_type())
    }

    /// Components with a name-override annotation get a `layout` attribute
    /// unless the annotation opts out.
    fn accepts_implicit_layout(&self, key: TypeKey, info: &TypeInfo) -> Result<bool, CodegenError> {
        let Some(annotation) = &info.component else {
            return Ok(false);
        };
        if annotation.ignores_layout {
            return Ok(false);
        }
        Ok(self.catalog.inherits_from(key, WellKnown::Component)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logxsd_registry::{ComponentAnnotation, Primitive, Registry, TypeKind};

    struct Fixture {
        registry: Registry,
        object: TypeKey,
        target: TypeKey,
        string: TypeKey,
        int: TypeKey,
        layout: TypeKey,
        condition: TypeKey,
        targets: TypeKey,
    }

    fn fixture() -> Fixture {
        let mut registry = Registry::new();
        let object = registry.declare("Object", TypeKind::Structured).unwrap();
        registry.mark_well_known(WellKnown::Root, object).unwrap();
        let string = registry.declare("String", TypeKind::String).unwrap();
        let int = registry
            .declare("Int32", TypeKind::Primitive(Primitive::Int32))
            .unwrap();

        let mut tagged = |name: &str, tag: WellKnown| {
            let key = registry.declare(name, TypeKind::Structured).unwrap();
            registry.set_base(key, object).unwrap();
            registry.mark_well_known(tag, key).unwrap();
            key
        };
        let target = tagged("Target", WellKnown::Component);
        let targets = tagged("TargetCollection", WellKnown::ComponentCollection);
        let layout = tagged("Layout", WellKnown::Layout);
        let condition = tagged("ConditionExpression", WellKnown::Condition);

        Fixture {
            registry,
            object,
            target,
            string,
            int,
            layout,
            condition,
            targets,
        }
    }

    impl Fixture {
        fn structured(&mut self, name: &str, base: TypeKey) -> TypeKey {
            let key = self.registry.declare(name, TypeKind::Structured).unwrap();
            self.registry.set_base(key, base).unwrap();
            key
        }

        fn prop(&mut self, owner: TypeKey, prop: Property) {
            self.registry.add_property(owner, prop).unwrap();
        }
    }

    #[test]
    fn test_emit_plain_structure() {
        let mut f = fixture();
        let rule = f.structured("Rule", f.object);
        f.prop(rule, Property::new("Count", f.int));
        f.prop(rule, Property::new("Text", f.string));

        let out = StructuredEmitter::new(&f.registry).emit(rule).unwrap();
        assert_eq!(out.def.name, "Rule");
        assert_eq!(out.def.extends, None);
        assert!(out.def.elements.is_empty());
        assert_eq!(
            out.def.attributes,
            vec![
                AttributeDef::new("count", "xs:integer"),
                AttributeDef::new("text", "xs:string"),
            ]
        );
        assert_eq!(out.referenced, vec![f.object, f.int, f.string]);
    }

    #[test]
    fn test_emit_extension() {
        let mut f = fixture();
        let base = f.structured("NetworkTarget", f.target);
        f.registry
            .set_component(base, ComponentAnnotation::new("Network"))
            .unwrap();
        let derived = f.structured("NLogViewerTarget", base);

        let out = StructuredEmitter::new(&f.registry).emit(derived).unwrap();
        assert_eq!(out.def.extends.as_deref(), Some("Network"));
        assert_eq!(out.referenced.first(), Some(&base));
    }

    #[test]
    fn test_elements_precede_attributes_in_references() {
        let mut f = fixture();
        let item = f.structured("Parameter", f.object);
        let collection = f.structured("ParameterCollection", f.object);
        let owner = f.structured("Holder", f.object);
        f.prop(owner, Property::new("Size", f.int));
        f.prop(
            owner,
            Property::new("Parameters", collection).with_array_element("parameter", item),
        );

        let out = StructuredEmitter::new(&f.registry).emit(owner).unwrap();
        assert_eq!(out.def.elements, vec![ElementDef::new("parameter", "Parameter")]);
        assert_eq!(out.def.attributes, vec![AttributeDef::new("size", "xs:integer")]);
        assert_eq!(out.referenced, vec![f.object, item, f.int]);
    }

    #[test]
    fn test_array_property_never_becomes_attribute() {
        let mut f = fixture();
        let owner = f.structured("Holder", f.object);
        f.prop(
            owner,
            Property::new("Names", f.string)
                .read_only()
                .with_array_element("name", f.string),
        );

        let out = StructuredEmitter::new(&f.registry).emit(owner).unwrap();
        assert_eq!(out.def.elements, vec![ElementDef::new("name", "xs:string")]);
        assert!(out.def.attributes.is_empty());
    }

    #[test]
    fn test_reserved_and_read_only_properties_skipped() {
        let mut f = fixture();
        let owner = f.structured("Wrapper", f.object);
        f.prop(owner, Property::new("WrappedTarget", f.target));
        f.prop(owner, Property::new("Targets", f.targets));
        f.prop(owner, Property::new("CompiledLayout", f.layout));
        f.prop(owner, Property::new("CompiledCondition", f.condition));
        f.prop(owner, Property::new("IsOpen", f.int).read_only());

        let out = StructuredEmitter::new(&f.registry).emit(owner).unwrap();
        assert!(out.def.attributes.is_empty());
        assert_eq!(out.referenced, vec![f.object]);
    }

    #[test]
    fn test_deferred_expression_attribute_types() {
        let mut f = fixture();
        let owner = f.structured("Filter", f.object);
        f.prop(owner, Property::new("FileName", f.string).accepting_layout());
        f.prop(owner, Property::new("Condition", f.string).accepting_condition());

        let out = StructuredEmitter::new(&f.registry).emit(owner).unwrap();
        assert_eq!(
            out.def.attributes,
            vec![
                AttributeDef::new("fileName", "NLogLayout"),
                AttributeDef::new("condition", "NLogCondition"),
            ]
        );
        assert_eq!(out.referenced, vec![f.object, f.string, f.string]);
    }

    #[test]
    fn test_implicit_layout_attribute() {
        let mut f = fixture();
        let file = f.structured("FileTarget", f.target);
        f.registry
            .set_component(file, ComponentAnnotation::new("File"))
            .unwrap();
        f.prop(file, Property::new("AutoFlush", f.int));

        let out = StructuredEmitter::new(&f.registry).emit(file).unwrap();
        assert_eq!(out.def.name, "File");
        assert_eq!(
            out.def.attributes.last(),
            Some(&AttributeDef::new("layout", "NLogLayout"))
        );
    }

    #[test]
    fn test_implicit_layout_suppressed() {
        let mut f = fixture();
        let group = f.structured("SplitTargetGroup", f.target);
        f.registry
            .set_component(
                group,
                ComponentAnnotation::new("SplitGroup").ignoring_layout(),
            )
            .unwrap();

        let out = StructuredEmitter::new(&f.registry).emit(group).unwrap();
        assert!(out.def.get_attribute("layout").is_none());
    }

    #[test]
    fn test_implicit_layout_requires_annotation_and_component() {
        let mut f = fixture();
        let unnamed = f.structured("TargetWithLayoutHeaderAndFooter", f.target);
        let out = StructuredEmitter::new(&f.registry).emit(unnamed).unwrap();
        assert!(out.def.get_attribute("layout").is_none());

        let outsider = f.structured("Renderer", f.object);
        f.registry
            .set_component(outsider, ComponentAnnotation::new("Renderer"))
            .unwrap();
        let out = StructuredEmitter::new(&f.registry).emit(outsider).unwrap();
        assert!(out.def.get_attribute("layout").is_none());
    }
}
