// Tue Jan 13 2026 - Alex

use crate::structure::{
    ArrayField, BoolField, CharArrayField, FieldKind, LayoutBuilder, StructError, StructLayout, TypeRegistry,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// On-disk description of a layout with explicit offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub alignment: Option<usize>,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub offset: usize,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl LayoutSpec {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn describe(name: &str, layout: &StructLayout) -> Self {
        let fields = layout
            .fields()
            .map(|(field_name, field)| {
                let (type_name, count) = match field.kind() {
                    FieldKind::Primitive(ty) => (ty.name().to_string(), None),
                    FieldKind::Custom(handler) => match handler.count() {
                        Some(count) if handler.type_name() == "char_array" => ("char".to_string(), Some(count)),
                        Some(count) => {
                            let base = handler.type_name().split('[').next().unwrap_or_default();
                            (base.to_string(), Some(count))
                        }
                        None => (handler.type_name().to_string(), None),
                    },
                };
                FieldSpec {
                    name: field_name.to_string(),
                    offset: field.offset(),
                    type_name,
                    count,
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            size: Some(layout.size()),
            alignment: Some(layout.alignment()),
            fields,
        }
    }

    /// `char` with a count becomes an inline char array, any other type with
    /// a count an array of that type, and `bool` a one byte bool.
    pub fn build(&self, registry: &TypeRegistry) -> Result<StructLayout, StructError> {
        let mut builder = LayoutBuilder::with_registry(registry);
        for spec in &self.fields {
            builder = match (spec.type_name.as_str(), spec.count) {
                ("char", Some(count)) => builder.custom(&spec.name, spec.offset, Arc::new(CharArrayField::new(count))),
                ("bool", None) => builder.custom(&spec.name, spec.offset, Arc::new(BoolField)),
                (type_name, Some(count)) => {
                    let element = registry.find(type_name)?;
                    builder.custom(&spec.name, spec.offset, Arc::new(ArrayField::try_new(&spec.name, element, count)?))
                }
                (type_name, None) => builder.field(&spec.name, spec.offset, type_name)?,
            };
        }
        if let Some(size) = self.size {
            builder = builder.size(size);
        }
        if let Some(alignment) = self.alignment {
            builder = builder.alignment(alignment);
        }
        builder.build()
    }
}
