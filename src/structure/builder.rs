// Tue Jan 13 2026 - Alex

use crate::structure::{FieldHandler, StructError, StructField, StructLayout, TypeRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Collects fields with caller-chosen offsets. Offsets are taken as given;
/// padding and alignment rules are the caller's business.
pub struct LayoutBuilder<'a> {
    registry: &'a TypeRegistry,
    names: Vec<String>,
    fields: HashMap<String, StructField>,
    size: Option<usize>,
    alignment: Option<usize>,
}

impl LayoutBuilder<'static> {
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::global())
    }
}

impl<'a> LayoutBuilder<'a> {
    pub fn with_registry(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            names: Vec::new(),
            fields: HashMap::new(),
            size: None,
            alignment: None,
        }
    }

    pub fn field(self, name: &str, offset: usize, type_name: &str) -> Result<Self, StructError> {
        let field = StructField::with_registry(offset, Some(type_name), self.registry)?;
        Ok(self.add(name, field))
    }

    pub fn custom(self, name: &str, offset: usize, handler: Arc<dyn FieldHandler>) -> Self {
        self.add(name, StructField::custom(offset, handler))
    }

    pub fn add(mut self, name: &str, field: StructField) -> Self {
        self.names.push(name.to_string());
        self.fields.insert(name.to_string(), field);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn alignment(mut self, alignment: usize) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Without an explicit size the layout ends after its last field.
    pub fn build(self) -> Result<StructLayout, StructError> {
        let mut extent = 0usize;
        for (name, field) in &self.fields {
            let end = field
                .offset()
                .checked_add(field.size().unwrap_or(0))
                .ok_or_else(|| StructError::FieldOverflow(name.clone()))?;
            extent = extent.max(end);
        }
        let size = self.size.unwrap_or(extent);
        let alignment = self.alignment.unwrap_or(1);
        StructLayout::new(self.names.as_slice(), &self.fields, size, alignment)
    }
}

impl Default for LayoutBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}
