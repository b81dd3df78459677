// Tue Jan 13 2026 - Alex

use crate::structure::{StructError, StructField};
use ahash::RandomState;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

/// Immutable field table shared by every instance of a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct StructLayout {
    fields: IndexMap<String, StructField, RandomState>,
    size: usize,
    alignment: usize,
}

impl StructLayout {
    /// Builds the layout in `names` order. Every name must have an entry in
    /// `fields`; entries that no name refers to are ignored.
    pub fn new<S, H>(
        names: &[S],
        fields: &HashMap<String, StructField, H>,
        size: usize,
        alignment: usize,
    ) -> Result<Self, StructError>
    where
        S: AsRef<str>,
        H: BuildHasher,
    {
        let mut ordered = IndexMap::with_capacity_and_hasher(names.len(), RandomState::new());
        for name in names {
            let name = name.as_ref();
            let field = fields
                .get(name)
                .ok_or_else(|| StructError::InvalidField(name.to_string()))?;
            if ordered.insert(name.to_string(), field.clone()).is_some() {
                return Err(StructError::DuplicateField(name.to_string()));
            }
        }

        if fields.len() > ordered.len() {
            log::debug!("{} unnamed field descriptors ignored", fields.len() - ordered.len());
        }
        log::debug!("layout: {} fields, size {}, align {}", ordered.len(), size, alignment);

        Ok(Self {
            fields: ordered,
            size,
            alignment,
        })
    }

    pub fn lookup(&self, name: &str) -> Option<&StructField> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &StructField)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.lookup(name).map(StructField::offset)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }
}

impl fmt::Display for StructLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {{ ")?;
        for (i, (name, field)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", name, field)?;
        }
        write!(f, " }} size={} align={}", self.size, self.alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_fields() -> HashMap<String, StructField> {
        let mut fields = HashMap::new();
        fields.insert("x".to_string(), StructField::new(0, Some("int32")).unwrap());
        fields.insert("y".to_string(), StructField::new(4, Some("double")).unwrap());
        fields
    }

    #[test]
    fn test_lookup_returns_exact_descriptor() {
        let fields = point_fields();
        let layout = StructLayout::new(&["x", "y"], &fields, 12, 4).unwrap();
        assert_eq!(layout.lookup("x"), fields.get("x"));
        assert_eq!(layout.lookup("y"), fields.get("y"));
        assert!(layout.lookup("z").is_none());
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.size(), 12);
        assert_eq!(layout.alignment(), 4);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let layout = StructLayout::new(&["y", "x"], &point_fields(), 12, 4).unwrap();
        let names: Vec<&str> = layout.names().collect();
        assert_eq!(names, vec!["y", "x"]);
        assert_eq!(layout.offset_of("y"), Some(4));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = StructLayout::new(&["x", "w"], &point_fields(), 12, 4).unwrap_err();
        assert_eq!(err, StructError::InvalidField("w".into()));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let err = StructLayout::new(&["x", "x"], &point_fields(), 12, 4).unwrap_err();
        assert_eq!(err, StructError::DuplicateField("x".into()));
    }

    #[test]
    fn test_unnamed_entries_ignored() {
        let layout = StructLayout::new(&["y"], &point_fields(), 12, 4).unwrap();
        assert_eq!(layout.len(), 1);
        assert!(!layout.contains("x"));
    }
}
