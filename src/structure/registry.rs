// Wed Jan 15 2026 - Alex

use crate::memory::Value;
use crate::structure::{StructError, StructLayout};
use ahash::RandomState;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// A declared struct type. Its default layout lives in the [`LayoutRegistry`];
/// types whose layout depends on construction arguments override `layout`.
pub trait StructType: 'static {
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Computes a layout from construction arguments.
    fn layout(_args: &[Value]) -> Result<Arc<StructLayout>, StructError> {
        Err(StructError::NoLayoutFactory(Self::name()))
    }
}

static GLOBAL_LAYOUTS: Lazy<LayoutRegistry> = Lazy::new(LayoutRegistry::new);

/// Default layouts keyed by struct type.
pub struct LayoutRegistry {
    layouts: RwLock<HashMap<TypeId, Arc<StructLayout>, RandomState>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self {
            layouts: RwLock::new(HashMap::default()),
        }
    }

    pub fn global() -> &'static LayoutRegistry {
        &GLOBAL_LAYOUTS
    }

    pub fn register<T: StructType>(&self, layout: StructLayout) -> Arc<StructLayout> {
        let layout = Arc::new(layout);
        if self.layouts.write().insert(TypeId::of::<T>(), layout.clone()).is_some() {
            log::warn!("layout for {} replaced", T::name());
        } else {
            log::debug!("layout for {} registered ({} bytes)", T::name(), layout.size());
        }
        layout
    }

    pub fn get<T: StructType>(&self) -> Option<Arc<StructLayout>> {
        self.layouts.read().get(&TypeId::of::<T>()).cloned()
    }

    pub fn contains<T: StructType>(&self) -> bool {
        self.layouts.read().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.layouts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.read().is_empty()
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::LayoutBuilder;

    struct Registered;
    impl StructType for Registered {}

    struct Unregistered;
    impl StructType for Unregistered {
        fn name() -> &'static str {
            "Unregistered"
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = LayoutRegistry::new();
        let layout = LayoutBuilder::new().field("a", 0, "int64").unwrap().build().unwrap();
        let registered = registry.register::<Registered>(layout);
        let found = registry.get::<Registered>().unwrap();
        assert!(Arc::ptr_eq(&registered, &found));
        assert!(registry.get::<Unregistered>().is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_default_factory() {
        assert_eq!(
            Unregistered::layout(&[Value::Int32(1)]),
            Err(StructError::NoLayoutFactory("Unregistered"))
        );
    }
}
