// Wed Jan 15 2026 - Alex

use crate::memory::{AbstractMemory, MemoryHandle, MemoryPointer, Value};
use crate::structure::{LayoutRegistry, StructError, StructField, StructLayout, StructType};
use std::fmt;
use std::sync::Arc;

/// A layout bound to a concrete memory region.
///
/// The instance either allocated its memory (and is the only holder until it
/// hands out [`StructInstance::pointer`]) or borrows a handle the caller
/// passed in. Field access goes straight to the region's op table when the
/// field is primitive and the region supports its type; everything else is
/// delegated to the field itself.
pub struct StructInstance {
    type_name: &'static str,
    layout: Arc<StructLayout>,
    pointer: MemoryHandle,
    owned: bool,
}

impl StructInstance {
    /// With no `args` the type's registered layout is used; otherwise the
    /// type's layout factory computes one from `args`. Without `pointer`
    /// a zero-filled region of exactly the layout's size is allocated.
    pub fn new<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        let layout = if !args.is_empty() {
            T::layout(args)?
        } else {
            LayoutRegistry::global()
                .get::<T>()
                .ok_or(StructError::NoLayout(T::name()))?
        };
        Self::attach(T::name(), layout, pointer)
    }

    pub fn alloc_in<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        Self::new::<T>(pointer, args)
    }

    pub fn alloc_out<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        Self::new::<T>(pointer, args)
    }

    pub fn alloc_inout<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        Self::new::<T>(pointer, args)
    }

    pub fn new_in<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        Self::new::<T>(pointer, args)
    }

    pub fn new_out<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        Self::new::<T>(pointer, args)
    }

    pub fn new_inout<T: StructType>(pointer: Option<MemoryHandle>, args: &[Value]) -> Result<Self, StructError> {
        Self::new::<T>(pointer, args)
    }

    /// Binds an already resolved layout, e.g. one loaded from a description file.
    pub fn with_layout(layout: Arc<StructLayout>, pointer: Option<MemoryHandle>) -> Result<Self, StructError> {
        Self::attach("Struct", layout, pointer)
    }

    fn attach(
        type_name: &'static str,
        layout: Arc<StructLayout>,
        pointer: Option<MemoryHandle>,
    ) -> Result<Self, StructError> {
        let (pointer, owned) = match pointer {
            Some(pointer) => {
                check_kind(pointer.as_ref())?;
                (pointer, false)
            }
            None => {
                let memory: MemoryHandle = Arc::new(MemoryPointer::new(layout.size()));
                (memory, true)
            }
        };

        if pointer.ops().is_none() {
            return Err(StructError::NoMemoryOps(pointer.type_name()));
        }

        log::debug!(
            "{}: {} fields over {} {} ({} bytes)",
            type_name,
            layout.len(),
            if owned { "owned" } else { "borrowed" },
            pointer.type_name(),
            pointer.size()
        );

        Ok(Self {
            type_name,
            layout,
            pointer,
            owned,
        })
    }

    pub fn field(&self, name: &str) -> Result<&StructField, StructError> {
        self.layout
            .lookup(name)
            .ok_or_else(|| StructError::NoSuchField(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<Value, StructError> {
        let field = self.field(name)?;
        match field.op_for(self.pointer.as_ref()) {
            Some(op) => {
                log::trace!("{}.{} fast get", self.type_name, name);
                Ok((op.get)(self.pointer.as_ref(), field.offset())?)
            }
            None => field.get(&self.pointer),
        }
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), StructError> {
        let value = value.into();
        let field = self.field(name)?;
        match field.op_for(self.pointer.as_ref()) {
            Some(op) => {
                log::trace!("{}.{} fast put", self.type_name, name);
                Ok((op.put)(self.pointer.as_ref(), field.offset(), &value)?)
            }
            None => field.put(&self.pointer, &value),
        }
    }

    pub fn pointer(&self) -> &MemoryHandle {
        &self.pointer
    }

    /// Swaps the backing memory. The layout is kept as is.
    pub fn set_pointer(&mut self, pointer: MemoryHandle) -> Result<(), StructError> {
        check_kind(pointer.as_ref())?;
        self.pointer = pointer;
        self.owned = false;
        Ok(())
    }

    pub fn layout(&self) -> &Arc<StructLayout> {
        &self.layout
    }

    /// Swaps the layout without resizing memory; the caller guarantees the
    /// current region is large enough.
    pub fn set_layout(&mut self, layout: Arc<StructLayout>) {
        self.layout = layout;
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn owns_memory(&self) -> bool {
        self.owned
    }

    pub fn is_null(&self) -> bool {
        self.pointer.is_null()
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn alignment(&self) -> usize {
        self.layout.alignment()
    }

    pub fn members(&self) -> Vec<&str> {
        self.layout.names().collect()
    }

    pub fn offsets(&self) -> Vec<(&str, usize)> {
        self.layout.fields().map(|(name, field)| (name, field.offset())).collect()
    }

    pub fn offset_of(&self, name: &str) -> Result<usize, StructError> {
        self.field(name).map(StructField::offset)
    }

    /// Reads every field in declaration order.
    pub fn values(&self) -> Result<Vec<(&str, Value)>, StructError> {
        self.layout
            .names()
            .map(|name| self.get(name).map(|value| (name, value)))
            .collect()
    }

    /// Zeroes the whole backing region.
    pub fn clear(&self) -> Result<(), StructError> {
        Ok(self.pointer.clear()?)
    }
}

fn check_kind(pointer: &dyn AbstractMemory) -> Result<(), StructError> {
    if pointer.is_kind_of_memory() {
        Ok(())
    } else {
        Err(StructError::InvalidPointer(pointer.type_name()))
    }
}

impl fmt::Debug for StructInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInstance")
            .field("type", &self.type_name)
            .field("layout", &self.layout)
            .field("pointer", &self.pointer)
            .field("owned", &self.owned)
            .finish()
    }
}
