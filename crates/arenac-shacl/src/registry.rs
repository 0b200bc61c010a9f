//! Target-class → shape-list index.
//!
//! Grounded on the corpus's `TypeRegistry`-style struct/enum/class lookup
//! tables (`context/registry.rs`'s `StructInfo`/`EnumInfo`/`ClassInfo` maps
//! keyed by `Symbol`): the same "registry of records keyed by an interned
//! handle" shape, here keyed by a target class [`StringRef`] instead of a
//! definition name.

use std::collections::HashMap;

use arenac_mem::StringRef;

use crate::error::ShaclError;
use crate::shape::Shape;

/// Holds every registered [`Shape`], indexed by the class it targets.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
    by_shape_iri: HashMap<StringRef, usize>,
    by_target_class: HashMap<StringRef, Vec<usize>>,
}

impl ShapeRegistry {
    /// Builds an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `shape`, indexing it by its target class.
    ///
    /// # Errors
    ///
    /// Returns [`ShaclError::DuplicateShape`] if a shape with the same
    /// `shape_iri` is already registered.
    pub fn register(&mut self, shape: Shape) -> Result<(), ShaclError> {
        if self.by_shape_iri.contains_key(&shape.shape_iri) {
            return Err(ShaclError::DuplicateShape);
        }
        let index = self.shapes.len();
        self.by_shape_iri.insert(shape.shape_iri, index);
        self.by_target_class.entry(shape.target_class).or_default().push(index);
        self.shapes.push(shape);
        Ok(())
    }

    /// Shapes targeting `class`, in registration order.
    #[must_use]
    pub fn shapes_for_class(&self, class: StringRef) -> &[usize] {
        self.by_target_class.get(&class).map_or(&[], Vec::as_slice)
    }

    /// Resolves a shape index back to its record.
    #[must_use]
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Looks up a shape by its own IRI.
    #[must_use]
    pub fn find_by_iri(&self, shape_iri: StringRef) -> Option<&Shape> {
        self.by_shape_iri.get(&shape_iri).and_then(|&idx| self.shapes.get(idx))
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if no shapes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates over every registered shape in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn sref(n: u32) -> StringRef {
        StringRef::new(n, n, 1)
    }

    #[test]
    fn registers_and_looks_up_by_class() {
        let mut registry = ShapeRegistry::new();
        let shape = Shape::new(sref(1), sref(2));
        registry.register(shape).unwrap();
        assert_eq!(registry.shapes_for_class(sref(2)), &[0]);
        assert!(registry.shapes_for_class(sref(99)).is_empty());
    }

    #[test]
    fn duplicate_shape_iri_rejected() {
        let mut registry = ShapeRegistry::new();
        registry.register(Shape::new(sref(1), sref(2))).unwrap();
        let err = registry.register(Shape::new(sref(1), sref(3))).unwrap_err();
        assert_eq!(err, ShaclError::DuplicateShape);
    }

    #[test]
    fn multiple_shapes_can_target_the_same_class() {
        let mut registry = ShapeRegistry::new();
        registry.register(Shape::new(sref(1), sref(9))).unwrap();
        registry.register(Shape::new(sref(2), sref(9))).unwrap();
        assert_eq!(registry.shapes_for_class(sref(9)), &[0, 1]);
    }
}
