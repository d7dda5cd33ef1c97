use crate::id_generator::ShapeId;
use crate::shape::Shape;

/// Committed shapes in insertion order. Order governs both undo (last entry
/// is popped first) and painting (later shapes draw on top).
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn append(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Removes the shape with `id`, wherever it sits. Returns false when no
    /// such shape is present.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.shapes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Undo primitive: the current last entry, whatever was deleted before it.
    pub fn pop_last(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Swaps in a whole new set of shapes, e.g. after restoring a drawing.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id == id)
    }
}
