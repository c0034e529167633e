use crate::foundation::core::ObjectId;
use crate::foundation::error::{StudioError, StudioResult};
use crate::scene::object::SceneObject;

/// Ordered collection owning every scene object; membership is the only ownership signal.
///
/// Hosts keep their own `ObjectId -> render node` table rather than back-references.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    last_id: u64,
    selected: Option<ObjectId>,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id from a millisecond timestamp, bumped to stay strictly increasing.
    pub fn allocate_id(&mut self, now_ms: u64) -> ObjectId {
        let id = now_ms.max(self.last_id.saturating_add(1));
        self.last_id = id;
        ObjectId(id)
    }

    /// Append `obj` and select it.
    pub fn insert(&mut self, obj: SceneObject) -> StudioResult<ObjectId> {
        let id = obj.id;
        if self.contains(id) {
            return Err(StudioError::validation(format!(
                "object {id} already in scene"
            )));
        }
        self.last_id = self.last_id.max(id.0);
        self.objects.push(obj);
        self.selected = Some(id);
        Ok(id)
    }

    /// Remove and return an object, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: ObjectId) -> StudioResult<SceneObject> {
        let idx = self.index_of(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(self.objects.remove(idx))
    }

    /// Drop every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected = None;
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Shared access by id.
    pub fn get(&self, id: ObjectId) -> StudioResult<&SceneObject> {
        let idx = self.index_of(id)?;
        Ok(&self.objects[idx])
    }

    /// Exclusive access by id.
    pub fn get_mut(&mut self, id: ObjectId) -> StudioResult<&mut SceneObject> {
        let idx = self.index_of(id)?;
        Ok(&mut self.objects[idx])
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects in insertion order, mutable.
    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Select an object (or clear with `None`).
    pub fn select(&mut self, id: Option<ObjectId>) -> StudioResult<()> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        self.selected = id;
        Ok(())
    }

    /// Current selection.
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    fn index_of(&self, id: ObjectId) -> StudioResult<usize> {
        self.objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| StudioError::not_found(format!("object {id}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/arena.rs"]
mod tests;
