use super::*;
use crate::scene::object::Part;

fn obj(id: ObjectId) -> SceneObject {
    SceneObject::external(id, "thing", vec![Part::group("g")], "thing.glb")
}

#[test]
fn ids_are_strictly_increasing() {
    let mut scene = Scene::new();
    let a = scene.allocate_id(1_000);
    let b = scene.allocate_id(1_000);
    let c = scene.allocate_id(900);
    let d = scene.allocate_id(5_000);
    assert_eq!(a, ObjectId(1_000));
    assert_eq!(b, ObjectId(1_001));
    assert_eq!(c, ObjectId(1_002));
    assert_eq!(d, ObjectId(5_000));
}

#[test]
fn insert_selects_and_rejects_duplicates() {
    let mut scene = Scene::new();
    let id = scene.insert(obj(ObjectId(7))).unwrap();
    assert_eq!(scene.selected(), Some(id));
    assert!(scene.insert(obj(ObjectId(7))).is_err());
    assert_eq!(scene.len(), 1);
    // Inserted ids feed the allocator.
    assert_eq!(scene.allocate_id(0), ObjectId(8));
}

#[test]
fn remove_keeps_order_and_clears_selection() {
    let mut scene = Scene::new();
    for i in 1..=3 {
        scene.insert(obj(ObjectId(i))).unwrap();
    }
    scene.select(Some(ObjectId(2))).unwrap();
    let removed = scene.remove(ObjectId(2)).unwrap();
    assert_eq!(removed.id, ObjectId(2));
    assert_eq!(scene.selected(), None);
    let ids: Vec<_> = scene.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![ObjectId(1), ObjectId(3)]);
    assert!(matches!(
        scene.remove(ObjectId(2)),
        Err(StudioError::NotFound(_))
    ));
}

#[test]
fn select_unknown_id_fails() {
    let mut scene = Scene::new();
    assert!(scene.select(Some(ObjectId(1))).is_err());
    assert!(scene.select(None).is_ok());
}
