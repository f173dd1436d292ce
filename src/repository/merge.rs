use crate::cache::Resource;

/// Merge `item` into `entities`: replace the entity sharing its id in place,
/// otherwise append it at the end.
///
/// The result holds exactly one entity with `item`'s id. Later duplicates of
/// that id are dropped, the position of the first one is kept.
pub fn merge_by_id<T: Resource>(mut entities: Vec<T>, item: T) -> Vec<T> {
  let id = item.id();
  match entities.iter().position(|existing| existing.id() == id) {
    Some(index) => {
      let rest = entities.split_off(index + 1);
      entities[index] = item;
      entities.extend(rest.into_iter().filter(|entity| entity.id() != id));
    }
    None => entities.push(item),
  }
  entities
}
