use uuid::Uuid;

/// Identifies records that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly record name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Finds a record by id in a collection of identifiable records.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}
