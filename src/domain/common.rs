use uuid::Uuid;

/// Entities addressable by a stable identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Entities that can render a short human-readable label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
