// src/application/ports/util.rs
/// Produces time-ordered, collision-resistant article identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
