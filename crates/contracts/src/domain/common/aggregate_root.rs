use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Instance accessors plus static metadata shared by every aggregate in the
/// system (index, collection name, UI names).
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    /// Id of this record
    fn id(&self) -> Self::Id;

    /// Display name of this record
    fn display_name(&self) -> &str;

    /// Lifecycle metadata
    fn metadata(&self) -> &EntityMetadata;

    /// Mutable lifecycle metadata
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for the database (e.g. "category")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Kategori")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Kategoriler")
    fn list_name() -> &'static str;

    /// Full aggregate name (e.g. "a001_category")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
