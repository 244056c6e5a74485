use redb::TableDefinition;

/// Table backing client-local storage.
/// Key: storage key (e.g. "gadget-favorites")
/// Value: stored string, usually JSON
pub const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");
