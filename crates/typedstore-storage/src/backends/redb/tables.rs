//! Redb table definitions.

use redb::TableDefinition;

/// The table holding every key-value pair of a store.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> =
    TableDefinition::new("typedstore_data");
