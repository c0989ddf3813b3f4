//! Event log migrations - embedded SQL files
//!
//! Compiled into the binary with include_str!. Each entry is
//! (name, sql_content), applied in name order.

/// All event log migrations.
///
/// When adding a migration, create `NNN_description.sql` next to this file
/// and append it here.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
