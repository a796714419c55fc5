// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

/// The property id Notion assigns to a database's title column.
///
/// Unlike every other property id, this one is not opaque: the title column
/// of any database always carries the literal id `"title"`. Title
/// synchronization keys on it.
pub const TITLE_PROPERTY_ID: &str = "title";

/// Display name given to a synthesized title descriptor when a task has a
/// name but its schema snapshot carries no title column.
pub const SYNTHESIZED_TITLE_NAME: &str = "Name";

/// Payload keys that mark a property object as a schema declaration rather
/// than a page value.
///
/// A database-schema response describes a select column as
/// `{"options": [...]}` and a number column as `{"format": "number"}`;
/// a page-query response carries the actual value instead. The presence of
/// either key (or an empty object) means "no value here, assign a default".
pub const SCHEMA_MARKER_KEYS: [&str; 2] = ["options", "format"];

/// Version header value sent with every Notion API request.
pub const NOTION_API_VERSION: &str = "2022-06-28";
