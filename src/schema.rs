//! The searchable table registry.
//!
//! Fixed at compile time. Table and column names used in SQL come only from
//! here, never from request input.

/// Static description of one searchable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: &'static str,
    /// Heading used in reply summaries.
    pub display_name: &'static str,
    /// Internal identifier column. Never part of a result row.
    pub id_column: &'static str,
    /// Columns returned in result rows, in output order.
    pub columns: &'static [&'static str],
    /// Columns matched against search tokens.
    pub searchable: &'static [&'static str],
}

impl TableDescriptor {
    pub fn is_searchable(&self) -> bool {
        !self.searchable.is_empty()
    }
}

static TABLES: [TableDescriptor; 4] = [
    TableDescriptor {
        name: "schedules",
        display_name: "Schedules",
        id_column: "id",
        columns: &["building", "room", "event", "day", "start_time", "end_time"],
        searchable: &["building", "room", "event", "day"],
    },
    TableDescriptor {
        name: "dining",
        display_name: "Dining",
        id_column: "id",
        columns: &["location", "hours", "menu", "notes"],
        searchable: &["location", "menu", "notes"],
    },
    TableDescriptor {
        name: "library",
        display_name: "Library",
        id_column: "id",
        columns: &["service", "hours", "contact", "notes"],
        searchable: &["service", "notes", "hours"],
    },
    TableDescriptor {
        name: "admin",
        display_name: "Admin",
        id_column: "id",
        columns: &["topic", "description", "contact", "url"],
        searchable: &["topic", "description"],
    },
];

/// All searchable tables in declaration order.
pub fn tables() -> &'static [TableDescriptor] {
    &TABLES
}

pub fn find(name: &str) -> Option<&'static TableDescriptor> {
    TABLES.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_declaration_order() {
        let names: Vec<&str> = tables().iter().map(|t| t.name).collect();
        assert_eq!(names, ["schedules", "dining", "library", "admin"]);
    }

    #[test]
    fn test_searchable_columns_are_output_columns() {
        for t in tables() {
            assert!(t.is_searchable(), "{} has no searchable columns", t.name);
            for col in t.searchable {
                assert!(t.columns.contains(col), "{}.{} not declared", t.name, col);
            }
        }
    }

    #[test]
    fn test_id_column_never_in_output() {
        for t in tables() {
            assert!(!t.columns.contains(&t.id_column), "{}", t.name);
        }
    }

    #[test]
    fn test_names_unique() {
        let names: HashSet<&str> = tables().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tables().len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("library").map(|t| t.display_name), Some("Library"));
        assert!(find("students").is_none());
    }
}
