//! Per-table match predicates.
//!
//! A row matches when any searchable column contains any token as a
//! case-insensitive substring. The predicate can be rendered to a
//! parameterized SQL statement or evaluated directly against a [`Row`].

use crate::models::{Row, Value};
use crate::schema::TableDescriptor;
use crate::tokenize::TokenSet;

/// Matching rule for one table and one token set.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// No tokens or no searchable columns. The table is never queried.
    Nothing,
    /// OR across every (column, token) pair.
    AnyColumnContains {
        columns: &'static [&'static str],
        tokens: Vec<String>,
    },
}

/// A rendered SELECT and the LIKE patterns it binds.
///
/// The patterns travel as one JSON array bound to `?1` and are expanded with
/// `json_each`, so the expression depth grows with the column count only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub patterns: Vec<String>,
}

impl Statement {
    /// The value bound to `?1`.
    pub fn patterns_json(&self) -> String {
        serde_json::Value::from(self.patterns.clone()).to_string()
    }
}

/// Build the predicate for `table` from `tokens`.
pub fn build(table: &TableDescriptor, tokens: &TokenSet) -> Predicate {
    if tokens.is_empty() || !table.is_searchable() {
        return Predicate::Nothing;
    }
    Predicate::AnyColumnContains {
        columns: table.searchable,
        tokens: tokens.iter().cloned().collect(),
    }
}

impl Predicate {
    pub fn matches_nothing(&self) -> bool {
        matches!(self, Predicate::Nothing)
    }

    /// Evaluate against an in-memory row. Missing and null cells never match.
    pub fn matches(&self, row: &Row) -> bool {
        let (columns, tokens) = match self {
            Predicate::Nothing => return false,
            Predicate::AnyColumnContains { columns, tokens } => (columns, tokens),
        };
        columns.iter().any(|col| {
            let haystack = match row.get(col) {
                None | Some(Value::Null) => return false,
                Some(v) => v.to_string().to_lowercase(),
            };
            tokens.iter().any(|t| haystack.contains(t.as_str()))
        })
    }

    /// Render the SELECT for `table`, or `None` when nothing can match.
    ///
    /// SQLite `LIKE` folds ASCII case only, so the statement selects a
    /// superset of the matching rows and [`Predicate::matches`] makes the
    /// final decision. Rows come back in identifier order, which for SQLite
    /// integer keys is storage order.
    pub fn to_sql(&self, table: &TableDescriptor) -> Option<Statement> {
        let (columns, tokens) = match self {
            Predicate::Nothing => return None,
            Predicate::AnyColumnContains { columns, tokens } => (columns, tokens),
        };

        let clauses: Vec<String> = columns
            .iter()
            .map(|col| {
                format!(
                    "EXISTS (SELECT 1 FROM json_each(?1) AS p WHERE {}.{} LIKE p.value ESCAPE '\\')",
                    table.name, col
                )
            })
            .collect();

        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            table.columns.join(", "),
            table.name,
            clauses.join(" OR "),
            table.id_column
        );

        Some(Statement {
            sql,
            patterns: tokens.iter().map(|t| like_pattern(t)).collect(),
        })
    }
}

/// `%token%` with LIKE metacharacters escaped so they match literally.
///
/// Characters whose upper-case forms `LIKE` cannot fold become `%`: every
/// non-ASCII character, plus `i` and `k`, which are also the lower case of
/// `İ` and the Kelvin sign.
fn like_pattern(token: &str) -> String {
    let mut pattern = String::with_capacity(token.len() + 2);
    let mut open = true;
    pattern.push('%');
    for c in token.chars() {
        if !c.is_ascii() || c == 'i' || c == 'k' {
            if !open {
                pattern.push('%');
                open = true;
            }
            continue;
        }
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
        open = false;
    }
    if !open {
        pattern.push('%');
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::tokenize::extract;

    static NO_COLUMNS: TableDescriptor = TableDescriptor {
        name: "notes",
        display_name: "Notes",
        id_column: "id",
        columns: &["body"],
        searchable: &[],
    };

    fn dining() -> &'static TableDescriptor {
        schema::find("dining").unwrap()
    }

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().map(|(c, v)| (*c, Value::from(*v))).collect()
    }

    #[test]
    fn test_empty_tokens_match_nothing() {
        let p = build(dining(), &TokenSet::new());
        assert!(p.matches_nothing());
        assert!(p.to_sql(dining()).is_none());
    }

    #[test]
    fn test_empty_columns_match_nothing() {
        let p = build(&NO_COLUMNS, &extract("anything goes"));
        assert!(p.matches_nothing());
        assert!(!p.matches(&row(&[("body", "anything goes")])));
    }

    #[test]
    fn test_any_column_any_token() {
        let p = build(dining(), &extract("rice zzzz"));
        let r = row(&[
            ("location", "North Canteen"),
            ("menu", "Lunch: Rice, Dal"),
            ("notes", "Veg options"),
        ]);
        assert!(p.matches(&r), "one token in one column is enough");
    }

    #[test]
    fn test_case_insensitive_substring() {
        let p = build(dining(), &extract("CANTEEN"));
        assert!(p.matches(&row(&[("location", "North Canteen")])));
    }

    #[test]
    fn test_non_searchable_column_ignored() {
        // `hours` is an output column of dining but not searchable.
        let p = build(dining(), &extract("07"));
        assert!(p.matches_nothing(), "two-char token dropped");

        let p = build(dining(), &extract("0730"));
        assert!(!p.matches(&row(&[("hours", "0730-2000")])));
    }

    #[test]
    fn test_null_and_missing_cells_never_match() {
        let p = build(dining(), &extract("veg"));
        let mut r = Row::new();
        r.push("location", Value::Null);
        assert!(!p.matches(&r));
    }

    #[test]
    fn test_sql_shape() {
        let p = build(dining(), &extract("rice dal curry"));
        let stmt = p.to_sql(dining()).unwrap();
        assert!(stmt
            .sql
            .starts_with("SELECT location, hours, menu, notes FROM dining WHERE "));
        assert!(stmt.sql.ends_with(" ORDER BY id"));
        // One clause per searchable column, whatever the token count.
        assert_eq!(stmt.sql.matches(" LIKE ").count(), 3);
        assert_eq!(stmt.sql.matches(" OR ").count(), 2);
        assert!(stmt.sql.contains("dining.menu LIKE p.value ESCAPE"));
        assert!(!stmt.sql.contains(" AND "));
        assert_eq!(stmt.patterns, ["%curry%", "%dal%", "%r%ce%"]);
        assert_eq!(stmt.patterns_json(), r#"["%curry%","%dal%","%r%ce%"]"#);
    }

    #[test]
    fn test_sql_size_independent_of_token_count() {
        let text: Vec<String> = (0..300).map(|n| format!("word{}", n)).collect();
        let p = build(dining(), &extract(&text.join(" ")));
        let stmt = p.to_sql(dining()).unwrap();
        assert_eq!(stmt.patterns.len(), 300);
        assert_eq!(stmt.sql.matches(" LIKE ").count(), 3);
        assert!(stmt.sql.contains("?1"));
        assert!(!stmt.sql.contains("?2"));
    }

    #[test]
    fn test_tokens_only_appear_as_params() {
        let p = build(dining(), &extract("drop_table menu"));
        let stmt = p.to_sql(dining()).unwrap();
        assert!(!stmt.sql.contains("drop"));
        assert_eq!(stmt.patterns, ["%drop\\_table%", "%menu%"]);
    }

    #[test]
    fn test_like_pattern_escapes() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("x\\y"), "%x\\\\y%");
    }

    #[test]
    fn test_like_pattern_widens_unfoldable_chars() {
        assert_eq!(like_pattern("étoile"), "%to%le%");
        assert_eq!(like_pattern("kitchen"), "%tchen%");
        assert_eq!(like_pattern("café"), "%caf%");
        assert_eq!(like_pattern("ñoño"), "%o%o%");
        assert_eq!(like_pattern("über"), "%ber%");
    }

    #[test]
    fn test_unicode_case_insensitive_match() {
        let p = build(dining(), &extract("étoile"));
        assert!(p.matches(&row(&[("location", "CAFÉ ÉTOILE")])));
        let p = build(dining(), &extract("kitchen"));
        assert!(p.matches(&row(&[("location", "\u{212A}ITCHEN")])));
    }
}
