//! SQLite-backed collection with native `ORDER BY`

use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

use crate::core::{Result, SortingError};
use crate::sorting::collection::{OrderField, SortableCollection};

type ComputedFn = Box<dyn Fn(&Map<String, Value>) -> Value>;

/// Rows of one SQLite table
///
/// Stored columns are ordered by the database. Computed properties are
/// attached to every loaded row and can only be sorted in memory.
pub struct SqliteCollection<'conn> {
    conn: &'conn Connection,
    table: String,
    columns: Vec<String>,
    computed: Vec<(String, ComputedFn)>,
}

impl std::fmt::Debug for SqliteCollection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCollection")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field(
                "computed",
                &self.computed.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'conn> SqliteCollection<'conn> {
    /// Open `table`, reading its column list from the schema
    pub fn new(conn: &'conn Connection, table: &str) -> Result<Self> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(SortingError::NoSuchTable(table.to_string()));
        }

        Ok(Self {
            conn,
            table: table.to_string(),
            columns,
            computed: Vec::new(),
        })
    }

    /// Attach a computed property derived from each row's stored columns
    pub fn with_computed(
        mut self,
        name: impl Into<String>,
        compute: impl Fn(&Map<String, Value>) -> Value + 'static,
    ) -> Self {
        self.computed.push((name.into(), Box::new(compute)));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn query(&self, order: Option<&OrderField>) -> Result<Vec<Value>> {
        let mut sql = format!("SELECT * FROM {}", quote_ident(&self.table));
        if let Some(field) = order {
            if let Some(column) = field.column() {
                sql.push_str(&format!(
                    " ORDER BY {} {}",
                    quote_ident(column),
                    if field.is_descending() { "DESC" } else { "ASC" }
                ));
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let rows = stmt
            .query_map([], |row| row_to_map(row, &names))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows
            .into_iter()
            .map(|mut map| {
                for (name, compute) in &self.computed {
                    let value = compute(&map);
                    map.insert(name.clone(), value);
                }
                Value::Object(map)
            })
            .collect())
    }
}

impl SortableCollection for SqliteCollection<'_> {
    fn records(&self) -> Result<Vec<Value>> {
        self.query(None)
    }

    fn supports_ordering(&self, field: &OrderField) -> bool {
        let stored: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        field.column().is_some_and(|c| stored.contains(c))
    }

    fn order_by(&self, field: &OrderField) -> Result<Vec<Value>> {
        self.query(Some(field))
    }
}

fn row_to_map(row: &Row<'_>, names: &[String]) -> rusqlite::Result<Map<String, Value>> {
    let mut map = Map::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let value = match row.get_ref(idx)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::from(i),
            ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Array(b.iter().map(|byte| Value::from(*byte)).collect()),
        };
        map.insert(name.clone(), value);
    }
    Ok(map)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE people (name TEXT, born INTEGER);
             INSERT INTO people VALUES ('Grace', 1906);
             INSERT INTO people VALUES ('Ada', 1815);
             INSERT INTO people VALUES ('Linus', 1969);",
        )
        .unwrap();
        conn
    }

    fn names(records: &[Value]) -> Vec<&str> {
        records.iter().map(|r| r["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_reads_columns() {
        let conn = people_db();
        let people = SqliteCollection::new(&conn, "people").unwrap();
        assert_eq!(people.columns(), ["name", "born"]);
    }

    #[test]
    fn test_missing_table_fails() {
        let conn = people_db();
        let err = SqliteCollection::new(&conn, "robots").unwrap_err();
        assert!(matches!(err, SortingError::NoSuchTable(ref t) if t == "robots"));
    }

    #[test]
    fn test_native_order_by_stored_column() {
        let conn = people_db();
        let people = SqliteCollection::new(&conn, "people").unwrap();

        let field = OrderField::parse("-born").unwrap();
        assert!(people.supports_ordering(&field));
        assert_eq!(names(&people.order_by(&field).unwrap()), ["Linus", "Grace", "Ada"]);

        let field = OrderField::parse("name").unwrap();
        assert_eq!(names(&people.order_by(&field).unwrap()), ["Ada", "Grace", "Linus"]);
    }

    #[test]
    fn test_computed_property_is_not_orderable() {
        let conn = people_db();
        let people = SqliteCollection::new(&conn, "people")
            .unwrap()
            .with_computed("age", |row| json!(2000 - row["born"].as_i64().unwrap_or(0)));

        let field = OrderField::parse("age").unwrap();
        assert!(!people.supports_ordering(&field));

        let records = people.records().unwrap();
        assert_eq!(records[0]["age"], json!(94));
    }

    #[test]
    fn test_nested_field_is_not_orderable() {
        let conn = people_db();
        let people = SqliteCollection::new(&conn, "people").unwrap();
        assert!(!people.supports_ordering(&OrderField::parse("name.first").unwrap()));
    }
}
