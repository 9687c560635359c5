//! PostgreSQL UPSERT (INSERT ... ON CONFLICT DO UPDATE) builder.
//!
//! Values are rendered inline with [`SqlValue::to_sql_inline`]; identifiers
//! are emitted verbatim.

use std::marker::PhantomData;

use super::value::{SqlValue, ToSqlValue};

// Typestate markers

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;
/// Marker: No values specified yet.
pub struct NoValues;
/// Marker: Values have been specified.
pub struct HasValues;
/// Marker: No conflict target specified yet.
pub struct NoConflict;
/// Marker: Conflict target has been specified.
pub struct HasConflict;

/// A typestate UPSERT builder producing one statement with inline literals.
pub struct UpsertBuilder<Table, Values, Conflict> {
    table: Option<String>,
    columns: Vec<String>,
    values: Vec<SqlValue>,
    conflict_columns: Vec<String>,
    update_columns: Vec<String>,
    _state: PhantomData<(Table, Values, Conflict)>,
}

impl UpsertBuilder<NoTable, NoValues, NoConflict> {
    /// Creates a new UPSERT builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: None,
            columns: vec![],
            values: vec![],
            conflict_columns: vec![],
            update_columns: vec![],
            _state: PhantomData,
        }
    }
}

impl Default for UpsertBuilder<NoTable, NoValues, NoConflict> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoTable -> HasTable
impl<Values, Conflict> UpsertBuilder<NoTable, Values, Conflict> {
    /// Specifies the table to insert into.
    #[must_use]
    pub fn into_table(self, table: &str) -> UpsertBuilder<HasTable, Values, Conflict> {
        UpsertBuilder {
            table: Some(String::from(table)),
            columns: self.columns,
            values: self.values,
            conflict_columns: self.conflict_columns,
            update_columns: self.update_columns,
            _state: PhantomData,
        }
    }
}

// Methods available after specifying table
impl<Values, Conflict> UpsertBuilder<HasTable, Values, Conflict> {
    /// Specifies the columns to insert into.
    #[must_use]
    pub fn columns<S: AsRef<str>>(mut self, cols: &[S]) -> Self {
        self.columns = cols.iter().map(|s| String::from(s.as_ref())).collect();
        self
    }
}

// Transition: NoValues -> HasValues
impl<Conflict> UpsertBuilder<HasTable, NoValues, Conflict> {
    /// Sets the row of values, one per column.
    #[must_use]
    pub fn values<T: ToSqlValue>(
        self,
        vals: Vec<T>,
    ) -> UpsertBuilder<HasTable, HasValues, Conflict> {
        let sql_values: Vec<SqlValue> = vals.into_iter().map(ToSqlValue::to_sql_value).collect();
        UpsertBuilder {
            table: self.table,
            columns: self.columns,
            values: sql_values,
            conflict_columns: self.conflict_columns,
            update_columns: self.update_columns,
            _state: PhantomData,
        }
    }
}

// Transition: NoConflict -> HasConflict
impl UpsertBuilder<HasTable, HasValues, NoConflict> {
    /// Specifies the conflict target columns.
    #[must_use]
    pub fn on_conflict<S: AsRef<str>>(
        self,
        cols: &[S],
    ) -> UpsertBuilder<HasTable, HasValues, HasConflict> {
        UpsertBuilder {
            table: self.table,
            columns: self.columns,
            values: self.values,
            conflict_columns: cols.iter().map(|s| String::from(s.as_ref())).collect(),
            update_columns: self.update_columns,
            _state: PhantomData,
        }
    }
}

// Methods available after ON CONFLICT
impl UpsertBuilder<HasTable, HasValues, HasConflict> {
    /// Sets the columns assigned from `EXCLUDED` in `DO UPDATE SET`.
    #[must_use]
    pub fn do_update<S: AsRef<str>>(mut self, cols: &[S]) -> Self {
        self.update_columns = cols.iter().map(|s| String::from(s.as_ref())).collect();
        self
    }

    /// Builds the UPSERT statement, terminated by `;`.
    ///
    /// The `DO UPDATE SET` clause is always emitted, even when no update
    /// columns were given; the statement then ends in `DO UPDATE SET ;`.
    #[must_use]
    pub fn build(self) -> String {
        let mut sql = String::from("INSERT INTO ");

        if let Some(ref table) = self.table {
            sql.push_str(table);
        }

        sql.push_str(" (");
        sql.push_str(&self.columns.join(", "));
        sql.push(')');

        sql.push_str(" VALUES (");
        let literals: Vec<String> = self.values.iter().map(SqlValue::to_sql_inline).collect();
        sql.push_str(&literals.join(", "));
        sql.push(')');

        sql.push_str(" ON CONFLICT (");
        sql.push_str(&self.conflict_columns.join(", "));
        sql.push(')');

        sql.push_str(" DO UPDATE SET ");
        let updates: Vec<String> = self
            .update_columns
            .iter()
            .map(|col| format!("{col} = EXCLUDED.{col}"))
            .collect();
        sql.push_str(&updates.join(", "));
        sql.push(';');

        sql
    }
}
