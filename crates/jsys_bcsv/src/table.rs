//! The in-memory table produced and consumed by the codec.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::field::{Column, Value};

/// A decoded BCSV table: column schema plus rows of typed cells.
///
/// Rows store one [`Value`] per column, in column order. The table is a pure
/// value; the codec functions [`crate::from_bytes`] and [`crate::to_bytes`]
/// convert it from and to wire bytes without retaining state.
#[derive(Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build an empty table over a schema, assigning row offsets
    /// sequentially in definition order.
    pub fn new(mut columns: Vec<Column>) -> Self {
        let mut offset = 0u16;
        for column in &mut columns {
            column.offset = offset;
            offset += column.kind.size() as u16;
        }
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build an empty table over a schema whose row offsets are already
    /// laid out, e.g. columns sharing an offset through disjoint masks.
    pub fn with_layout(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from an already laid out schema and rows, as produced
    /// by the reader.
    pub(crate) fn from_parts(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with the given label.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }

    /// Cell at `(row, label)`, if both exist.
    pub fn get(&self, row: usize, label: &str) -> Option<&Value> {
        let index = self.column_index(label)?;
        self.rows.get(row)?.get(index)
    }

    /// Append a row given as one cell per column, in column order.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowWidth {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a row given as a label → value map. Every column must be
    /// present, and no key may fall outside the schema.
    pub fn push_row_map(&mut self, mut map: IndexMap<String, Value>) -> Result<()> {
        let mut row = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let value = map
                .shift_remove(&column.label)
                .ok_or_else(|| Error::UnknownColumn(column.label.clone()))?;
            row.push(value);
        }
        if let Some((label, _)) = map.into_iter().next() {
            return Err(Error::UnknownColumn(label));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Stable-sort rows by the string cell of the given column. Rows where
    /// the cell is not a string keep their relative position at the front.
    pub fn sort_by_string_column(&mut self, label: &str) {
        if let Some(index) = self.column_index(label) {
            self.rows.sort_by(|a, b| {
                let ka = a.get(index).and_then(|v| v.as_str()).unwrap_or("");
                let kb = b.get(index).and_then(|v| v.as_str()).unwrap_or("");
                ka.cmp(kb)
            });
        }
    }
}

#[cfg(test)]
mod test {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::field::{Column, FieldType, Value};
    use crate::table::Table;

    fn schema() -> Vec<Column> {
        vec![
            Column::new("name", FieldType::StringOffset),
            Column::new("id", FieldType::Long),
        ]
    }

    #[test]
    fn offsets_assigned_in_definition_order() {
        let table = Table::new(schema());
        assert_eq!(table.columns()[0].offset, 0);
        assert_eq!(table.columns()[1].offset, 4);
    }

    #[test]
    fn push_row_map_rejects_stray_keys() {
        let mut table = Table::new(schema());
        let mut map = IndexMap::new();
        map.insert("name".to_owned(), Value::String("A".into()));
        map.insert("id".to_owned(), Value::Int(0));
        map.insert("bogus".to_owned(), Value::Int(1));

        assert!(matches!(
            table.push_row_map(map).unwrap_err(),
            Error::UnknownColumn(label) if label == "bogus"
        ));
    }

    #[test]
    fn sort_by_string_column_is_stable() {
        let mut table = Table::new(schema());
        for (name, id) in [("b", 0), ("a", 1), ("b", 2)] {
            table
                .push_row(vec![Value::String(name.into()), Value::Int(id)])
                .unwrap();
        }
        table.sort_by_string_column("name");

        let ids: Vec<i32> = table
            .rows()
            .iter()
            .map(|r| r[1].as_int().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }
}
