use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::graph::EntityKind;

/// A generated record addressable by its id.
pub trait Record {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// Append-only collection of records of one kind, kept in creation order.
///
/// Serializes as a JSON object keyed by record id, entries in insertion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    rows: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; ids must be unique within the table.
    pub fn insert(&mut self, row: T) -> Result<()> {
        if self.positions.contains_key(row.id()) {
            return Err(Error::DuplicateId {
                kind: T::KIND,
                id: row.id().to_string(),
            });
        }
        self.positions.insert(row.id().to_string(), self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.positions
            .get(id)
            .and_then(|position| self.rows.get(*position))
    }

    /// Mutable access for the documented back-fill steps.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let position = *self.positions.get(id)?;
        self.rows.get_mut(position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Record at `index % len`, or `None` for an empty table.
    pub fn round_robin(&self, index: u64) -> Option<&T> {
        if self.rows.is_empty() {
            return None;
        }
        self.rows.get((index % self.rows.len() as u64) as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.rows.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(T::id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, T: Record> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Record + Serialize> Serialize for Table<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(row.id(), row)?;
        }
        map.end()
    }
}

impl<'de, T: Record + DeserializeOwned> Deserialize<'de> for Table<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

struct TableVisitor<T>(PhantomData<T>);

impl<'de, T: Record + DeserializeOwned> Visitor<'de> for TableVisitor<T> {
    type Value = Table<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of {} records keyed by id", T::KIND)
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut table = Table::new();
        while let Some((key, row)) = access.next_entry::<String, T>()? {
            if key != row.id() {
                return Err(de::Error::custom(format!(
                    "{}: key '{key}' does not match record id '{}'",
                    T::KIND,
                    row.id()
                )));
            }
            table.insert(row).map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Department;

    fn department(id: &str) -> Department {
        Department {
            department_id: id.to_string(),
            name: "Ops Department".to_string(),
            head_id: None,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut table = Table::new();
        table.insert(department("dept_001")).expect("first insert");
        let err = table.insert(department("dept_001")).expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateId { kind: EntityKind::Department, .. }));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut table = Table::new();
        table.insert(department("dept_002")).expect("insert");
        table.insert(department("dept_001")).expect("insert");
        let json = serde_json::to_string(&table).expect("serialize table");
        let first = json.find("dept_002").expect("dept_002 present");
        let second = json.find("dept_001").expect("dept_001 present");
        assert!(first < second);
    }

    #[test]
    fn round_robin_handles_empty_tables() {
        let mut table: Table<Department> = Table::new();
        assert!(table.round_robin(3).is_none());
        table.insert(department("dept_001")).expect("insert");
        table.insert(department("dept_002")).expect("insert");
        assert_eq!(table.round_robin(3).map(Record::id), Some("dept_002"));
    }

    #[test]
    fn rejects_mismatched_keys() {
        let json = r#"{"dept_009": {"department_id": "dept_001", "name": "x", "head_id": null}}"#;
        let result: std::result::Result<Table<Department>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
