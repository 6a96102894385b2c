use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use parking_lot::RwLock;

use crate::errors::{ApplicationError, Error, Unknown};
use crate::host::Target;
use crate::utils::Value;

/// Mock [`Target`] for testing purposes: styles are stored in a map and every write is recorded.
#[derive(Debug, Default)]
pub struct MockTarget {
    styles: RwLock<HashMap<String, Value>>,
    writes: RwLock<Vec<(String, Value)>>,
    /// Properties failing on read.
    unresolvable: HashSet<String>,
    /// Properties failing on write.
    read_only: HashSet<String>,
}

impl MockTarget {
    /// Sets the initial value of a style.
    pub fn with_style<S: Into<String>, V: Into<Value>>(self, property: S, value: V) -> Self {
        self.styles.write().insert(property.into(), value.into());
        self
    }

    /// Makes a property unresolvable (reading it fails).
    pub fn set_unresolvable<S: Into<String>>(mut self, property: S) -> Self {
        self.unresolvable.insert(property.into());
        self
    }

    /// Makes a property read-only (writing it fails).
    pub fn set_read_only<S: Into<String>>(mut self, property: S) -> Self {
        self.read_only.insert(property.into());
        self
    }

    /// Returns the current value of a style.
    pub fn get(&self, property: &str) -> Option<Value> {
        self.styles.read().get(property).cloned()
    }

    /// Returns every write made so far, in order.
    pub fn get_writes(&self) -> Vec<(String, Value)> {
        self.writes.read().clone()
    }

    /// Returns the values written to a property so far, in order.
    pub fn get_writes_of(&self, property: &str) -> Vec<Value> {
        self.writes
            .read()
            .iter()
            .filter(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl Display for MockTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MockTarget [styles={}, writes={}]",
            self.styles.read().len(),
            self.writes.read().len()
        )
    }
}

impl Target for MockTarget {
    fn get_style(&self, property: &str) -> Result<Option<Value>, Error> {
        match self.unresolvable.contains(property) {
            true => Err(Unknown {
                info: format!("unknown property '{}'", property),
            }),
            false => Ok(self.get(property)),
        }
    }

    fn set_style(&self, property: &str, value: &Value) -> Result<(), Error> {
        if self.read_only.contains(property) {
            return Err(ApplicationError {
                property: property.to_string(),
                info: String::from("read-only property"),
            });
        }
        self.styles
            .write()
            .insert(property.to_string(), value.clone());
        self.writes
            .write()
            .push((property.to_string(), value.clone()));
        Ok(())
    }
}
