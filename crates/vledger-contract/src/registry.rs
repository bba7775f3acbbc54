use std::collections::HashMap;

use crate::error::RegistryError;
use crate::operation::Operation;
use crate::operations;

/// Immutable table from operation name to operation.
///
/// Built once, then shared read-only (typically behind an `Arc`) by any
/// number of dispatchers and threads.
pub struct OperationRegistry {
    operations: HashMap<&'static str, Box<dyn Operation>>,
}

impl OperationRegistry {
    /// Start building a registry with no operations.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding every built-in ledger operation.
    pub fn standard() -> Self {
        Self {
            operations: operations::all()
                .into_iter()
                .map(|op| (op.name(), op))
                .collect(),
        }
    }

    /// Look up an operation by name.
    pub fn get(&self, name: &str) -> Option<&dyn Operation> {
        self.operations.get(name).map(|op| op.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.operations.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.names())
            .finish()
    }
}

/// Builder for an [`OperationRegistry`]; rejects duplicate names.
#[derive(Default)]
pub struct RegistryBuilder {
    operations: HashMap<&'static str, Box<dyn Operation>>,
}

impl RegistryBuilder {
    /// Add an operation under its own name.
    pub fn register(mut self, operation: impl Operation + 'static) -> Result<Self, RegistryError> {
        let name = operation.name();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.operations.contains_key(name) {
            return Err(RegistryError::DuplicateOperation(name.to_owned()));
        }
        self.operations.insert(name, Box::new(operation));
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> OperationRegistry {
        OperationRegistry {
            operations: self.operations,
        }
    }
}
