//! Header stamped on every persisted catalog document.

use serde::{Deserialize, Serialize};

use crate::repository::RepositoryError;

/// Identifies the table layout a catalog document was written with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaHeader {
    /// Table name, always `meals`
    pub table: String,

    /// Layout revision understood by this build
    pub schema_version: u32,
}

impl SchemaHeader {
    pub const TABLE: &'static str = "meals";
    pub const CURRENT_VERSION: u32 = 1;

    /// Rejects headers this build cannot read.
    pub fn check(&self) -> Result<(), String> {
        if self.table != Self::TABLE {
            return Err(format!(
                "unexpected table '{}', expected '{}'",
                self.table,
                Self::TABLE
            ));
        }
        if self.schema_version != Self::CURRENT_VERSION {
            return Err(format!(
                "unsupported schema version {} (supported: {})",
                self.schema_version,
                Self::CURRENT_VERSION
            ));
        }
        Ok(())
    }

    pub(crate) fn check_stored(&self) -> Result<(), RepositoryError> {
        self.check().map_err(RepositoryError::CorruptedData)
    }
}

impl Default for SchemaHeader {
    fn default() -> Self {
        Self {
            table: Self::TABLE.to_owned(),
            schema_version: Self::CURRENT_VERSION,
        }
    }
}
