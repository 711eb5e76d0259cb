use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{InsightError, Result};

/// Identifier of the brand a session is scoped to.
///
/// Always non-blank; construct via [`BrandId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BrandId(String);

impl BrandId {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InsightError::InvalidBrand);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BrandId {
    type Error = InsightError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<BrandId> for String {
    fn from(brand: BrandId) -> Self {
        brand.0
    }
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
