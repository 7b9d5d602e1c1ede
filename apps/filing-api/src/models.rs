//! Database row types and their JSON-column accessors.

use serde::de::DeserializeOwned;
use sqlx::FromRow;

use crate::error::ApiError;
use filing_types::{flatten, Authority, Block, DocNode, Exhibit, FilingSettings, Intake, Party};

/// Case row. Intake, parties, exhibits, authorities, and filing settings are
/// JSON columns owned by the case-management layer; the API only reads and
/// (for filing settings) rewrites them whole.
#[derive(Debug, Clone, FromRow)]
pub struct DbCase {
    pub id: String,
    pub intake_json: Option<String>,
    pub parties_json: Option<String>,
    pub exhibits_json: Option<String>,
    pub authorities_json: Option<String>,
    pub filing_json: Option<String>,
    pub signer_name: Option<String>,
    pub signer_title: Option<String>,
    pub signature_image: Option<Vec<u8>>,
}

impl DbCase {
    pub fn intake(&self) -> Result<Intake, ApiError> {
        parse_json(self.intake_json.as_deref())
    }

    pub fn parties(&self) -> Result<Vec<Party>, ApiError> {
        parse_json(self.parties_json.as_deref())
    }

    pub fn exhibits(&self) -> Result<Vec<Exhibit>, ApiError> {
        parse_json(self.exhibits_json.as_deref())
    }

    pub fn authorities(&self) -> Result<Vec<Authority>, ApiError> {
        parse_json(self.authorities_json.as_deref())
    }

    pub fn filing(&self) -> Result<FilingSettings, ApiError> {
        parse_json(self.filing_json.as_deref())
    }
}

/// Draft row: the editor document plus a plain-text fallback.
#[derive(Debug, Clone, FromRow)]
pub struct DbDraft {
    pub id: String,
    pub case_id: String,
    pub title: Option<String>,
    pub content_json: Option<String>,
    pub plain_text: Option<String>,
}

impl DbDraft {
    /// Flattened blocks of the stored editor document, if one exists.
    pub fn blocks(&self) -> Result<Option<Vec<Block>>, ApiError> {
        let Some(raw) = self.content_json.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };
        let doc: DocNode = serde_json::from_str(raw)
            .map_err(|e| ApiError::InvalidRequest(format!("malformed draft content: {}", e)))?;
        Ok(Some(flatten(&doc)))
    }
}

/// A missing or blank JSON column reads as the type's default.
fn parse_json<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T, ApiError> {
    match raw {
        Some(s) if !s.trim().is_empty() => serde_json::from_str(s)
            .map_err(|e| ApiError::InvalidRequest(format!("malformed stored row: {}", e))),
        _ => Ok(T::default()),
    }
}
