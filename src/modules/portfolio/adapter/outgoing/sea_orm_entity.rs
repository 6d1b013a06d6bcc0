use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::portfolio::application::ports::outgoing::DocumentStoreError;
use crate::portfolio::domain::document::PortfolioDocument;

/// The one-row table holding the shared portfolio document. The row is
/// addressed by the fixed key, its payload is the whole JSON document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub data: JsonValue,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<PortfolioDocument, DocumentStoreError> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| DocumentStoreError::MalformedDocument(e.to_string()))
    }

    pub fn from_domain(key: &str, document: &PortfolioDocument) -> Self {
        Self {
            key: key.to_string(),
            // Serializing our own serde types cannot fail.
            data: serde_json::to_value(document).unwrap_or(JsonValue::Null),
            updated_at: chrono::Utc::now().into(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
