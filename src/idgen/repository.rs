use crate::idgen::model::{CodeFormat, CodeType, IdCard};
use crate::utils::error::CustomError;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

/// Backing store of operator-configured numbering schemes.
#[async_trait]
pub trait FormatRegistry: Send + Sync {
    async fn find_active_by_type(
        &self,
        code_type: CodeType,
    ) -> Result<Option<CodeFormat>, CustomError>;

    async fn find_all_by_type(&self, code_type: CodeType) -> Result<Vec<CodeFormat>, CustomError>;

    async fn save(&self, format: &CodeFormat) -> Result<(), CustomError>;
}

/// Backing store of issued card records, consulted for collisions.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn exists_by_id(&self, card_id: &str) -> Result<bool, CustomError>;
}

pub struct MongoFormatRegistry {
    collection: Collection<CodeFormat>,
}

impl MongoFormatRegistry {
    pub fn new(client: &Client) -> Self {
        let db = client.database("farm_registry");
        Self {
            collection: db.collection::<CodeFormat>("code_formats"),
        }
    }
}

#[async_trait]
impl FormatRegistry for MongoFormatRegistry {
    async fn find_active_by_type(
        &self,
        code_type: CodeType,
    ) -> Result<Option<CodeFormat>, CustomError> {
        self.collection
            .find_one(doc! { "code_type": code_type.as_str(), "is_active": true })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))
    }

    async fn find_all_by_type(&self, code_type: CodeType) -> Result<Vec<CodeFormat>, CustomError> {
        let mut cursor = self
            .collection
            .find(doc! { "code_type": code_type.as_str() })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        let mut formats = Vec::new();
        while let Some(format) = cursor
            .try_next()
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?
        {
            formats.push(format);
        }

        Ok(formats)
    }

    async fn save(&self, format: &CodeFormat) -> Result<(), CustomError> {
        match format.id {
            Some(id) => {
                self.collection
                    .replace_one(doc! { "_id": id }, format)
                    .await
                    .map_err(|e| CustomError::InternalServerError(e.to_string()))?;
            }
            None => {
                self.collection
                    .insert_one(format)
                    .await
                    .map_err(|e| CustomError::InternalServerError(e.to_string()))?;
            }
        }
        Ok(())
    }
}

pub struct MongoRecordStore {
    collection: Collection<IdCard>,
}

impl MongoRecordStore {
    pub fn new(client: &Client) -> Self {
        let db = client.database("farm_registry");
        Self {
            collection: db.collection::<IdCard>("id_cards"),
        }
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn exists_by_id(&self, card_id: &str) -> Result<bool, CustomError> {
        let count = self
            .collection
            .count_documents(doc! { "card_id": card_id })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;
        Ok(count > 0)
    }
}
