use crate::idgen::codes;
use crate::idgen::model::{CodeFormat, CodeType};
use crate::idgen::repository::{FormatRegistry, RecordStore};
use crate::utils::error::CustomError;
use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Sequential card-ID allocator driven by operator-configured code formats.
///
/// Candidates are minted as `{prefix}-{number:05}` and re-checked against the
/// record store until an unused one is found, so pre-existing legacy IDs that
/// collide with the sequence cost one counter slot each instead of failing
/// the allocation.
pub struct IdGenerationService {
    formats: Arc<dyn FormatRegistry>,
    records: Arc<dyn RecordStore>,
    // Per-key counters for the default fallback scheme only.
    fallback_counters: Mutex<HashMap<String, u64>>,
}

impl IdGenerationService {
    pub fn new(formats: Arc<dyn FormatRegistry>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            formats,
            records,
            fallback_counters: Mutex::new(HashMap::new()),
        }
    }

    /// Mint the next card ID for the given entity type.
    pub async fn allocate(&self, code_type: CodeType) -> Result<String, CustomError> {
        let format = match self.formats.find_active_by_type(code_type).await? {
            Some(format) => Some(format),
            None => self.reactivate_existing(code_type).await?,
        };

        match format {
            Some(format) => self.mint_from_format(format).await,
            None if code_type.requires_configuration() => {
                Err(CustomError::ConfigurationMissingError(format!(
                    "{} code format not found. Please configure it in personalization settings",
                    code_type
                )))
            }
            None => {
                warn!("No code format configured for {}, using default scheme", code_type);
                self.allocate_default(code_type).await
            }
        }
    }

    /// True iff no issued record carries the candidate ID.
    pub async fn is_unique(&self, card_id: &str) -> Result<bool, CustomError> {
        Ok(!self.records.exists_by_id(card_id).await?)
    }

    pub fn state_code(&self, state_name: Option<&str>) -> &'static str {
        codes::state_code(state_name)
    }

    pub fn country_code(&self, country_name: Option<&str>) -> &'static str {
        codes::country_code(country_name)
    }

    /// No active format was found; if an inactive one exists it is the one
    /// recoverable misconfiguration, so persist it back to active. A blank
    /// prefix is never repaired here: choosing one would override whatever
    /// numbering scheme the operator intended.
    async fn reactivate_existing(
        &self,
        code_type: CodeType,
    ) -> Result<Option<CodeFormat>, CustomError> {
        let Some(mut format) = self
            .formats
            .find_all_by_type(code_type)
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        if format.prefix.trim().is_empty() {
            return Err(CustomError::ConfigurationMissingError(format!(
                "{} code format prefix is not configured. Please configure it in personalization settings",
                code_type
            )));
        }

        if !format.is_active {
            warn!("{} code format is inactive, reactivating", code_type);
            format.is_active = true;
            format.updated_at = Utc::now();
            self.formats.save(&format).await?;
        }

        Ok(Some(format))
    }

    /// Increment, format, persist, then check the record store; repeat until
    /// the candidate is unused. The counter must not move before the blank
    /// prefix check.
    async fn mint_from_format(&self, mut format: CodeFormat) -> Result<String, CustomError> {
        if format.prefix.trim().is_empty() {
            return Err(CustomError::ConfigurationMissingError(format!(
                "{} code format prefix is not configured. Please configure it in personalization settings",
                format.code_type
            )));
        }

        loop {
            format.current_number += 1;
            let candidate = format!("{}-{:05}", format.prefix, format.current_number);

            format.updated_at = Utc::now();
            self.formats.save(&format).await?;

            if self.is_unique(&candidate).await? {
                info!("Generated {} ID: {}", format.code_type, candidate);
                return Ok(candidate);
            }

            warn!("Card ID {} already exists, retrying with next number", candidate);
        }
    }

    /// Hard-coded fallback scheme: `{prefix}{state}{district}{n:04}` with
    /// placeholder locality codes, still collision-checked against the store.
    async fn allocate_default(&self, code_type: CodeType) -> Result<String, CustomError> {
        let prefix = code_type.default_prefix();
        let key = format!("{}{}{}", prefix, codes::UNKNOWN_CODE, codes::UNKNOWN_CODE);

        loop {
            let next = self.next_fallback_number(&key);
            let candidate = format!("{}{:04}", key, next);

            if self.is_unique(&candidate).await? {
                info!("Generated default {} ID: {}", code_type, candidate);
                return Ok(candidate);
            }
        }
    }

    fn next_fallback_number(&self, key: &str) -> u64 {
        let mut counters = self
            .fallback_counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let counter = counters.entry(key.to_string()).or_insert(1);
        let current = *counter;
        *counter += 1;
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;

    struct InMemoryFormatRegistry {
        formats: Mutex<Vec<CodeFormat>>,
    }

    impl InMemoryFormatRegistry {
        fn new(formats: Vec<CodeFormat>) -> Self {
            Self {
                formats: Mutex::new(formats),
            }
        }

        fn snapshot(&self) -> Vec<CodeFormat> {
            self.formats.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FormatRegistry for InMemoryFormatRegistry {
        async fn find_active_by_type(
            &self,
            code_type: CodeType,
        ) -> Result<Option<CodeFormat>, CustomError> {
            Ok(self
                .formats
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.code_type == code_type && f.is_active)
                .cloned())
        }

        async fn find_all_by_type(
            &self,
            code_type: CodeType,
        ) -> Result<Vec<CodeFormat>, CustomError> {
            Ok(self
                .formats
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.code_type == code_type)
                .cloned()
                .collect())
        }

        async fn save(&self, format: &CodeFormat) -> Result<(), CustomError> {
            let mut formats = self.formats.lock().unwrap();
            match formats
                .iter_mut()
                .find(|f| f.code_type == format.code_type)
            {
                Some(existing) => *existing = format.clone(),
                None => formats.push(format.clone()),
            }
            Ok(())
        }
    }

    struct InMemoryRecordStore {
        ids: Mutex<HashSet<String>>,
    }

    impl InMemoryRecordStore {
        fn new(existing: &[&str]) -> Self {
            Self {
                ids: Mutex::new(existing.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl RecordStore for InMemoryRecordStore {
        async fn exists_by_id(&self, card_id: &str) -> Result<bool, CustomError> {
            Ok(self.ids.lock().unwrap().contains(card_id))
        }
    }

    fn format(code_type: CodeType, prefix: &str, is_active: bool, current: u32) -> CodeFormat {
        CodeFormat {
            id: None,
            code_type,
            prefix: prefix.to_string(),
            is_active,
            current_number: current,
            updated_at: Utc::now(),
        }
    }

    fn service(
        formats: Vec<CodeFormat>,
        existing_ids: &[&str],
    ) -> (
        IdGenerationService,
        Arc<InMemoryFormatRegistry>,
        Arc<InMemoryRecordStore>,
    ) {
        let registry = Arc::new(InMemoryFormatRegistry::new(formats));
        let records = Arc::new(InMemoryRecordStore::new(existing_ids));
        let svc = IdGenerationService::new(registry.clone(), records.clone());
        (svc, registry, records)
    }

    #[actix_web::test]
    async fn allocation_is_sequential() {
        let (svc, registry, _) =
            service(vec![format(CodeType::Farmer, "AGR", true, 0)], &[]);

        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "AGR-00001");
        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "AGR-00002");
        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "AGR-00003");

        assert_eq!(registry.snapshot()[0].current_number, 3);
    }

    #[actix_web::test]
    async fn blank_prefix_fails_without_counter_mutation() {
        let (svc, registry, _) =
            service(vec![format(CodeType::Employee, "   ", true, 7)], &[]);

        let err = svc.allocate(CodeType::Employee).await.unwrap_err();
        assert!(matches!(err, CustomError::ConfigurationMissingError(..)));
        assert_eq!(registry.snapshot()[0].current_number, 7);
    }

    #[actix_web::test]
    async fn inactive_format_is_reactivated_and_still_mints() {
        let (svc, registry, _) =
            service(vec![format(CodeType::Employee, "EMP", false, 0)], &[]);

        assert_eq!(svc.allocate(CodeType::Employee).await.unwrap(), "EMP-00001");

        let saved = registry.snapshot();
        assert!(saved[0].is_active);
        assert_eq!(saved[0].current_number, 1);
    }

    #[actix_web::test]
    async fn collision_skips_to_next_number() {
        let (svc, registry, _) = service(
            vec![format(CodeType::Farmer, "AGR", true, 0)],
            &["AGR-00001"],
        );

        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "AGR-00002");
        // Both attempts were persisted, the colliding one first.
        assert_eq!(registry.snapshot()[0].current_number, 2);
    }

    #[actix_web::test]
    async fn missing_employee_format_is_a_hard_failure() {
        let (svc, _, _) = service(vec![], &[]);

        let err = svc.allocate(CodeType::Employee).await.unwrap_err();
        assert!(matches!(err, CustomError::ConfigurationMissingError(..)));
    }

    #[actix_web::test]
    async fn missing_farmer_format_falls_back_to_default_scheme() {
        let (svc, _, _) = service(vec![], &[]);

        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "FAMXXXX0001");
        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "FAMXXXX0002");
    }

    #[actix_web::test]
    async fn default_scheme_skips_colliding_ids() {
        let (svc, _, _) = service(vec![], &["FAMXXXX0001"]);

        assert_eq!(svc.allocate(CodeType::Farmer).await.unwrap(), "FAMXXXX0002");
    }

    #[actix_web::test]
    async fn is_unique_reflects_record_store() {
        let (svc, _, _) = service(vec![], &["AGR-00001"]);

        assert!(!svc.is_unique("AGR-00001").await.unwrap());
        assert!(svc.is_unique("AGR-99999").await.unwrap());
    }
}
