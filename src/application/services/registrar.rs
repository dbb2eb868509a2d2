//! Short code registration service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};
use crate::utils::alias_validator::{InvalidAlias, ensure_not_reserved, is_reserved, validate_alias};
use crate::utils::code_generator::{CODE_LENGTH, CodeGenerator, RandomCodeGenerator};

/// Attempts made to place a generated code before giving up.
pub const MAX_RETRIES: usize = 5;

/// Reasons a registration fails.
///
/// The first three are caused by the request and can be shown to the user
/// as is. The last two mean the service is degraded.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Invalid URL format provided. Must start with http:// or https://.")]
    InvalidUrl,

    #[error(transparent)]
    InvalidAlias(#[from] InvalidAlias),

    #[error("Custom shortCode already exists. Please choose a different one.")]
    AliasTaken,

    #[error("Failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Checks the creation-time rule for target URLs.
///
/// The URL is otherwise opaque: no parsing and no canonicalization.
pub fn validate_target_url(target_url: &str) -> Result<(), RegisterError> {
    if target_url.starts_with("http://") || target_url.starts_with("https://") {
        Ok(())
    } else {
        Err(RegisterError::InvalidUrl)
    }
}

/// Service assigning short codes to target URLs.
///
/// All mutual exclusion is delegated to [`MappingStore::put_if_absent`];
/// the registrar holds no locks and shares no state between calls, so any
/// number of instances may run against the same store.
pub struct Registrar {
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
    code_length: usize,
}

impl Registrar {
    /// Creates a registrar drawing codes from the OS random source.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self::with_generator(store, Arc::new(RandomCodeGenerator))
    }

    /// Creates a registrar with a custom code source.
    pub fn with_generator(store: Arc<dyn MappingStore>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            store,
            generator,
            max_attempts: MAX_RETRIES,
            code_length: CODE_LENGTH,
        }
    }

    /// Registers `target_url` under a custom alias or a generated code.
    ///
    /// # Custom alias
    ///
    /// The alias is validated, checked with a point lookup, then written with
    /// a single conditional create. A lost race is reported as
    /// [`RegisterError::AliasTaken`]; the alias is never swapped for another
    /// code.
    ///
    /// # Generated code
    ///
    /// Up to [`MAX_RETRIES`] candidates are tried, one conditional create
    /// each. Collisions and store failures both consume an attempt.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::InvalidUrl`] if the URL lacks an `http://`/`https://` prefix
    /// - [`RegisterError::InvalidAlias`] if the alias breaks the alias grammar
    ///   or names a static route
    /// - [`RegisterError::AliasTaken`] if the alias is already registered
    /// - [`RegisterError::GenerationExhausted`] if every attempt collided
    /// - [`RegisterError::StoreUnavailable`] if the store failed (on the last
    ///   attempt, for generated codes)
    pub async fn register(
        &self,
        target_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<Mapping, RegisterError> {
        validate_target_url(target_url)?;

        match custom_alias {
            Some(alias) => self.register_alias(target_url, alias).await,
            None => self.register_generated(target_url).await,
        }
    }

    async fn register_alias(&self, target_url: &str, alias: &str) -> Result<Mapping, RegisterError> {
        validate_alias(alias)?;
        ensure_not_reserved(alias)?;

        // Fast path only; the conditional write below decides.
        if self
            .store
            .get(alias)
            .await
            .map_err(RegisterError::StoreUnavailable)?
            .is_some()
        {
            debug!("Custom alias '{}' already registered", alias);
            record_outcome("alias_taken");
            return Err(RegisterError::AliasTaken);
        }

        let mapping = Mapping::now(alias, target_url);
        match self
            .store
            .put_if_absent(mapping.clone())
            .await
            .map_err(RegisterError::StoreUnavailable)?
        {
            PutOutcome::Created => {
                info!("Registered custom alias '{}' -> {}", alias, target_url);
                record_outcome("created");
                Ok(mapping)
            }
            PutOutcome::ConditionFailed => {
                warn!("Custom alias '{}' claimed concurrently", alias);
                record_outcome("alias_taken");
                Err(RegisterError::AliasTaken)
            }
        }
    }

    async fn register_generated(&self, target_url: &str) -> Result<Mapping, RegisterError> {
        let mut last_store_error = None;

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate(self.code_length);
            debug!("Attempt {}: generated code {}", attempt, code);

            if is_reserved(&code) {
                debug!("Generated code '{}' is reserved, drawing again", code);
                last_store_error = None;
                continue;
            }

            let mapping = Mapping::now(code, target_url);
            match self.store.put_if_absent(mapping.clone()).await {
                Ok(PutOutcome::Created) => {
                    info!("Registered code '{}' -> {}", mapping.code, target_url);
                    record_outcome("created");
                    return Ok(mapping);
                }
                Ok(PutOutcome::ConditionFailed) => {
                    warn!("Collision on code '{}' (attempt {})", mapping.code, attempt);
                    metrics::counter!("registrar_code_collisions_total").increment(1);
                    last_store_error = None;
                }
                Err(e) => {
                    warn!("Store error on attempt {}: {}", attempt, e);
                    last_store_error = Some(e);
                }
            }
        }

        match last_store_error {
            Some(e) => {
                record_outcome("store_unavailable");
                Err(RegisterError::StoreUnavailable(e))
            }
            None => {
                record_outcome("exhausted");
                Err(RegisterError::GenerationExhausted {
                    attempts: self.max_attempts,
                })
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("registrar_registrations_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingStore;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out a fixed list of codes in order.
    struct ScriptedGenerator(Mutex<VecDeque<&'static str>>);

    impl ScriptedGenerator {
        fn new(codes: &[&'static str]) -> Arc<Self> {
            Arc::new(Self(Mutex::new(codes.iter().copied().collect())))
        }
    }

    impl CodeGenerator for ScriptedGenerator {
        fn generate(&self, _length: usize) -> String {
            self.0.lock().unwrap().pop_front().unwrap().to_string()
        }
    }

    fn store_error() -> StoreError {
        StoreError::Connection("connection reset".to_string())
    }

    #[tokio::test]
    async fn test_register_generated_success() {
        let mut store = MockMappingStore::new();
        store
            .expect_put_if_absent()
            .withf(|m| m.code.len() == CODE_LENGTH && m.target_url == "https://example.com/a/b")
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));
        store.expect_get().times(0);

        let registrar = Registrar::new(Arc::new(store));
        let mapping = registrar
            .register("https://example.com/a/b", None)
            .await
            .unwrap();

        assert_eq!(mapping.code.len(), 7);
        assert!(
            mapping
                .code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(mapping.target_url, "https://example.com/a/b");
    }

    #[tokio::test]
    async fn test_register_http_scheme_accepted() {
        let mut store = MockMappingStore::new();
        store
            .expect_put_if_absent()
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));

        let registrar = Registrar::new(Arc::new(store));
        assert!(registrar.register("http://example.com", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_invalid_url() {
        let registrar = Registrar::new(Arc::new(MockMappingStore::new()));

        for url in ["ftp://bad", "", "example.com", "httpx://a", "HTTP://upper.com", "http:/x"] {
            let err = registrar.register(url, None).await.unwrap_err();
            assert!(matches!(err, RegisterError::InvalidUrl), "{url}");
        }
    }

    #[tokio::test]
    async fn test_register_invalid_url_checked_before_alias() {
        let registrar = Registrar::new(Arc::new(MockMappingStore::new()));

        let err = registrar
            .register("ftp://bad", Some("bad alias"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::InvalidUrl));
    }

    #[tokio::test]
    async fn test_register_reserved_alias_rejected() {
        let mut store = MockMappingStore::new();
        store.expect_get().times(0);
        store.expect_put_if_absent().times(0);

        let registrar = Registrar::new(Arc::new(store));

        for alias in ["health", "shorten", "api"] {
            let err = registrar
                .register("https://example.com", Some(alias))
                .await
                .unwrap_err();
            assert!(
                matches!(err, RegisterError::InvalidAlias(InvalidAlias::Reserved(ref a)) if a == alias),
                "{alias}"
            );
        }
    }

    #[tokio::test]
    async fn test_register_skips_reserved_generated_code() {
        let mut store = MockMappingStore::new();
        store
            .expect_put_if_absent()
            .withf(|m| m.code == "fresh01")
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));

        let registrar = Registrar::with_generator(
            Arc::new(store),
            ScriptedGenerator::new(&["shorten", "fresh01"]),
        );

        let mapping = registrar
            .register("https://example.com", None)
            .await
            .unwrap();
        assert_eq!(mapping.code, "fresh01");
    }

    #[tokio::test]
    async fn test_register_retries_on_collision() {
        let mut store = MockMappingStore::new();
        store
            .expect_put_if_absent()
            .withf(|m| m.code == "taken01" || m.code == "taken02")
            .times(2)
            .returning(|_| Ok(PutOutcome::ConditionFailed));
        store
            .expect_put_if_absent()
            .withf(|m| m.code == "fresh03")
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));

        let registrar = Registrar::with_generator(
            Arc::new(store),
            ScriptedGenerator::new(&["taken01", "taken02", "fresh03"]),
        );

        let mapping = registrar
            .register("https://example.com", None)
            .await
            .unwrap();
        assert_eq!(mapping.code, "fresh03");
    }

    #[tokio::test]
    async fn test_register_exhausted_after_exactly_max_retries() {
        let mut store = MockMappingStore::new();
        store
            .expect_put_if_absent()
            .times(MAX_RETRIES)
            .returning(|_| Ok(PutOutcome::ConditionFailed));

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegisterError::GenerationExhausted { attempts: 5 }
        ));
    }

    #[tokio::test]
    async fn test_register_store_errors_count_against_bound() {
        let mut store = MockMappingStore::new();
        store
            .expect_put_if_absent()
            .times(MAX_RETRIES)
            .returning(|_| Err(store_error()));

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_register_recovers_from_transient_store_error() {
        let mut store = MockMappingStore::new();
        let mut calls = 0;
        store
            .expect_put_if_absent()
            .times(3)
            .returning(move |_| {
                calls += 1;
                if calls < 3 {
                    Err(store_error())
                } else {
                    Ok(PutOutcome::Created)
                }
            });

        let registrar = Registrar::new(Arc::new(store));
        assert!(registrar.register("https://example.com", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_exhausted_when_last_attempt_collides() {
        let mut store = MockMappingStore::new();
        let mut calls = 0;
        store
            .expect_put_if_absent()
            .times(MAX_RETRIES)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(store_error())
                } else {
                    Ok(PutOutcome::ConditionFailed)
                }
            });

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::GenerationExhausted { .. }));
    }

    #[tokio::test]
    async fn test_register_custom_alias_success() {
        let mut store = MockMappingStore::new();
        store
            .expect_get()
            .withf(|code| code == "my-link!")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .withf(|m| m.code == "my-link!" && m.target_url == "https://x.com")
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));

        let registrar = Registrar::new(Arc::new(store));
        let mapping = registrar
            .register("https://x.com", Some("my-link!"))
            .await
            .unwrap();

        assert_eq!(mapping.code, "my-link!");
    }

    #[tokio::test]
    async fn test_register_custom_alias_invalid() {
        let mut store = MockMappingStore::new();
        store.expect_get().times(0);
        store.expect_put_if_absent().times(0);

        let registrar = Registrar::new(Arc::new(store));

        for alias in ["", "has space", "elevenchars", "slash/no"] {
            let err = registrar
                .register("https://x.com", Some(alias))
                .await
                .unwrap_err();
            assert!(matches!(err, RegisterError::InvalidAlias(_)), "{alias:?}");
        }
    }

    #[tokio::test]
    async fn test_register_custom_alias_taken_by_lookup() {
        let mut store = MockMappingStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|code| Ok(Some(Mapping::now(code, "https://other.com"))));
        store.expect_put_if_absent().times(0);

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://y.com", Some("my-link!"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::AliasTaken));
    }

    #[tokio::test]
    async fn test_register_custom_alias_lost_race_is_not_retried() {
        let mut store = MockMappingStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .times(1)
            .returning(|_| Ok(PutOutcome::ConditionFailed));

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://y.com", Some("my-link!"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::AliasTaken));
    }

    #[tokio::test]
    async fn test_register_custom_alias_store_error_on_lookup() {
        let mut store = MockMappingStore::new();
        store.expect_get().times(1).returning(|_| Err(store_error()));
        store.expect_put_if_absent().times(0);

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://y.com", Some("promo"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_register_custom_alias_store_error_on_write() {
        let mut store = MockMappingStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .times(1)
            .returning(|_| Err(store_error()));

        let registrar = Registrar::new(Arc::new(store));
        let err = registrar
            .register("https://y.com", Some("promo"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::StoreUnavailable(_)));
    }

    #[test]
    fn test_user_facing_messages() {
        assert!(RegisterError::InvalidUrl.to_string().contains("http"));
        assert!(RegisterError::AliasTaken.to_string().contains("already exists"));
        assert_eq!(
            RegisterError::from(InvalidAlias::Empty).to_string(),
            InvalidAlias::Empty.to_string()
        );
    }
}
