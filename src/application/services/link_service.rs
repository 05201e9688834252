//! Link creation, resolution and management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{GENERATED_CODE_LENGTH, generate_code, is_valid_code};
use crate::utils::url_normalizer::{is_valid_url, normalize_url};

/// Attempt budget for random code assignment. Exhausting it means the code
/// space at this length is effectively saturated and is surfaced as a
/// retriable server error rather than a crash.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service that assigns short codes to target URLs and resolves them back.
///
/// Handles URL normalization, code validation and the collision-retry loop
/// for generated codes. All persistence goes through the
/// [`LinkRepository`] trait; the store's atomic deleted-aware upsert is the
/// final arbiter of code uniqueness, the service's lookups are early exits.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are composed from, e.g.
    /// `https://snpl.ink`.
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Creates a short link for `raw_url`, honoring a caller-supplied code
    /// when present.
    ///
    /// The URL is normalized (scheme prepended if missing) and validated
    /// before any store access.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] when the normalized URL is not http(s)
    /// - [`AppError::InvalidCode`] when a supplied code fails the shape rule
    /// - [`AppError::CodeConflict`] when a supplied code is already active
    /// - [`AppError::CodeSpaceExhausted`] when generation keeps colliding
    pub async fn create_link(
        &self,
        raw_url: &str,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = normalize_url(raw_url);

        if !is_valid_url(&target_url) {
            return Err(AppError::invalid_url(
                "Invalid URL format",
                json!({ "url": raw_url }),
            ));
        }

        let link = match custom_code {
            Some(code) => self.assign_custom_code(&code, &target_url).await?,
            None => self.assign_generated_code(&target_url).await?,
        };

        tracing::info!(code = %link.code, "Short link created");
        Ok(link)
    }

    /// Resolves a code to its target URL, counting the click.
    ///
    /// The click increment is a single atomic store update; concurrent
    /// redirects never lose a count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code is absent or the link is
    /// soft-deleted; no store mutation happens in that case.
    pub async fn resolve_link(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .filter(|l| l.is_active())
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        if !self.repository.increment_clicks(code).await? {
            // The link was deleted between the lookup and the increment.
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        Ok(link.target_url)
    }

    /// All active links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list_active().await
    }

    /// Soft-deletes a link, freeing its code for reuse.
    ///
    /// Deleting an already-deleted link is a no-op success; only a code that
    /// never existed yields [`AppError::NotFound`].
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.mark_deleted(code).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        tracing::info!(code, "Short link deleted");
        Ok(())
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Store liveness, for the health endpoint.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn assign_custom_code(&self, code: &str, target_url: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::invalid_code(
                "Code must be 6-8 alphanumeric characters",
                json!({ "code": code }),
            ));
        }

        if let Some(existing) = self.repository.find_by_code(code).await?
            && existing.is_active()
        {
            return Err(AppError::code_conflict(
                "Code already exists",
                json!({ "code": code }),
            ));
        }

        // The lookup above is only an early exit; another writer may still
        // claim the code before our upsert lands.
        match self.repository.upsert(code, target_url).await? {
            Some(link) => Ok(link),
            None => Err(AppError::code_conflict(
                "Code already exists",
                json!({ "code": code }),
            )),
        }
    }

    async fn assign_generated_code(&self, target_url: &str) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code(GENERATED_CODE_LENGTH);

            if let Some(existing) = self.repository.find_by_code(&code).await?
                && existing.is_active()
            {
                tracing::debug!(attempt, code = %code, "Generated code is taken, retrying");
                continue;
            }

            if let Some(link) = self.repository.upsert(&code, target_url).await? {
                return Ok(link);
            }

            // A concurrent writer won the race on this candidate; the
            // attempt is spent, generate a new one.
            tracing::debug!(attempt, code = %code, "Lost upsert race, retrying");
        }

        Err(AppError::code_space_exhausted(
            "Failed to generate a unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}
