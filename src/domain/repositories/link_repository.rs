//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for short links.
///
/// The store, not the caller, is the final arbiter of code uniqueness:
/// [`LinkRepository::upsert`] must atomically refuse to overwrite an active
/// row. Callers treat a refused upsert as a collision (conflict for custom
/// codes, one consumed attempt for generated ones).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its code, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Assigns `code` to `target_url`.
    ///
    /// Inserts a new row, or overwrites a soft-deleted row in place. Either
    /// way the stored link comes back with `deleted = false`,
    /// `total_clicks = 0`, `last_clicked = NULL` and a fresh `created_at`.
    ///
    /// Returns `Ok(None)` when an active row already holds the code; the
    /// check and the write are a single atomic store operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn upsert(&self, code: &str, target_url: &str) -> Result<Option<Link>, AppError>;

    /// Atomically bumps `total_clicks` by one and touches `last_clicked` on
    /// the active link with this code.
    ///
    /// Returns `Ok(false)` when no active link matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Marks the link deleted. A no-op on an already-deleted row.
    ///
    /// Returns `Ok(false)` only when the code never existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn mark_deleted(&self, code: &str) -> Result<bool, AppError>;

    /// Lists all active links, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_active(&self) -> Result<Vec<Link>, AppError>;

    /// Store liveness probe, used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
