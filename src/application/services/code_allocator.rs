//! Collision-safe short-code allocation.

use metrics::counter;
use tracing::{debug, warn};

use crate::domain::entities::{Link, LinkDraft};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Allocates unique short codes within a domain scope.
///
/// Reservation and link creation are one operation: every attempt is a
/// conditional insert of the full link row, keyed on `(domain_id, code)`.
/// A lost race shows up as [`AppError::CodeConflict`] from the repository
/// and, for generated codes, is retried with a fresh random candidate.
pub struct CodeAllocator {
    code_length: usize,
    max_attempts: u32,
}

impl CodeAllocator {
    pub fn new(code_length: usize, max_attempts: u32) -> Self {
        Self {
            code_length,
            max_attempts,
        }
    }

    /// Inserts the draft under a unique code and returns the created link.
    ///
    /// With `custom_code` set the code is validated and tried exactly once;
    /// an explicit request is never silently substituted with a different
    /// code. Without one, fresh random candidates are tried up to the
    /// configured attempt budget.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an invalid custom code
    /// - [`AppError::CodeConflict`] when an explicit code is already taken
    /// - [`AppError::AllocationExhausted`] when every random candidate
    ///   collided — an operational signal to raise the code length
    pub async fn allocate<R>(
        &self,
        repo: &R,
        mut draft: LinkDraft,
        custom_code: Option<String>,
    ) -> Result<Link, AppError>
    where
        R: LinkRepository + ?Sized,
    {
        if let Some(code) = custom_code {
            validate_custom_code(&code)?;
            draft.code = code;
            return repo.insert(draft).await;
        }

        for attempt in 1..=self.max_attempts {
            draft.code = generate_code(self.code_length);

            match repo.insert(draft.clone()).await {
                Ok(link) => {
                    debug!(code = %link.code, attempt, "allocated short code");
                    return Ok(link);
                }
                Err(AppError::CodeConflict { code, domain_id }) => {
                    counter!("linkgate_allocation_retries_total").increment(1);
                    warn!(%code, ?domain_id, attempt, "generated code collided, retrying");
                }
                Err(other) => return Err(other),
            }
        }

        counter!("linkgate_allocation_exhausted_total").increment(1);
        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}
