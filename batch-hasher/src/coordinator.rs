use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::Error;
use crate::hasher::{BatchHasher, Executable};
use crate::partition::partition;
use crate::primitive::HashPrimitive;

/// Batch count used when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Fans a password list out over parallel batch hashers and merges the results.
pub struct Coordinator<P: ?Sized> {
    primitive: Arc<P>,
    salt: Arc<[u8]>,
    degree: usize,
    progress: Option<Arc<AtomicU64>>,
}

impl<P: HashPrimitive + ?Sized> Coordinator<P> {
    pub fn new(primitive: Arc<P>, salt: impl AsRef<[u8]>, degree: usize) -> Self {
        Self {
            primitive,
            salt: Arc::from(salt.as_ref()),
            degree,
            progress: None,
        }
    }

    /// Shares `progress` with every batch; it is incremented once per hashed password.
    pub fn with_progress(mut self, progress: Arc<AtomicU64>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Hashes every password and returns a single password to digest mapping.
    ///
    /// Batches run on Tokio's blocking pool, one OS thread each. Partial results
    /// are merged in dispatch order once every batch has finished, so if the same
    /// password lands in more than one batch the later batch's digest is kept.
    /// Any failed batch fails the whole call.
    pub async fn generate_all_hashes(
        &self,
        passwords: &[String],
    ) -> Result<HashMap<String, String>, Error> {
        let hashers = self.hash_batches(passwords).await?;
        Ok(merge(hashers.into_iter().map(BatchHasher::into_password_to_hashes)))
    }

    /// Runs one hasher per batch and returns them, completed, in dispatch order.
    pub async fn hash_batches(&self, passwords: &[String]) -> Result<Vec<BatchHasher<P>>, Error> {
        let runtime = Handle::try_current().map_err(|e| Error::Dispatch(e.to_string()))?;
        let batches = partition(passwords.len(), self.degree);

        tracing::debug!(
            passwords = passwords.len(),
            batches = batches.len(),
            "Dispatching batch hashers"
        );

        // Each task takes its hasher and hands it back on completion, so the
        // handles are the only owners of the partial results until they are joined.
        let mut handles = Vec::with_capacity(batches.len());
        for (index, range) in batches.into_iter().enumerate() {
            let mut hasher = BatchHasher::new(
                index,
                &passwords[range],
                Arc::clone(&self.salt),
                Arc::clone(&self.primitive),
            );
            if let Some(progress) = &self.progress {
                hasher = hasher.with_progress(Arc::clone(progress));
            }
            handles.push(runtime.spawn_blocking(move || -> Result<BatchHasher<P>, Error> {
                hasher.execute()?;
                Ok(hasher)
            }));
        }

        wait_for_batches(handles).await
    }
}

/// Waits on every handle in dispatch order.
///
/// All batches are awaited even after a failure so none is left running
/// unobserved; the first error encountered is returned.
async fn wait_for_batches<T>(
    handles: Vec<JoinHandle<Result<T, Error>>>,
) -> Result<Vec<T>, Error> {
    let mut completed = Vec::with_capacity(handles.len());
    let mut first_error: Option<Error> = None;

    for (batch, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(result)) => completed.push(result),
            Ok(Err(e)) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
            Err(e) => {
                if first_error.is_none() {
                    let reason = if e.is_panic() {
                        "task panicked".to_string()
                    } else {
                        e.to_string()
                    };
                    first_error = Some(Error::Interrupted { batch, reason });
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(completed),
    }
}

/// Merges partial mappings in iteration order; later entries overwrite earlier ones.
pub fn merge<I>(partials: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = HashMap<String, String>>,
{
    let mut password_to_hashes = HashMap::new();
    for partial in partials {
        password_to_hashes.extend(partial);
    }
    password_to_hashes
}
