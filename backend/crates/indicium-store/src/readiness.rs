//! Readiness checks shared by `Client`, `Database` and `Table`.

use crate::error::{IndiciumError, Result};
use indicium_commons::{Lifecycle, LifecycleState};
use std::fmt::Display;
use std::future::Future;

/// Fail with `NotReady` unless the handle has finished loading.
pub(crate) fn ensure_ready(lifecycle: &Lifecycle, subject: impl Display) -> Result<()> {
    if lifecycle.is_ready() {
        Ok(())
    } else {
        Err(IndiciumError::NotReady(subject.to_string()))
    }
}

/// Drive a handle through `Uninitialized → Loading → Ready`.
///
/// `load` runs while the handle is `Loading`. If it fails the handle goes back to
/// `Uninitialized` and the error is returned unchanged.
pub(crate) async fn run_load<F>(lifecycle: &Lifecycle, subject: impl Display, load: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    lifecycle.begin_loading().map_err(|state| match state {
        LifecycleState::Uninitialized => IndiciumError::NotReady(subject.to_string()),
        LifecycleState::Loading | LifecycleState::Ready => {
            IndiciumError::AlreadyInitialized(subject.to_string())
        }
    })?;

    if let Err(e) = load.await {
        lifecycle.abort_loading();
        return Err(e);
    }

    lifecycle
        .finish_loading()
        .map_err(|_| IndiciumError::AlreadyInitialized(subject.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_load_marks_ready() {
        let lifecycle = Lifecycle::new();
        assert!(ensure_ready(&lifecycle, "Table 't'").unwrap_err().is_not_ready());

        run_load(&lifecycle, "Table 't'", async { Ok(()) }).await.unwrap();
        assert!(ensure_ready(&lifecycle, "Table 't'").is_ok());

        let again = run_load(&lifecycle, "Table 't'", async { Ok(()) }).await;
        assert!(matches!(again, Err(IndiciumError::AlreadyInitialized(_))));
    }

    #[tokio::test]
    async fn test_failed_load_resets_state() {
        let lifecycle = Lifecycle::new();
        let result = run_load(&lifecycle, "Table 't'", async {
            Err(IndiciumError::TableMissing("/nowhere".into()))
        })
        .await;

        assert!(matches!(result, Err(IndiciumError::TableMissing(_))));
        assert_eq!(lifecycle.state(), LifecycleState::Uninitialized);
    }
}
