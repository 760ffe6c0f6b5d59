//! One-off tasks run when the server boots

use crate::api::AppState;

/// Checks the record store once and logs the outcome
///
/// Never fails: the server keeps serving whether or not the store answered.
/// Returns whether the store was reachable.
pub async fn check_database_connection(state: &AppState) -> bool {
    match state.students().ping().await {
        Ok(()) => {
            tracing::info!("Record store connection successful, database is reachable");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Record store connection failed");
            false
        }
    }
}
