//! Search task state machine implementation.
//!
//! This module provides functions for managing the lifecycle of a
//! [`SearchTask`], including state transitions and event emission. The
//! orchestrator is the only writer; UI consumers read snapshots.

use chrono::Utc;
use sky_protocol::ipc::Event;
use sky_protocol::task_models::{SearchTask, TaskStatus};
use tokio::sync::mpsc::Sender;

/// Reset a task to its Idle defaults.
pub fn clear_task(task: &mut SearchTask) {
    *task = SearchTask::default();
}

/// Transition to Submitting and stamp the submission time.
///
/// Called immediately before the submission round-trip so the global
/// timeout is measured from here.
pub fn begin_submission(task: &mut SearchTask) {
    clear_task(task);
    task.status = TaskStatus::Submitting;
    task.started_at = Some(Utc::now());
}

/// Record a successful submission: store the backend's task id,
/// transition to Pending and emit events.
pub async fn accept_submission(task: &mut SearchTask, events_tx: &Sender<Event>, task_id: String) {
    task.task_id = Some(task_id.clone());
    task.status = TaskStatus::Pending;
    let _ = events_tx.send(Event::TaskSubmitted { task_id }).await;
    emit_status_update(task, events_tx).await;
}

/// Record an in-flight poll observation.
///
/// The message is replaced wholesale; progress is stored as reported,
/// without asserting monotonicity.
pub async fn record_progress(
    task: &mut SearchTask,
    events_tx: &Sender<Event>,
    status: TaskStatus,
    progress: Option<u8>,
    message: Option<String>,
) {
    task.status = status;
    if let Some(progress) = progress {
        task.progress = progress.min(100);
    }
    task.message = message.unwrap_or_default();
    emit_status_update(task, events_tx).await;
}

/// Mark the task as completed with its result payload.
pub async fn complete_task(task: &mut SearchTask, events_tx: &Sender<Event>, result: serde_json::Value) {
    task.status = TaskStatus::Completed;
    task.progress = 100;
    task.result = Some(result);
    task.error = None;
    emit_status_update(task, events_tx).await;
    let _ = events_tx
        .send(Event::TaskCompleted {
            task_id: current_id(task),
        })
        .await;
}

/// Mark the task as failed with a terminal error message.
pub async fn fail_task(task: &mut SearchTask, events_tx: &Sender<Event>, error: String) {
    task.status = TaskStatus::Failed;
    task.result = None;
    task.error = Some(error.clone());
    emit_status_update(task, events_tx).await;
    let _ = events_tx
        .send(Event::TaskFailed {
            task_id: current_id(task),
            error,
        })
        .await;
}

/// Mark the task as timed out.
///
/// Distinct from [`fail_task`] so the UI can tell "backend said no" from
/// "we gave up waiting".
pub async fn timeout_task(task: &mut SearchTask, events_tx: &Sender<Event>) {
    let error = "search timed out before the backend finished".to_string();
    task.status = TaskStatus::TimedOut;
    task.result = None;
    task.error = Some(error.clone());
    emit_status_update(task, events_tx).await;
    let _ = events_tx
        .send(Event::TaskTimedOut {
            task_id: current_id(task),
            error,
        })
        .await;
}

/// Cancel the task: clear every observable field and emit the event.
pub async fn cancel_task(task: &mut SearchTask, events_tx: &Sender<Event>) {
    let task_id = current_id(task);
    clear_task(task);
    task.status = TaskStatus::Cancelled;
    let _ = events_tx.send(Event::TaskCancelled { task_id }).await;
}

fn current_id(task: &SearchTask) -> String {
    task.task_id.clone().unwrap_or_default()
}

async fn emit_status_update(task: &SearchTask, events_tx: &Sender<Event>) {
    let _ = events_tx
        .send(Event::TaskStatusUpdate {
            task_id: current_id(task),
            status: task.status,
            progress: task.progress,
            message: task.message.clone(),
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_begin_submission() {
        let mut task = SearchTask::default();

        begin_submission(&mut task);

        assert_eq!(task.status, TaskStatus::Submitting);
        assert!(task.started_at.is_some());
        assert!(task.result.is_none());
        assert!(task.error.is_none());
    }

    #[tokio::test]
    async fn test_accept_submission() {
        let mut task = SearchTask::default();
        let (tx, mut rx) = mpsc::channel(10);

        begin_submission(&mut task);
        accept_submission(&mut task, &tx, "abc".to_string()).await;

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.task_id.as_deref(), Some("abc"));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::TaskSubmitted { task_id } if task_id == "abc"));
        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            Event::TaskStatusUpdate {
                status: TaskStatus::Pending,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_record_progress_replaces_message() {
        let mut task = SearchTask::default();
        let (tx, mut rx) = mpsc::channel(10);

        record_progress(&mut task, &tx, TaskStatus::Processing, Some(40), Some("Scanning".to_string())).await;
        record_progress(&mut task, &tx, TaskStatus::Processing, None, None).await;

        // Second poll had no message; the old one must not linger
        assert_eq!(task.message, "");
        assert_eq!(task.progress, 40);
        assert_eq!(task.status, TaskStatus::Processing);

        let _ = rx.recv().await;
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::TaskStatusUpdate { progress: 40, .. }));
    }

    #[tokio::test]
    async fn test_record_progress_tolerates_non_monotonic_values() {
        let mut task = SearchTask::default();
        let (tx, _rx) = mpsc::channel(10);

        record_progress(&mut task, &tx, TaskStatus::Processing, Some(60), None).await;
        record_progress(&mut task, &tx, TaskStatus::Processing, Some(30), None).await;

        assert_eq!(task.progress, 30);
    }

    #[tokio::test]
    async fn test_complete_task() {
        let mut task = SearchTask::default();
        let (tx, mut rx) = mpsc::channel(10);

        accept_submission(&mut task, &tx, "abc".to_string()).await;
        complete_task(&mut task, &tx, serde_json::json!({"flights": []})).await;

        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.result.is_some());
        assert!(task.error.is_none());

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.iter().any(|e| matches!(e, Event::TaskCompleted { .. })));
    }

    #[tokio::test]
    async fn test_fail_task() {
        let mut task = SearchTask::default();
        let (tx, mut rx) = mpsc::channel(10);

        accept_submission(&mut task, &tx, "abc".to_string()).await;
        fail_task(&mut task, &tx, "no availability".to_string()).await;

        assert_eq!(task.status, TaskStatus::Failed);
        assert!(task.result.is_none());
        assert_eq!(task.error.as_deref(), Some("no availability"));

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TaskFailed { error, .. } if error == "no availability")));
    }

    #[tokio::test]
    async fn test_timeout_task_is_distinct_from_failure() {
        let mut task = SearchTask::default();
        let (tx, mut rx) = mpsc::channel(10);

        accept_submission(&mut task, &tx, "abc".to_string()).await;
        timeout_task(&mut task, &tx).await;

        assert_eq!(task.status, TaskStatus::TimedOut);
        assert!(task.error.as_deref().unwrap_or("").contains("timed out"));

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.iter().any(|e| matches!(e, Event::TaskTimedOut { .. })));
        assert!(!events.iter().any(|e| matches!(e, Event::TaskFailed { .. })));
    }

    #[tokio::test]
    async fn test_cancel_task_clears_everything() {
        let mut task = SearchTask::default();
        let (tx, mut rx) = mpsc::channel(10);

        accept_submission(&mut task, &tx, "abc".to_string()).await;
        record_progress(&mut task, &tx, TaskStatus::Processing, Some(70), Some("Ranking".to_string())).await;
        cancel_task(&mut task, &tx).await;

        assert_eq!(task.status, TaskStatus::Cancelled);
        assert!(task.task_id.is_none());
        assert_eq!(task.progress, 0);
        assert_eq!(task.message, "");
        assert!(task.result.is_none());
        assert!(task.error.is_none());

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TaskCancelled { task_id } if task_id == "abc")));
    }
}
