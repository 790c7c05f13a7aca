use api_types::task::{TaskResponse, TaskState};
use reqwest::StatusCode;
use serde_json::Value;

use crate::{ApiClient, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TaskStatus {
    Pending,
    Completed(Value),
    NotFound,
}

/// Unknown task ids come back as 404 with a `not-found` envelope.
const TASK_STATUSES: [StatusCode; 2] = [StatusCode::OK, StatusCode::NOT_FOUND];

impl ApiClient {
    pub async fn task_status(&self, task_id: u64) -> Result<TaskStatus> {
        let response: TaskResponse = self
            .get_accepting(&format!("tasks/{task_id}"), &[], &TASK_STATUSES)
            .await?;
        Ok(match response.status {
            TaskState::Pending => TaskStatus::Pending,
            TaskState::Completed => TaskStatus::Completed(response.outcome.unwrap_or(Value::Null)),
            TaskState::NotFound => TaskStatus::NotFound,
        })
    }
}
