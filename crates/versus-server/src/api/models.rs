//! Data models for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use versus_core::{RenderedPair, Selection};

/// Standard API response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Query for the projection endpoint. Omitted fields keep their initial value.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub section: Option<String>,
    pub subsection: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub show_all: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub selection: Selection,
    pub pairs: Vec<RenderedPair>,
}

/// What the running server is hosting
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub title: String,
    pub base_path: String,
    pub entries: usize,
    pub built_at: DateTime<Utc>,
}
