//! 题目服务错误类型

use axum::http::StatusCode;
use thiserror::Error;

use crate::common::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("Question with ID {0} not found.")]
    NotFound(i64),

    #[error("Invalid page {0}: page numbers start at 1")]
    InvalidPage(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl QuestionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuestionError::NotFound(_) => StatusCode::NOT_FOUND,
            QuestionError::InvalidPage(_) | QuestionError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            QuestionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            QuestionError::NotFound(_) => ErrorResponse::not_found(self.to_string()),
            QuestionError::InvalidPage(_) | QuestionError::InvalidInput(_) => {
                ErrorResponse::invalid_request(self.to_string())
            }
            QuestionError::Internal(e) => ErrorResponse::internal_error(e.to_string()),
        }
    }
}
