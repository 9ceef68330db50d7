use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError, Result as ActixResult};
use contact_dedup::{detect_duplicates, MergeRequest};
use shared_types::{DuplicateGroupsResponse, ErrorResponse, MergeContactsRequest, MergeHistoryResponse};
use std::sync::Arc;

use crate::database::contacts as contacts_db;
use crate::database::merge::{self as merge_db, MergeError};
use crate::database::Database;

impl ResponseError for MergeError {
    fn status_code(&self) -> StatusCode {
        match self {
            MergeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            MergeError::ContactNotFound(_) => StatusCode::NOT_FOUND,
            MergeError::StalePlan(_) => StatusCode::CONFLICT,
            MergeError::Database(_) | MergeError::Pool(_) | MergeError::Snapshot(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

pub async fn list_duplicates(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let contacts = contacts_db::list_contacts(db.async_connection.clone())
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    let total_contacts = contacts.len();
    let groups = web::block(move || detect_duplicates(&contacts)).await?;

    tracing::info!(
        "Found {} duplicate groups among {} contacts",
        groups.len(),
        total_contacts
    );

    Ok(HttpResponse::Ok().json(DuplicateGroupsResponse {
        groups,
        total_contacts,
    }))
}

pub async fn preview_merge(
    db: web::Data<Arc<Database>>,
    request: web::Json<MergeContactsRequest>,
) -> Result<HttpResponse, MergeError> {
    let request = MergeRequest::try_from(request.into_inner())?;

    let plan = merge_db::preview_merge(db.async_connection.clone(), &request).await?;

    Ok(HttpResponse::Ok().json(plan))
}

pub async fn merge_contacts(
    db: web::Data<Arc<Database>>,
    request: web::Json<MergeContactsRequest>,
) -> Result<HttpResponse, MergeError> {
    let request = MergeRequest::try_from(request.into_inner()).map_err(|e| {
        tracing::warn!("Rejected merge request: {}", e);
        MergeError::from(e)
    })?;

    let summary = merge_db::merge_contacts(db.async_connection.clone(), &request).await?;

    Ok(HttpResponse::Ok().json(summary))
}

pub async fn get_merge_history(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let target_id = path.into_inner();

    let entries = merge_db::list_merge_history(db.async_connection.clone(), target_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(MergeHistoryResponse { entries }))
}
