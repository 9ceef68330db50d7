use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;
use shared_types::{Club, ContactsResponse};
use std::sync::Arc;

use crate::database::associations as associations_db;
use crate::database::clubs as clubs_db;
use crate::database::contacts as contacts_db;
use crate::database::Database;

#[derive(Debug, Serialize)]
pub struct ClubsResponse {
    pub clubs: Vec<Club>,
}

pub async fn list_contacts(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let contacts = contacts_db::list_contacts(db.async_connection.clone())
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ContactsResponse { contacts }))
}

pub async fn get_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    let contact = contacts_db::get_contact(db.async_connection.clone(), contact_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?
        .ok_or_else(|| {
            actix_web::error::ErrorNotFound(format!("Contact {} not found", contact_id))
        })?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn get_contact_associations(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    let associations =
        associations_db::get_contact_associations(db.async_connection.clone(), contact_id)
            .await
            .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(associations))
}

pub async fn list_clubs(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let clubs = clubs_db::list_clubs(db.async_connection.clone())
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ClubsResponse { clubs }))
}
