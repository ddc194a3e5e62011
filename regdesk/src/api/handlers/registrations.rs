use crate::api::models::registrations::{MessageResponse, RegisterResponse, RegistrationForm, RegistrationResponse, StatusUpdateRequest};
use crate::db::errors::DbError;
use crate::db::models::documents::DocumentStoreRequest;
use crate::errors::{Error, Result};
use crate::types::RegistrationId;
use crate::upload::UploadPolicy;
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    post,
    path = "/register",
    tag = "registrations",
    summary = "Submit a registration",
    description = "Multipart form with the applicant's details and an identity document in the `idFile` field. \
                   Accepted documents are JPEG, JPG, PNG or PDF up to 5 MiB.",
    request_body(
        content_type = "multipart/form-data",
        description = "Registration fields plus the identity document"
    ),
    responses(
        (status = 201, description = "Registration stored, review pending", body = RegisterResponse),
        (status = 400, description = "Missing field, rejected upload, or already-registered email"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(State(state): State<AppState>, mut multipart: Multipart) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let policy = UploadPolicy::new(state.config.upload.max_size_bytes);

    let mut form = RegistrationForm::default();
    let mut attachment: Option<(String, Vec<u8>)> = None;

    // Drain the multipart stream. The attachment is screened as soon as its
    // headers arrive and its size is checked chunk by chunk, so an oversized
    // or mistyped file is rejected before the rest of the body is read.
    while let Some(field) = multipart.next_field().await.map_err(|e| Error::Validation {
        message: format!("Failed to parse multipart data: {e}"),
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "idFile" {
            let filename = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            policy.check_type(&filename, content_type.as_deref())?;

            let mut content = Vec::new();
            let mut total_size = 0u64;
            let mut chunk_stream = field;
            while let Some(chunk) = chunk_stream.chunk().await.map_err(|e| Error::Validation {
                message: format!("Failed to read file chunk: {e}"),
            })? {
                total_size += chunk.len() as u64;
                policy.check_size(total_size)?;
                content.extend_from_slice(&chunk);
            }

            tracing::debug!(filename = %filename, bytes = total_size, "Accepted identity document");
            attachment = Some((filename, content));
        } else {
            let value = field.text().await.map_err(|e| Error::Validation {
                message: format!("Failed to read field {field_name}: {e}"),
            })?;
            form.set(&field_name, value);
        }
    }

    let validated = form.validate(attachment.is_some())?;
    let Some((filename, content)) = attachment else {
        return Err(Error::Validation {
            message: "All fields and file upload are required!".to_string(),
        });
    };

    // Fast-path duplicate check for a friendly error; the unique index on
    // email remains the real guarantee under concurrent submissions.
    if state.store.find_by_email(&validated.email).await?.is_some() {
        return Err(Error::Conflict {
            message: "User already registered".to_string(),
        });
    }

    let stored = state
        .documents
        .store(DocumentStoreRequest {
            original_filename: filename,
            content,
        })
        .await?;

    let record = state.store.create(&validated.into_db_request(stored.url)).await?;

    // Notification emails are best-effort: the registration has already
    // succeeded, so failures are logged and never reported to the client.
    if let Err(e) = state.email.send_registration_received(&record.email, &record.first_name).await {
        tracing::warn!(error = %e, email = %record.email, "Failed to send registration confirmation email");
    }
    if let Err(e) = state
        .email
        .send_registration_alert(
            &state.config.admin_email,
            &record.first_name,
            &record.last_name,
            &record.email,
            &record.phone,
        )
        .await
    {
        tracing::warn!(error = %e, "Failed to send new-registration alert email");
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful. Await approval.".to_string(),
            data: record.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "registrations",
    summary = "List registrations",
    description = "Returns every registration record, newest first. No pagination.",
    responses(
        (status = 200, description = "All registration records", body = [RegistrationResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<RegistrationResponse>>> {
    let records = state.store.list_all().await?;
    Ok(Json(records.into_iter().map(RegistrationResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/users/update-status",
    tag = "registrations",
    summary = "Update a registration's status",
    description = "Overwrites the review status of a record and emails the registrant the outcome. \
                   Transitions are unrestricted: any status may be set from any other.",
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 404, description = "Unknown user id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_status(State(state): State<AppState>, Json(request): Json<StatusUpdateRequest>) -> Result<Json<MessageResponse>> {
    let record = state.store.update_status(request.user_id, request.status).await.map_err(|e| match e {
        DbError::NotFound => Error::NotFound {
            resource: "User".to_string(),
            id: request.user_id.to_string(),
        },
        other => Error::Database(other),
    })?;

    // Outcome email is best-effort, same as at registration time.
    if let Err(e) = state.email.send_status_changed(&record.email, &record.first_name, record.status).await {
        tracing::warn!(error = %e, email = %record.email, "Failed to send status-change email");
    }

    Ok(Json(MessageResponse {
        message: format!("User status updated to {}", request.status),
    }))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "registrations",
    summary = "Delete a registration",
    description = "Removes the stored identity document (ignoring a file that is already gone) and then the record. \
                   The two steps are not transactional.",
    params(
        ("id" = uuid::Uuid, Path, description = "Registration record id")
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 404, description = "Unknown user id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<RegistrationId>) -> Result<Json<MessageResponse>> {
    let record = state.store.find_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: id.to_string(),
    })?;

    // The url is always "/uploads/<name>"; storage takes the bare name.
    if let Some(file_name) = record.id_file_url.rsplit('/').next() {
        state.documents.delete(file_name).await?;
    }

    state.store.delete(id).await.map_err(|e| match e {
        DbError::NotFound => Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        },
        other => Error::Database(other),
    })?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
