//! OpenAPI documentation.
//!
//! Routes mounted under two paths (`/upload` and `/api/upload`, `/raw/{id}` and
//! `/api/raw/{id}`) are documented under their `/api` form.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use pastegate_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pastegate API",
        version = "0.1.0",
        description = "File and snippet hosting behind a configurable access gate"
    ),
    paths(
        handlers::upload::upload_file,
        handlers::create::create_code,
        handlers::raw::get_raw,
        handlers::content::get_content,
        handlers::view::view_file,
        handlers::auth::authenticate,
        handlers::stream::stream_file,
        handlers::password::verify_password,
        handlers::password::password_info,
        handlers::files::list_files,
        handlers::files::toggle_lock,
    ),
    components(
        schemas(
            models::FileKind,
            models::FileSummary,
            handlers::upload::UploadResponse,
            handlers::create::CreateRequest,
            handlers::create::CreateResponse,
            handlers::auth::PasswordRequest,
            handlers::auth::SessionResponse,
            handlers::password::VerifyPasswordResponse,
            handlers::password::PasswordInfoResponse,
            handlers::files::ToggleLockResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Upload, listing, lock state and ungated content"),
        (name = "raw", description = "Gated raw fetch"),
        (name = "auth", description = "Per-file sessions and token-gated streaming"),
        (name = "password", description = "Rotating password checks")
    )
)]
pub struct ApiDoc;
