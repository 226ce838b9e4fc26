//! HTTP surface of the storefront.
//!
//! Public routes serve the gallery, search, barcode lookup and product
//! photos. Everything under `/api/admin` sits behind the session cookie set
//! by `/api/login`. Store calls may block on the remote mirror, so they run
//! on tokio's blocking pool.

use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::codec;
use crate::downloader;
use crate::error::{AuthError, CodecError, LabelError, StoreError};
use crate::label;
use crate::loader;
use crate::login::Sessions;
use crate::mirror::PersistReport;
use crate::product::{DEFAULT_CATEGORY, DEFAULT_MIN_THRESHOLD, Product, StockStatus};
use crate::settings::Settings;
use crate::state::AppState;

const SESSION_COOKIE: &str = "session";

pub struct WebState {
    app: Mutex<AppState>,
    sessions: Mutex<Sessions>,
}

impl WebState {
    pub fn new(app: AppState) -> Self {
        Self {
            app: Mutex::new(app),
            sessions: Mutex::new(Sessions::default()),
        }
    }

    fn sessions(&self) -> Result<std::sync::MutexGuard<'_, Sessions>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::internal("session table poisoned"))
    }
}

type Shared = Arc<WebState>;

/// Error turned into a JSON message at the action boundary
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let status = match &e {
            StoreError::DuplicateBarcode(_) | StoreError::DeleteNotConfirmed(_) => {
                StatusCode::CONFLICT
            }
            StoreError::InvalidProduct(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Auth(auth) => return ApiError::from(auth.clone()),
            StoreError::Io(_) | StoreError::Csv(_) | StoreError::Xlsx(_) => {
                log::error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match e {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::EmailMismatch => StatusCode::FORBIDDEN,
            AuthError::AlreadyRegistered => StatusCode::CONFLICT,
            AuthError::NotRegistered => StatusCode::NOT_FOUND,
            AuthError::EmptyField => StatusCode::BAD_REQUEST,
        };
        Self::new(status, e.to_string())
    }
}

impl From<LabelError> for ApiError {
    fn from(e: LabelError) -> Self {
        let status = match e {
            LabelError::EncodingUnsupported(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LabelError::Logo(_) | LabelError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<CodecError> for ApiError {
    fn from(e: CodecError) -> Self {
        Self::not_found(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ActionResponse {
            status: "error".to_string(),
            message: Some(self.message),
            warning: None,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ActionResponse {
    status: String,
    message: Option<String>,
    warning: Option<String>,
}

impl ActionResponse {
    fn saved(message: impl Into<String>, report: PersistReport) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some(message.into()),
            warning: report.remote_warning,
        }
    }
}

/// Gallery card: everything but the image payload
#[derive(Serialize)]
struct ProductSummary {
    barcode: String,
    name: String,
    category: String,
    price: f64,
    quantity: u32,
    stock_status: StockStatus,
    has_image: bool,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            barcode: p.barcode.clone(),
            name: p.name.clone(),
            category: p.category.clone(),
            price: p.price,
            quantity: p.quantity,
            stock_status: p.stock_status(),
            has_image: p.has_image(),
        }
    }
}

#[derive(Serialize)]
struct ProductDetail {
    #[serde(flatten)]
    summary: ProductSummary,
    min_threshold: u32,
    description: String,
}

impl From<&Product> for ProductDetail {
    fn from(p: &Product) -> Self {
        Self {
            summary: ProductSummary::from(p),
            min_threshold: p.min_threshold,
            description: p.description.clone(),
        }
    }
}

/// Add/edit form payload
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub min_threshold: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductForm {
    /// Build the row, keeping `image_data` from the row being edited
    pub fn into_product(self, image_data: String) -> Product {
        Product {
            barcode: self.barcode,
            name: self.name,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            price: self.price,
            quantity: self.quantity,
            min_threshold: self.min_threshold.unwrap_or(DEFAULT_MIN_THRESHOLD),
            image_data,
            description: self.description.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct GalleryQuery {
    #[serde(default)]
    q: String,
    category: Option<String>,
}

#[derive(Deserialize)]
struct StockPatch {
    quantity: Option<u32>,
    price: Option<f64>,
}

#[derive(Deserialize)]
struct LabelQuery {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct CredentialForm {
    username: String,
    password: String,
    email: String,
}

#[derive(Deserialize)]
struct RecoverRequest {
    email: String,
}

/// Identity of the admin behind an authenticated request
#[derive(Clone)]
struct AdminSession {
    id: String,
}

pub fn router(state: Shared) -> Router {
    let admin = Router::new()
        .route("/api/admin/products", post(add_product))
        .route("/api/admin/products/:barcode", put(edit_product))
        .route("/api/admin/products/:barcode/stock", patch(patch_stock))
        .route(
            "/api/admin/products/:barcode/image",
            post(upload_image).delete(clear_image),
        )
        .route("/api/admin/products/:barcode/delete", post(request_delete))
        .route("/api/admin/products/:barcode/delete/confirm", post(confirm_delete))
        .route("/api/admin/products/:barcode/delete/cancel", post(cancel_delete))
        .route("/api/admin/products/:barcode/label", get(product_label))
        .route("/api/admin/low-stock", get(low_stock))
        .route("/api/admin/export.csv", get(export_csv))
        .route("/api/admin/export.xlsx", get(export_xlsx))
        .route("/api/admin/restore", post(restore_backup))
        .route("/api/admin/reload", post(reload_tables))
        .route("/api/admin/sync", post(sync_tables))
        .route("/api/admin/settings", put(update_settings))
        .route("/api/admin/logo", post(upload_logo))
        .route("/api/admin/credentials", put(update_credentials))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/storefront", get(storefront))
        .route("/api/products", get(gallery))
        .route("/api/products/:barcode", get(product_detail))
        .route("/api/products/:barcode/image", get(product_image))
        .route("/api/settings", get(get_settings))
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/register", post(handle_register))
        .route("/api/recover", post(handle_recover))
        .merge(admin)
        .with_state(state)
}

pub async fn run(app_state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = app_state.config.bind_addr.clone();
    let state = Arc::new(WebState::new(app_state));
    let app = router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    log::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a store action on the blocking pool with the state locked
async fn with_app<T, F>(state: &Shared, action: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut AppState) -> Result<T, ApiError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let mut app = state
            .app
            .lock()
            .map_err(|_| ApiError::internal("application state poisoned"))?;
        action(&mut app)
    })
    .await
    .map_err(|e| ApiError::internal(e.to_string()))?
}

async fn require_auth(
    State(state): State<Shared>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let valid = match state.sessions() {
            Ok(mut sessions) => sessions.validate(cookie.value()).is_some(),
            Err(e) => return e.into_response(),
        };
        if valid {
            request.extensions_mut().insert(AdminSession {
                id: cookie.value().to_string(),
            });
            return next.run(request).await;
        }
    }
    ApiError::new(StatusCode::UNAUTHORIZED, "Login required").into_response()
}

async fn storefront(State(state): State<Shared>) -> Result<impl IntoResponse, ApiError> {
    with_app(&state, |app| {
        Ok(Json(serde_json::json!({
            "settings": app.settings.get(),
            "product_count": app.inventory.len(),
            "categories": app.inventory.categories(),
            "registered": app.credentials.is_registered(),
        })))
    })
    .await
}

async fn gallery(
    State(state): State<Shared>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    with_app(&state, move |app| {
        let products = app
            .inventory
            .search(&query.q)
            .into_iter()
            .filter(|p| match &query.category {
                Some(c) if !c.is_empty() => &p.category == c,
                _ => true,
            })
            .map(ProductSummary::from)
            .collect();
        Ok(Json(products))
    })
    .await
}

async fn product_detail(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    with_app(&state, move |app| {
        app.inventory
            .find_by_barcode(&barcode)
            .map(|p| Json(ProductDetail::from(p)))
            .ok_or_else(|| ApiError::not_found(format!("No product with barcode {}", barcode)))
    })
    .await
}

async fn product_image(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = with_app(&state, move |app| {
        let product = app
            .inventory
            .find_by_barcode(&barcode)
            .ok_or_else(|| ApiError::not_found(format!("No product with barcode {}", barcode)))?;
        if !product.has_image() {
            return Err(ApiError::not_found("No image"));
        }
        Ok(codec::decode(&product.image_data)?)
    })
    .await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

async fn get_settings(State(state): State<Shared>) -> Result<Json<Settings>, ApiError> {
    with_app(&state, |app| Ok(Json(app.settings.get().clone()))).await
}

async fn handle_login(
    State(state): State<Shared>,
    jar: CookieJar,
    Json(credentials): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ActionResponse>), ApiError> {
    let username = credentials.username.clone();
    with_app(&state, move |app| {
        Ok(app
            .credentials
            .login(&credentials.username, &credentials.password)?)
    })
    .await?;

    let session_id = state.sessions()?.create(&username);
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true);
    log::info!("Admin {} logged in", username);
    Ok((
        jar.add(cookie),
        Json(ActionResponse {
            status: "ok".to_string(),
            message: Some(format!("Welcome, {}", username)),
            warning: None,
        }),
    ))
}

async fn handle_logout(
    State(state): State<Shared>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ActionResponse>), ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions()?.remove(cookie.value());
    }
    Ok((
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(ActionResponse {
            status: "ok".to_string(),
            message: Some("Logged out".to_string()),
            warning: None,
        }),
    ))
}

async fn handle_register(
    State(state): State<Shared>,
    Json(form): Json<CredentialForm>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let report = app
            .credentials
            .register(&form.username, &form.password, &form.email)?;
        Ok(Json(ActionResponse::saved("Admin account created", report)))
    })
    .await
}

async fn handle_recover(
    State(state): State<Shared>,
    Json(request): Json<RecoverRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    with_app(&state, move |app| {
        let password = app.credentials.recover(&request.email)?;
        Ok(Json(serde_json::json!({ "status": "ok", "password": password })))
    })
    .await
}

async fn add_product(
    State(state): State<Shared>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let product = form.into_product(String::new());
        let name = product.name.clone();
        let report = app.inventory.insert(product)?;
        Ok(Json(ActionResponse::saved(format!("Added {}", name), report)))
    })
    .await
}

async fn edit_product(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let image_data = app
            .inventory
            .find_by_barcode(&barcode)
            .map(|p| p.image_data.clone())
            .ok_or_else(|| StoreError::NotFound(barcode.clone()))?;
        let report = app
            .inventory
            .update_by_key(&barcode, form.into_product(image_data))?;
        Ok(Json(ActionResponse::saved(format!("Updated {}", barcode), report)))
    })
    .await
}

async fn patch_stock(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
    Json(patch): Json<StockPatch>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let report = app
            .inventory
            .patch_stock(&barcode, patch.quantity, patch.price)?;
        Ok(Json(ActionResponse::saved(format!("Updated {}", barcode), report)))
    })
    .await
}

/// First file field of a multipart upload named `field`
async fn read_upload(multipart: &mut Multipart, field: &str) -> Result<Vec<u8>, ApiError> {
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if part.name() == Some(field) {
            let data = part
                .bytes()
                .await
                .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
            if data.is_empty() {
                break;
            }
            return Ok(data.to_vec());
        }
    }
    Err(ApiError::new(
        StatusCode::BAD_REQUEST,
        format!("No {} file received", field),
    ))
}

async fn upload_image(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, ApiError> {
    let raw = read_upload(&mut multipart, "image").await?;
    with_app(&state, move |app| {
        let encoded = codec::encode(&raw);
        let message = if encoded.is_empty() {
            "Image could not be read; product saved without a photo"
        } else {
            "Image updated"
        };
        let report = app.inventory.set_image(&barcode, encoded)?;
        Ok(Json(ActionResponse::saved(message, report)))
    })
    .await
}

async fn clear_image(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let report = app.inventory.set_image(&barcode, String::new())?;
        Ok(Json(ActionResponse::saved("Image removed", report)))
    })
    .await
}

async fn request_delete(
    State(state): State<Shared>,
    Extension(session): Extension<AdminSession>,
    Path(barcode): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    let pending = with_app(&state, move |app| Ok(app.inventory.request_delete(&barcode)?)).await?;
    let message = format!("Confirm deletion of {}", pending.barcode());
    state
        .sessions()?
        .set_pending_delete(&session.id, Some(pending));
    Ok(Json(ActionResponse {
        status: "pending".to_string(),
        message: Some(message),
        warning: None,
    }))
}

async fn confirm_delete(
    State(state): State<Shared>,
    Extension(session): Extension<AdminSession>,
    Path(barcode): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    let pending = state
        .sessions()?
        .take_pending_delete(&session.id, &barcode)
        .ok_or_else(|| StoreError::DeleteNotConfirmed(barcode.clone()))?;
    with_app(&state, move |app| {
        let report = app.inventory.delete(pending)?;
        Ok(Json(ActionResponse::saved(format!("Deleted {}", barcode), report)))
    })
    .await
}

async fn cancel_delete(
    State(state): State<Shared>,
    Extension(session): Extension<AdminSession>,
) -> Result<Json<ActionResponse>, ApiError> {
    state.sessions()?.set_pending_delete(&session.id, None);
    Ok(Json(ActionResponse {
        status: "ok".to_string(),
        message: Some("Delete cancelled".to_string()),
        warning: None,
    }))
}

async fn product_label(
    State(state): State<Shared>,
    Path(barcode): Path<String>,
    Query(query): Query<LabelQuery>,
) -> Result<Response, ApiError> {
    let width = query.width.unwrap_or(label::DEFAULT_WIDTH).clamp(1, 2000);
    let height = query.height.unwrap_or(label::DEFAULT_HEIGHT).clamp(1, 2000);
    let (png, filename) = with_app(&state, move |app| {
        let product = app
            .inventory
            .find_by_barcode(&barcode)
            .ok_or_else(|| StoreError::NotFound(barcode.clone()))?;
        let png = app
            .labels
            .render_png(&product.barcode, &product.name, width, height)?;
        Ok((png, format!("label_{}.png", product.barcode)))
    })
    .await?;
    Ok(download(png, "image/png", &filename))
}

async fn low_stock(State(state): State<Shared>) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    with_app(&state, |app| {
        Ok(Json(
            app.inventory
                .low_stock()
                .into_iter()
                .map(ProductSummary::from)
                .collect(),
        ))
    })
    .await
}

async fn export_csv(State(state): State<Shared>) -> Result<Response, ApiError> {
    let csv = with_app(&state, |app| Ok(downloader::to_csv(app.inventory.products())?)).await?;
    Ok(download(
        csv.into_bytes(),
        "text/csv",
        &downloader::backup_filename("csv"),
    ))
}

async fn export_xlsx(State(state): State<Shared>) -> Result<Response, ApiError> {
    let xlsx = with_app(&state, |app| Ok(downloader::to_xlsx(app.inventory.products())?)).await?;
    Ok(download(
        xlsx,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &downloader::backup_filename("xlsx"),
    ))
}

fn download(body: Vec<u8>, content_type: &str, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

async fn restore_backup(
    State(state): State<Shared>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, ApiError> {
    let data = read_upload(&mut multipart, "backup").await?;
    with_app(&state, move |app| {
        let products = loader::from_csv(&data)?;
        let count = products.len();
        let report = app.inventory.replace_all(products)?;
        Ok(Json(ActionResponse::saved(
            format!("Restored {} products", count),
            report,
        )))
    })
    .await
}

async fn reload_tables(State(state): State<Shared>) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, |app| {
        let source = app.inventory.reload()?;
        Ok(Json(ActionResponse {
            status: "ok".to_string(),
            message: Some(format!(
                "Reloaded {} products ({:?})",
                app.inventory.len(),
                source
            )),
            warning: None,
        }))
    })
    .await
}

/// Push every in-memory table to both mirrors again
async fn sync_tables(State(state): State<Shared>) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, |app| {
        let mut warnings: Vec<String> = Vec::new();
        for report in [app.inventory.persist()?, app.settings.persist()?] {
            warnings.extend(report.remote_warning);
        }
        if app.credentials.is_registered() {
            warnings.extend(app.credentials.persist()?.remote_warning);
        }
        Ok(Json(ActionResponse {
            status: "ok".to_string(),
            message: Some(format!("Synced {} products", app.inventory.len())),
            warning: (!warnings.is_empty()).then(|| warnings.join("; ")),
        }))
    })
    .await
}

async fn update_settings(
    State(state): State<Shared>,
    Json(settings): Json<Settings>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let report = app.settings.update(settings)?;
        Ok(Json(ActionResponse::saved("Settings saved", report)))
    })
    .await
}

async fn upload_logo(
    State(state): State<Shared>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, ApiError> {
    let raw = read_upload(&mut multipart, "logo").await?;
    with_app(&state, move |app| {
        let logo = image::load_from_memory(&raw)
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
        let path = app
            .config
            .logo_path
            .clone()
            .ok_or_else(|| ApiError::new(StatusCode::CONFLICT, "No logo path configured"))?;
        logo.save(&path).map_err(|e| ApiError::internal(e.to_string()))?;
        app.reload_logo();
        Ok(Json(ActionResponse {
            status: "ok".to_string(),
            message: Some("Logo updated".to_string()),
            warning: None,
        }))
    })
    .await
}

async fn update_credentials(
    State(state): State<Shared>,
    Json(form): Json<CredentialForm>,
) -> Result<Json<ActionResponse>, ApiError> {
    with_app(&state, move |app| {
        let report = app
            .credentials
            .update(&form.username, &form.password, &form.email)?;
        Ok(Json(ActionResponse::saved("Credentials updated", report)))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults() {
        let form: ProductForm = serde_json::from_str(
            r#"{"barcode": "1001", "name": "Rice", "price": 50.0, "quantity": 10, "category": " "}"#,
        )
        .unwrap();
        let product = form.into_product("abc".to_string());
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert_eq!(product.min_threshold, DEFAULT_MIN_THRESHOLD);
        assert_eq!(product.image_data, "abc");
    }

    #[test]
    fn test_error_status_mapping() {
        let dup = ApiError::from(StoreError::DuplicateBarcode("1".to_string()));
        assert_eq!(dup.status, StatusCode::CONFLICT);

        let login = ApiError::from(StoreError::Auth(AuthError::InvalidCredentials));
        assert_eq!(login.status, StatusCode::UNAUTHORIZED);

        let recover = ApiError::from(AuthError::EmailMismatch);
        assert_eq!(recover.status, StatusCode::FORBIDDEN);
        assert_eq!(recover.message, "Recovery denied");
    }
}
