//! In-process stand-in for the PetFriends API.
//!
//! Reproduces the service's wire contract and its validation policy: 403 for
//! unknown credentials or keys, 400 for empty fields, out-of-range ages,
//! photos that are neither JPEG nor PNG, and updates that change nothing.
//! Error bodies are plain text, as the real service answers with HTML.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub use store::{Account, Pet, Store, DEMO_EMAIL, DEMO_PASSWORD};

pub const MAX_AGE: u32 = 100;

/// Request body cap; larger uploads are answered with 413.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, String);

#[derive(Debug, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: String,
}

/// Text fields shared by create and update. Missing fields read as empty so
/// they fail validation with 400 instead of a form rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub age: String,
}

pub fn app() -> Router {
    app_with_store(Store::demo())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(add_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/set_photo/{id}", post(set_photo))
        .route("/api/pets/{id}", put(update_pet).delete(delete_pet))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_store(listener, Store::demo()).await
}

pub async fn run_with_store(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_store(store)).await
}

async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> Result<Json<serde_json::Value>, Rejection> {
    let email = header(&headers, "email");
    let password = header(&headers, "password");
    let store = db.read().await;
    match store.login(email, password) {
        Some(account) => {
            info!(email, "issued api key");
            Ok(Json(serde_json::json!({ "key": account.key })))
        }
        None => Err(reject(
            StatusCode::FORBIDDEN,
            "This user wasn't found in database",
        )),
    }
}

async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PetList>, Rejection> {
    let store = db.read().await;
    let account = authorize(&store, &headers)?;
    let pets = match query.filter.as_str() {
        "" => store.pets().to_vec(),
        "my_pets" => store.pets_of(&account.id),
        other => {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                &format!("Filter value is incorrect: {other}"),
            ))
        }
    };
    Ok(Json(PetList { pets }))
}

async fn add_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Pet>, Rejection> {
    let upload = read_upload(multipart).await?;
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?.id.clone();
    let age = validate_fields(&upload.form)?;
    let photo = match upload.photo {
        Some(bytes) => photo_data_uri(&bytes)?,
        None => return Err(reject(StatusCode::BAD_REQUEST, "pet_photo is required")),
    };
    let pet = store.insert_pet(&user_id, &upload.form.name, &upload.form.animal_type, age, photo);
    info!(pet_id = %pet.id, "pet created");
    Ok(Json(pet))
}

async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, Rejection> {
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?.id.clone();
    let age = validate_fields(&form)?;
    let pet = store.insert_pet(&user_id, &form.name, &form.animal_type, age, String::new());
    info!(pet_id = %pet.id, "pet created without photo");
    Ok(Json(pet))
}

async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Pet>, Rejection> {
    let upload = read_upload(multipart).await?;
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?.id.clone();
    let photo = match upload.photo {
        Some(bytes) => photo_data_uri(&bytes)?,
        None => return Err(reject(StatusCode::BAD_REQUEST, "pet_photo is required")),
    };
    let pet = owned_pet(&mut store, &user_id, &id)?;
    pet.pet_photo = photo;
    Ok(Json(pet.clone()))
}

async fn update_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, Rejection> {
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?.id.clone();
    let age = validate_fields(&form)?.to_string();
    let pet = owned_pet(&mut store, &user_id, &id)?;
    if pet.name == form.name && pet.animal_type == form.animal_type && pet.age == age {
        return Err(reject(StatusCode::BAD_REQUEST, "Nothing to update"));
    }
    pet.name = form.name;
    pet.animal_type = form.animal_type;
    pet.age = age;
    info!(pet_id = %pet.id, "pet updated");
    Ok(Json(pet.clone()))
}

/// Deleting an unknown id is a no-op that still answers 200.
async fn delete_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?.id.clone();
    match store.pet(&id).map(|pet| pet.user_id.clone()) {
        None => Ok(StatusCode::OK),
        Some(owner) if owner != user_id => Err(reject(
            StatusCode::FORBIDDEN,
            "You can't delete pets of other users",
        )),
        Some(_) => {
            store.remove_pet(&id);
            info!(pet_id = %id, "pet deleted");
            Ok(StatusCode::OK)
        }
    }
}

struct Upload {
    form: PetForm,
    photo: Option<Vec<u8>>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Rejection> {
    let mut upload = Upload {
        form: PetForm::default(),
        photo: None,
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_rejection)?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pet_photo" {
            let bytes = field
                .bytes()
                .await
                .map_err(multipart_rejection)?;
            upload.photo = Some(bytes.to_vec());
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(multipart_rejection)?;
        match name.as_str() {
            "name" => upload.form.name = value,
            "animal_type" => upload.form.animal_type = value,
            "age" => upload.form.age = value,
            _ => {}
        }
    }
    Ok(upload)
}

/// Malformed bodies map to 400, oversized ones to 413.
fn multipart_rejection(err: MultipartError) -> Rejection {
    reject(err.status(), &err.body_text())
}

fn authorize<'a>(store: &'a Store, headers: &HeaderMap) -> Result<&'a Account, Rejection> {
    store
        .account_by_key(header(headers, "auth_key"))
        .ok_or_else(|| reject(StatusCode::FORBIDDEN, "Please provide 'auth_key' Header"))
}

fn owned_pet<'a>(store: &'a mut Store, user_id: &str, id: &str) -> Result<&'a mut Pet, Rejection> {
    match store.pet_mut(id) {
        Some(pet) if pet.user_id == user_id => Ok(pet),
        _ => Err(reject(
            StatusCode::BAD_REQUEST,
            "Pet with this id wasn't found in your list",
        )),
    }
}

/// Returns the parsed age.
pub fn validate_fields(form: &PetForm) -> Result<u32, Rejection> {
    if form.name.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "name is required"));
    }
    if form.animal_type.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "animal_type is required"));
    }
    match form.age.trim().parse::<u32>() {
        Ok(age) if age <= MAX_AGE => Ok(age),
        _ => Err(reject(
            StatusCode::BAD_REQUEST,
            &format!("age must be a number from 0 to {MAX_AGE}"),
        )),
    }
}

/// Sniff the image format from magic bytes; file names and declared content
/// types are ignored.
pub fn photo_mime(bytes: &[u8]) -> Option<&'static str> {
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    if bytes.starts_with(JPEG) {
        Some("image/jpeg")
    } else if bytes.starts_with(PNG) {
        Some("image/png")
    } else {
        None
    }
}

fn photo_data_uri(bytes: &[u8]) -> Result<String, Rejection> {
    let mime = photo_mime(bytes)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "pet_photo must be a JPEG or PNG image"))?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    warn!(status = status.as_u16(), message, "request rejected");
    (status, message.to_string())
}
