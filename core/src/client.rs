//! Stateless HTTP request builder and response parser for the PetFriends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url`. Each operation has a `build_*`
//! method producing an `HttpRequest`; `parse_response` turns any
//! `HttpResponse` into an `ApiResponse` without judging its status, so 400
//! and 403 answers reach the caller as data.

use url::form_urlencoded;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::MultipartForm;
use crate::response::ApiResponse;
use crate::types::{ApiKey, Credentials, NewPet, PetFilter, PetPhoto, PetUpdate};

const AUTH_HEADER: &str = "auth_key";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the PetFriends API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Pair it with a `Transport`, or use `PetFriends`,
/// to perform the round trip.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/key` with the credentials in the `email` and `password` headers.
    pub fn build_get_api_key(&self, credentials: &Credentials) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/key", self.base_url),
            headers: vec![
                ("email".to_string(), credentials.email.clone()),
                ("password".to_string(), credentials.password.clone()),
            ],
            body: None,
        }
    }

    pub fn build_list_pets(&self, key: &ApiKey, filter: PetFilter) -> HttpRequest {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("filter", filter.as_str())
            .finish();
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/pets?{query}", self.base_url),
            headers: vec![auth(key)],
            body: None,
        }
    }

    /// `POST /api/pets` as multipart with the photo in `pet_photo`.
    pub fn build_add_new_pet(&self, key: &ApiKey, pet: &NewPet, photo: &PetPhoto) -> HttpRequest {
        let form = pet
            .form_fields()
            .into_iter()
            .fold(MultipartForm::new(), |form, (name, value)| form.text(name, value))
            .file("pet_photo", photo);
        multipart_request(HttpMethod::Post, format!("{}/api/pets", self.base_url), key, form)
    }

    /// `POST /api/create_pet_simple`: same fields as `build_add_new_pet`, no photo.
    pub fn build_add_new_pet_simple(&self, key: &ApiKey, pet: &NewPet) -> HttpRequest {
        form_request(
            HttpMethod::Post,
            format!("{}/api/create_pet_simple", self.base_url),
            key,
            pet,
        )
    }

    pub fn build_set_photo(&self, key: &ApiKey, pet_id: &str, photo: &PetPhoto) -> HttpRequest {
        let form = MultipartForm::new().file("pet_photo", photo);
        multipart_request(
            HttpMethod::Post,
            format!("{}/api/pets/set_photo/{pet_id}", self.base_url),
            key,
            form,
        )
    }

    pub fn build_update_pet_info(&self, key: &ApiKey, pet_id: &str, update: &PetUpdate) -> HttpRequest {
        form_request(
            HttpMethod::Put,
            format!("{}/api/pets/{pet_id}", self.base_url),
            key,
            update,
        )
    }

    pub fn build_delete_pet(&self, key: &ApiKey, pet_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/api/pets/{pet_id}", self.base_url),
            headers: vec![auth(key)],
            body: None,
        }
    }

    /// Pair the status with the body, JSON when it parses and text otherwise.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResponse {
        ApiResponse::from(response)
    }
}

fn auth(key: &ApiKey) -> (String, String) {
    (AUTH_HEADER.to_string(), key.as_str().to_string())
}

fn form_request(method: HttpMethod, url: String, key: &ApiKey, pet: &NewPet) -> HttpRequest {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pet.form_fields() {
        serializer.append_pair(name, &value);
    }
    HttpRequest {
        method,
        url,
        headers: vec![
            auth(key),
            ("content-type".to_string(), FORM_CONTENT_TYPE.to_string()),
        ],
        body: Some(serializer.finish().into_bytes()),
    }
}

fn multipart_request(method: HttpMethod, url: String, key: &ApiKey, form: MultipartForm) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![auth(key), ("content-type".to_string(), form.content_type())],
        body: Some(form.into_body()),
    }
}
