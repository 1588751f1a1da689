//! Blocking PetFriends API bound to a transport.
//!
//! Every method returns `Ok(ApiResponse)` for any HTTP status. `Err` means no
//! response was obtained or a local photo file could not be read.

use std::path::Path;

use tracing::debug;

use crate::client::PetFriendsClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::response::ApiResponse;
use crate::settings::Settings;
use crate::transport::{Transport, UreqTransport};
use crate::types::{ApiKey, Credentials, NewPet, PetFilter, PetPhoto, PetUpdate};

#[derive(Debug, Clone)]
pub struct PetFriends<T = UreqTransport> {
    client: PetFriendsClient,
    transport: T,
}

impl PetFriends<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.base_url)
    }
}

impl<T: Transport> PetFriends<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: PetFriendsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    pub fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_api_key(&Credentials::new(email, password)))
    }

    pub fn get_list_of_pets(&self, key: &ApiKey, filter: PetFilter) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_list_pets(key, filter))
    }

    pub fn add_new_pet(
        &self,
        key: &ApiKey,
        name: &str,
        animal_type: &str,
        age: u64,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PetPhoto::from_path(photo_path)?;
        let pet = NewPet::new(name, animal_type, age);
        self.send(self.client.build_add_new_pet(key, &pet, &photo))
    }

    pub fn add_new_pet_simple(
        &self,
        key: &ApiKey,
        name: &str,
        animal_type: &str,
        age: u64,
    ) -> Result<ApiResponse, ApiError> {
        let pet = NewPet::new(name, animal_type, age);
        self.send(self.client.build_add_new_pet_simple(key, &pet))
    }

    pub fn set_photo(
        &self,
        key: &ApiKey,
        pet_id: &str,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PetPhoto::from_path(photo_path)?;
        self.send(self.client.build_set_photo(key, pet_id, &photo))
    }

    pub fn update_pet_info(
        &self,
        key: &ApiKey,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: u64,
    ) -> Result<ApiResponse, ApiError> {
        let update = PetUpdate::new(name, animal_type, age);
        self.send(self.client.build_update_pet_info(key, pet_id, &update))
    }

    pub fn delete_pet(&self, key: &ApiKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_delete_pet(key, pet_id))
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        let response = self.transport.execute(request)?;
        debug!(method, url = %url, status = response.status, "petfriends request");
        Ok(self.client.parse_response(response))
    }
}
