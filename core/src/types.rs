//! Domain types for the PetFriends API.
//!
//! # Design
//! Pet records are server-owned; these types only describe what travels over
//! the wire. Ages are numeric on the way in and strings on the way out, which
//! is how the service itself treats them.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Login credentials. Empty fields are legitimate negative-test inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Opaque token sent in the `auth_key` header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Listing scope for `GET /api/pets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetFilter {
    #[default]
    All,
    MyPets,
}

impl PetFilter {
    /// Value of the `filter` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

/// A pet record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_at: String,
}

impl Pet {
    /// The age as a number, if the server stored one.
    pub fn age_value(&self) -> Option<u64> {
        self.age.trim().parse().ok()
    }
}

/// Body of a successful listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn contains(&self, pet_id: &str) -> bool {
        self.pets.iter().any(|pet| pet.id == pet_id)
    }
}

/// Fields submitted when creating a pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub animal_type: String,
    pub age: u64,
}

impl NewPet {
    pub fn new(name: impl Into<String>, animal_type: impl Into<String>, age: u64) -> Self {
        Self {
            name: name.into(),
            animal_type: animal_type.into(),
            age,
        }
    }

    pub(crate) fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            ("name", self.name.clone()),
            ("animal_type", self.animal_type.clone()),
            ("age", self.age.to_string()),
        ]
    }
}

/// Editable fields of an existing pet. The service replaces all three.
pub type PetUpdate = NewPet;

/// An image read from disk, ready to be sent as the `pet_photo` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetPhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PetPhoto {
    /// Read a photo file. The content type is guessed from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ApiError::PhotoError {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo.jpg".to_string());
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("image/jpeg")
            .to_string();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value,
        StringOrNumber::Number(value) => value.to_string(),
    })
}
