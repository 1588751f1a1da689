//! Scenario procedures shared by the mock-backed and live suites.
//!
//! Each scenario takes a `Suite` (an API handle plus the account under test),
//! performs one call sequence and asserts the status and payload. Scenarios
//! that need an existing pet create one first when the account has none, so
//! they tolerate a pre-populated account.
#![allow(dead_code)]

use petfriends_core::{ApiKey, Credentials, Pet, PetFilter, PetFriends, PetList};

use crate::helpers::image;

pub const VALID_PHOTO: &str = "ryska.jpg";
pub const SPARE_PHOTO: &str = "murka.jpg";
pub const INVALID_PHOTO: &str = "cat.jpg";

pub struct Suite {
    pub api: PetFriends,
    pub credentials: Credentials,
}

impl Suite {
    pub fn new(api: PetFriends, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    pub fn key(&self) -> ApiKey {
        let resp = self
            .api
            .get_api_key(&self.credentials.email, &self.credentials.password)
            .unwrap();
        assert_eq!(resp.status, 200, "login failed: {:?}", resp.body);
        resp.api_key().expect("login response has no key")
    }

    pub fn pets(&self, key: &ApiKey, filter: PetFilter) -> PetList {
        let resp = self.api.get_list_of_pets(key, filter).unwrap();
        assert_eq!(resp.status, 200, "listing failed: {:?}", resp.body);
        resp.json().unwrap()
    }

    /// First of the caller's pets, creating one if the account has none.
    pub fn ensure_my_pet(&self, key: &ApiKey) -> Pet {
        let mine = self.pets(key, PetFilter::MyPets);
        if let Some(pet) = mine.pets.into_iter().next() {
            return pet;
        }
        let resp = self
            .api
            .add_new_pet(key, "Мурка", "кошка", 1, image(SPARE_PHOTO))
            .unwrap();
        assert_eq!(resp.status, 200, "setup pet creation failed: {:?}", resp.body);
        self.pets(key, PetFilter::MyPets)
            .pets
            .into_iter()
            .next()
            .expect("created pet missing from my_pets")
    }
}

fn assert_key_rejected(suite: &Suite, email: &str, password: &str) {
    let resp = suite.api.get_api_key(email, password).unwrap();
    assert_eq!(resp.status, 403);
    assert!(!resp.has_field("key"));
}

fn assert_add_rejected(suite: &Suite, name: &str, animal_type: &str, age: u64, photo: &str) {
    let key = suite.key();
    let resp = suite
        .api
        .add_new_pet(&key, name, animal_type, age, image(photo))
        .unwrap();
    assert_eq!(resp.status, 400, "expected rejection, got {:?}", resp.body);
}

pub fn get_api_key_for_valid_user(suite: &Suite) {
    let resp = suite
        .api
        .get_api_key(&suite.credentials.email, &suite.credentials.password)
        .unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.has_field("key"));
}

pub fn get_all_pets_with_valid_key(suite: &Suite) {
    let key = suite.key();
    let resp = suite.api.get_list_of_pets(&key, PetFilter::All).unwrap();
    assert_eq!(resp.status, 200);
    let list: PetList = resp.json().unwrap();
    assert!(!list.pets.is_empty());
}

pub fn add_new_pet_with_valid_data(suite: &Suite) {
    let key = suite.key();
    let resp = suite
        .api
        .add_new_pet(&key, "Рыся", "рысь", 2, image(VALID_PHOTO))
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.str_field("name"), Some("Рыся"));
}

pub fn delete_self_pet_successful(suite: &Suite) {
    let key = suite.key();
    let pet = suite.ensure_my_pet(&key);

    let resp = suite.api.delete_pet(&key, &pet.id).unwrap();
    assert_eq!(resp.status, 200);

    let mine = suite.pets(&key, PetFilter::MyPets);
    assert!(!mine.contains(&pet.id), "pet {} still listed", pet.id);
}

pub fn update_my_pet_successful(suite: &Suite) {
    let key = suite.key();
    let pet = suite.ensure_my_pet(&key);

    // An identical update is rejected, so move the age if the pet already matches.
    let age = if pet.name == "Жучка" && pet.animal_type == "собака" && pet.age_value() == Some(3) {
        4
    } else {
        3
    };
    let resp = suite
        .api
        .update_pet_info(&key, &pet.id, "Жучка", "собака", age)
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.str_field("name"), Some("Жучка"));
}

pub fn get_api_key_for_invalid_email(suite: &Suite) {
    assert_key_rejected(suite, "incorrect@incorrect", &suite.credentials.password);
}

pub fn get_api_key_for_empty_email(suite: &Suite) {
    assert_key_rejected(suite, "", &suite.credentials.password);
}

pub fn get_api_key_for_invalid_password(suite: &Suite) {
    assert_key_rejected(suite, &suite.credentials.email, "12345");
}

pub fn get_api_key_for_empty_password(suite: &Suite) {
    assert_key_rejected(suite, &suite.credentials.email, "");
}

pub fn add_new_pet_with_invalid_age(suite: &Suite) {
    assert_add_rejected(suite, "Мурка", "кошка", 9_783_827_382_738, SPARE_PHOTO);
}

pub fn add_new_pet_with_invalid_photo(suite: &Suite) {
    assert_add_rejected(suite, "Мурка", "кошка", 1, INVALID_PHOTO);
}

pub fn add_new_pet_without_name(suite: &Suite) {
    assert_add_rejected(suite, "", "кошка", 1, SPARE_PHOTO);
}

pub fn add_new_pet_without_animal_type(suite: &Suite) {
    assert_add_rejected(suite, "Мурка", "", 2, SPARE_PHOTO);
}

pub fn update_my_pet_with_the_same_data(suite: &Suite) {
    let key = suite.key();
    let pet = suite.ensure_my_pet(&key);
    let age = pet.age_value().expect("stored age is not numeric");

    let resp = suite
        .api
        .update_pet_info(&key, &pet.id, &pet.name, &pet.animal_type, age)
        .unwrap();
    assert_eq!(resp.status, 400);
}

pub fn add_new_pet_simple_without_photo(suite: &Suite) {
    let key = suite.key();
    let resp = suite.api.add_new_pet_simple(&key, "Барбос", "пёс", 5).unwrap();
    assert_eq!(resp.status, 200);
    let pet: Pet = resp.json().unwrap();
    assert_eq!(pet.name, "Барбос");
    assert_eq!(pet.age_value(), Some(5));
    assert!(pet.pet_photo.is_empty());
}

pub fn set_photo_for_my_pet(suite: &Suite) {
    let key = suite.key();
    let pet = suite.ensure_my_pet(&key);
    let resp = suite.api.set_photo(&key, &pet.id, image(VALID_PHOTO)).unwrap();
    assert_eq!(resp.status, 200);
    let updated: Pet = resp.json().unwrap();
    assert_eq!(updated.id, pet.id);
    assert!(!updated.pet_photo.is_empty());
}

pub fn get_my_pets_with_invalid_key(suite: &Suite) {
    let resp = suite
        .api
        .get_list_of_pets(&ApiKey::new("invalid-key"), PetFilter::MyPets)
        .unwrap();
    assert_eq!(resp.status, 403);
    assert!(!resp.has_field("pets"));
}

/// Expand to one `#[test]` per scenario, each built from `$suite()`.
macro_rules! scenario_tests {
    ($suite:ident: $($name:ident),+ $(,)?) => {
        $(
            #[test]
            fn $name() {
                crate::helpers::init_tracing();
                crate::scenarios::$name(&$suite());
            }
        )+
    };
}

pub(crate) use scenario_tests;
