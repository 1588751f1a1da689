//! In-memory accounts and pet records behind the mock API.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "demo@petfriends.test";
pub const DEMO_PASSWORD: &str = "demo-password";

#[derive(Clone, Debug)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password: String,
    pub key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    accounts: Vec<Account>,
    /// Newest first, the order listings are served in.
    pets: Vec<Pet>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// One demo account with no pets, plus a neighbour owning two pets so the
    /// "all pets" listing is never empty.
    pub fn demo() -> Self {
        Self::demo_for(DEMO_EMAIL, DEMO_PASSWORD)
    }

    /// `demo()` with a caller-chosen account in place of the demo one.
    pub fn demo_for(email: &str, password: &str) -> Self {
        let mut store = Self::new();
        store.add_account(email, password);
        let neighbour = store.add_account("neighbour@petfriends.test", "neighbour-password").id.clone();
        store.insert_pet(&neighbour, "Барсик", "кот", 4, String::new());
        store.insert_pet(&neighbour, "Шарик", "пёс", 6, String::new());
        store
    }

    pub fn add_account(&mut self, email: &str, password: &str) -> &Account {
        self.accounts.push(Account {
            id: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            key: Uuid::new_v4().simple().to_string(),
        });
        &self.accounts[self.accounts.len() - 1]
    }

    /// Empty credentials never match, even against an account with an empty
    /// password.
    pub fn login(&self, email: &str, password: &str) -> Option<&Account> {
        if email.is_empty() || password.is_empty() {
            return None;
        }
        self.accounts
            .iter()
            .find(|account| account.email == email && account.password == password)
    }

    pub fn account_by_key(&self, key: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.key == key)
    }

    pub fn insert_pet(&mut self, user_id: &str, name: &str, animal_type: &str, age: u32, pet_photo: String) -> Pet {
        let pet = Pet {
            id: Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
            pet_photo,
            user_id: user_id.to_string(),
            created_at: now(),
        };
        self.pets.insert(0, pet.clone());
        pet
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn pets_of(&self, user_id: &str) -> Vec<Pet> {
        self.pets
            .iter()
            .filter(|pet| pet.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn pet_mut(&mut self, id: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|pet| pet.id == id)
    }

    pub fn pet(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    pub fn remove_pet(&mut self, id: &str) -> Option<Pet> {
        let index = self.pets.iter().position(|pet| pet.id == id)?;
        Some(self.pets.remove(index))
    }
}

fn now() -> String {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", elapsed.as_secs(), elapsed.subsec_micros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_matches_exact_credentials() {
        let store = Store::demo();
        assert!(store.login(DEMO_EMAIL, DEMO_PASSWORD).is_some());
        assert!(store.login(DEMO_EMAIL, "12345").is_none());
        assert!(store.login("incorrect@incorrect", DEMO_PASSWORD).is_none());
    }

    #[test]
    fn empty_credentials_never_log_in() {
        let mut store = Store::new();
        store.add_account("", "");
        assert!(store.login("", "").is_none());
    }

    #[test]
    fn keys_are_stable_per_account() {
        let store = Store::demo();
        let first = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap().key.clone();
        let second = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap().key.clone();
        assert_eq!(first, second);
        assert_eq!(store.account_by_key(&first).unwrap().email, DEMO_EMAIL);
    }

    #[test]
    fn demo_store_has_foreign_pets_only() {
        let store = Store::demo();
        let demo = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert!(store.pets_of(&demo.id).is_empty());
        assert_eq!(store.pets().len(), 2);
    }

    #[test]
    fn newest_pet_is_listed_first() {
        let mut store = Store::new();
        let owner = store.add_account("a@b.c", "pw").id.clone();
        store.insert_pet(&owner, "first", "cat", 1, String::new());
        let second = store.insert_pet(&owner, "second", "cat", 1, String::new());
        assert_eq!(store.pets()[0].id, second.id);
    }

    #[test]
    fn remove_pet_by_id() {
        let mut store = Store::new();
        let owner = store.add_account("a@b.c", "pw").id.clone();
        let pet = store.insert_pet(&owner, "x", "y", 1, String::new());
        assert!(store.remove_pet(&pet.id).is_some());
        assert!(store.remove_pet(&pet.id).is_none());
        assert!(store.pet(&pet.id).is_none());
    }

    #[test]
    fn pet_serializes_age_as_string() {
        let mut store = Store::new();
        let owner = store.add_account("a@b.c", "pw").id.clone();
        let pet = store.insert_pet(&owner, "Рыся", "рысь", 2, String::new());
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["age"], "2");
        assert_eq!(json["name"], "Рыся");
    }
}
