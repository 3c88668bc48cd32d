//! In-memory user store backing the users resource.

use crate::{
    error::ApiError,
    models::user::{User, UserRequest},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

#[derive(Default)]
struct Inner {
    next_id: u32,
    users: BTreeMap<u32, User>,
}

/// Thread-safe user store keyed by sequential ids starting at 1.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<Mutex<Inner>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The map is never left half-updated, so a poisoned lock is usable
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn create(&self, request: UserRequest) -> Result<User, ApiError> {
        let mut inner = self.lock();
        let id = inner
            .next_id
            .checked_add(1)
            .ok_or_else(|| ApiError::Internal("user id space exhausted".to_string()))?;
        inner.next_id = id;

        let user = User {
            id,
            name: request.name,
            sex: request.sex,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    /// All users ordered by id.
    pub fn find_all(&self) -> Vec<User> {
        self.lock().users.values().cloned().collect()
    }

    pub fn find_one(&self, id: u32) -> Result<User, ApiError> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }

    pub fn update(&self, id: u32, request: UserRequest) -> Result<User, ApiError> {
        let mut inner = self.lock();
        let user = inner.users.get_mut(&id).ok_or(ApiError::NotFound(id))?;
        user.name = request.name;
        user.sex = request.sex;
        Ok(user.clone())
    }

    pub fn remove(&self, id: u32) -> Result<User, ApiError> {
        self.lock().users.remove(&id).ok_or(ApiError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Sex;

    fn request(name: &str, sex: Sex) -> UserRequest {
        UserRequest {
            name: name.to_string(),
            sex,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = UserStore::new();
        let first = store.create(request("Ana", Sex::Femenino)).unwrap();
        let second = store.create(request("Luis", Sex::Masculino)).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.find_all(), vec![first, second]);
    }

    #[test]
    fn update_and_remove() {
        let store = UserStore::new();
        let user = store.create(request("Ana", Sex::Femenino)).unwrap();

        let updated = store.update(user.id, request("Ana María", Sex::Femenino)).unwrap();
        assert_eq!(updated.name, "Ana María");
        assert_eq!(store.find_one(user.id).unwrap(), updated);

        store.remove(user.id).unwrap();
        assert!(matches!(store.find_one(user.id), Err(ApiError::NotFound(1))));
    }

    #[test]
    fn missing_ids_are_not_found() {
        let store = UserStore::new();
        assert!(matches!(
            store.update(9, request("Ana", Sex::Femenino)),
            Err(ApiError::NotFound(9))
        ));
        assert!(matches!(store.remove(9), Err(ApiError::NotFound(9))));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let store = UserStore::new();
        let first = store.create(request("Ana", Sex::Femenino)).unwrap();
        store.remove(first.id).unwrap();
        let second = store.create(request("Luis", Sex::Masculino)).unwrap();
        assert_eq!(second.id, 2);
    }
}
