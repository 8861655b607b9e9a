//! # Almacenamiento de Usuarios
//! src/user/store.rs
//!
//! Store en memoria compartido entre los threads del servidor. Clonar el
//! handle comparte el mismo mapa.

use super::{User, UserError};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Handle al store de usuarios
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un usuario nuevo
    ///
    /// Si el id ya existe retorna `DuplicateUserId` y el usuario guardado
    /// queda intacto.
    pub fn add(&self, user: User) -> Result<(), UserError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);

        if users.contains_key(&user.user_id) {
            return Err(UserError::DuplicateUserId(user.user_id));
        }

        users.insert(user.user_id.clone(), user);
        Ok(())
    }

    pub fn find_by_id(&self, user_id: &str) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    /// Todos los usuarios ordenados por id
    pub fn all(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        users
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_add_and_find() {
        let store = UserStore::new();
        store.add(User::new("someId", "password", "name", "email")).unwrap();

        let user = store.find_by_id("someId").unwrap();
        assert_eq!(user.name, "name");
        assert!(store.find_by_id("other").is_none());
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let store = UserStore::new();
        store.add(User::new("someId", "123", "이름", "email@emart")).unwrap();

        let result = store.add(User::new("someId", "password", "name", "email"));
        assert_eq!(result, Err(UserError::DuplicateUserId("someId".to_string())));

        let user = store.find_by_id("someId").unwrap();
        assert_eq!(user.name, "이름");
        assert!(user.matches_password("123"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_all_sorted_by_id() {
        let store = UserStore::new();
        store.add(User::new("zed", "p", "Z", "z@x")).unwrap();
        store.add(User::new("amy", "p", "A", "a@x")).unwrap();

        let ids: Vec<String> = store.all().into_iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec!["amy", "zed"]);
    }

    #[test]
    fn test_clones_share_state() {
        let store = UserStore::new();
        let handle = store.clone();

        let t = thread::spawn(move || {
            handle.add(User::new("t", "p", "T", "t@x")).unwrap();
        });
        t.join().unwrap();

        assert!(store.find_by_id("t").is_some());
        assert!(!store.is_empty());
    }
}
