//! In-memory student store. Same contract as the PostgreSQL store; nothing survives a restart.

use super::StudentStore;
use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i32, Student>,
    /// Highest id handed out or explicitly stored; the next generated id is this plus one.
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Student, AppError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|s| s.has_name(name))
            .cloned()
            .collect())
    }

    async fn save(&self, student: &Student) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;
        let mut row = student.clone();
        if row.is_unassigned() {
            let next = inner
                .last_id
                .checked_add(1)
                .ok_or(AppError::IdsExhausted(inner.last_id))?;
            inner.last_id = next;
            row.id = next;
        } else if row.id > inner.last_id {
            inner.last_id = row.id;
        }
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inserted_row_is_found_by_id() {
        let store = MemoryStudentStore::new();
        let saved = store.save(&Student::new("Alice", "1 Main St")).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn save_with_existing_id_replaces_every_column() {
        let store = MemoryStudentStore::new();
        let saved = store.save(&Student::new("Alice", "1 Main St")).await.unwrap();
        let replacement = Student {
            id: saved.id,
            name: Some("Alicia".into()),
            address: None,
        };
        store.save(&replacement).await.unwrap();
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), replacement);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_that_id() {
        let store = MemoryStudentStore::new();
        let explicit = Student {
            id: 42,
            name: Some("Zed".into()),
            address: None,
        };
        assert_eq!(store.save(&explicit).await.unwrap().id, 42);
        assert_eq!(store.find_by_id(42).await.unwrap(), explicit);

        // Generated ids continue past the explicit one.
        let next = store.save(&Student::new("Amy", "3 Elm St")).await.unwrap();
        assert_eq!(next.id, 43);
    }

    #[tokio::test]
    async fn generated_id_past_i32_max_is_an_error() {
        let store = MemoryStudentStore::new();
        let top = Student {
            id: i32::MAX,
            name: Some("Max".into()),
            address: None,
        };
        store.save(&top).await.unwrap();
        let err = store.save(&Student::new("Next", "1 Main St")).await.unwrap_err();
        assert!(matches!(err, AppError::IdsExhausted(i32::MAX)));

        // The store is still usable after the failed insert.
        assert_eq!(store.find_all().await.unwrap(), vec![top]);
    }

    #[tokio::test]
    async fn nameless_rows_never_match_a_name() {
        let store = MemoryStudentStore::new();
        let nameless = Student {
            id: 0,
            name: None,
            address: Some("1 Main St".into()),
        };
        store.save(&nameless).await.unwrap();
        assert!(store.find_by_name("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found_and_repeat_delete_succeeds() {
        let store = MemoryStudentStore::new();
        let saved = store.save(&Student::new("Bob", "2 High St")).await.unwrap();
        store.delete_by_id(saved.id).await.unwrap();
        assert!(matches!(store.find_by_id(saved.id).await, Err(AppError::NotFound(id)) if id == saved.id));
        store.delete_by_id(saved.id).await.unwrap();
    }

    #[tokio::test]
    async fn find_by_name_is_exact_match() {
        let store = MemoryStudentStore::new();
        let a1 = store.save(&Student::new("Alice", "1 Main St")).await.unwrap();
        let a2 = store.save(&Student::new("Alice", "9 Side Rd")).await.unwrap();
        store.save(&Student::new("alice", "1 Main St")).await.unwrap();
        store.save(&Student::new("Alice B", "1 Main St")).await.unwrap();

        let found = store.find_by_name("Alice").await.unwrap();
        assert_eq!(found, vec![a1, a2]);
        assert!(store.find_by_name("Nobody").await.unwrap().is_empty());
    }
}
