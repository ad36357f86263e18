//! Student operations over a record store. One store call per operation.

use crate::error::AppError;
use crate::model::Student;
use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        StudentService { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        self.store.find_all().await
    }

    /// Fetch one student by id. `AppError::NotFound` when absent.
    pub async fn get(&self, id: i32) -> Result<Student, AppError> {
        self.store.find_by_id(id).await
    }

    pub async fn get_all_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        self.store.find_by_name(name).await
    }

    /// Upsert by the student's own id. Returns the stored row.
    pub async fn save(&self, student: &Student) -> Result<Student, AppError> {
        self.store.save(student).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStudentStore;

    fn service() -> StudentService {
        StudentService::new(Arc::new(MemoryStudentStore::new()))
    }

    #[tokio::test]
    async fn save_and_get_round_through_the_store() {
        let svc = service();
        let saved = svc.save(&Student::new("Alice", "1 Main St")).await.unwrap();
        assert_eq!(svc.get(saved.id).await.unwrap(), saved);
        assert_eq!(svc.list_all().await.unwrap(), vec![saved.clone()]);
        assert_eq!(svc.get_all_by_name("Alice").await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn get_absent_is_not_found() {
        assert!(matches!(service().get(5).await, Err(AppError::NotFound(5))));
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let svc = service();
        let other = svc.clone();
        let saved = svc.save(&Student::new("Bob", "2 High St")).await.unwrap();
        other.delete(saved.id).await.unwrap();
        assert!(svc.list_all().await.unwrap().is_empty());
    }
}
