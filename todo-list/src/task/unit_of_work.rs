use super::repository::TaskRepository;
use super::search::SearchRepository;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

/// Per-request pairing of the task and search repositories over one store handle.
///
/// Created when a request arrives and dropped with the response; nothing is
/// shared between requests except the connection pool.
#[derive(Debug)]
pub struct UnitOfWork {
    tasks: TaskRepository,
    search: SearchRepository,
}

impl UnitOfWork {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            tasks: TaskRepository::new(db.clone()),
            search: SearchRepository::new(db),
        }
    }

    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskRepository {
        &mut self.tasks
    }

    pub fn search(&self) -> &SearchRepository {
        &self.search
    }

    /// Commits everything staged through [`UnitOfWork::tasks_mut`].
    pub async fn save(&mut self) -> Result<u64, DbErr> {
        self.tasks.save().await
    }
}
