use crate::entities::task;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, TransactionTrait,
};
use std::sync::Arc;

/// A change staged by [`TaskRepository`] and applied on the next [`TaskRepository::save`].
#[derive(Debug)]
enum PendingChange {
    Insert(task::ActiveModel),
    Update(task::ActiveModel),
    Delete(i32),
}

/// CRUD primitives over the `tasks` table.
///
/// Reads go straight to the store. Writes are staged in memory and applied
/// together, inside a single transaction, by [`TaskRepository::save`].
#[derive(Debug)]
pub struct TaskRepository {
    db: Arc<DatabaseConnection>,
    pending: Vec<PendingChange>,
    inserted: Vec<task::Model>,
}

impl TaskRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            pending: Vec::new(),
            inserted: Vec::new(),
        }
    }

    /// Retrieves every task in store order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find().all(self.db.as_ref()).await
    }

    /// Looks a task up by primary key. A missing row is `Ok(None)`.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<task::Model>, DbErr> {
        task::Entity::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Stages a new task for insertion. The id is assigned by the store on save.
    #[tracing::instrument(skip(self, task))]
    pub fn add(&mut self, task: task::ActiveModel) {
        self.pending.push(PendingChange::Insert(task));
    }

    /// Stages a full-row update of an already loaded task.
    #[tracing::instrument(skip(self, task), fields(id = task.id))]
    pub fn update(&mut self, task: task::Model) {
        let active_model = task.into_active_model().reset_all();
        self.pending.push(PendingChange::Update(active_model));
    }

    /// Stages removal of the task with the given id.
    ///
    /// Returns `false` without staging anything when no such task exists, so
    /// deleting an already removed row is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, id: i32) -> Result<bool, DbErr> {
        match self.get(id).await? {
            Some(existing) => {
                self.pending.push(PendingChange::Delete(existing.id));
                Ok(true)
            }
            None => {
                tracing::debug!("Task {} is already gone, nothing to delete", id);
                Ok(false)
            }
        }
    }

    /// Returns whether any change is waiting for [`TaskRepository::save`].
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Rows inserted by the most recent successful save, in staging order.
    pub fn inserted(&self) -> &[task::Model] {
        &self.inserted
    }

    /// Applies every staged change in one transaction.
    ///
    /// # Returns
    ///
    /// The number of rows affected. Nothing is committed if any change fails;
    /// the staged changes are discarded either way.
    #[tracing::instrument(skip(self), fields(pending = self.pending.len()))]
    pub async fn save(&mut self) -> Result<u64, DbErr> {
        let pending = std::mem::take(&mut self.pending);
        self.inserted.clear();
        if pending.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let mut affected = 0;
        let mut inserted = Vec::new();
        for change in pending {
            match change {
                PendingChange::Insert(active_model) => {
                    inserted.push(active_model.insert(&txn).await?);
                    affected += 1;
                }
                PendingChange::Update(active_model) => {
                    active_model.update(&txn).await?;
                    affected += 1;
                }
                PendingChange::Delete(id) => {
                    let result = task::Entity::delete_by_id(id).exec(&txn).await?;
                    affected += result.rows_affected;
                }
            }
        }
        txn.commit().await?;

        tracing::debug!("Saved {} task change(s)", affected);
        self.inserted = inserted;
        Ok(affected)
    }
}
