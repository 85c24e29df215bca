//! `PostgreSQL` store implementation for task assignment.

use super::{
    models::{NewTaskRow, TaskRow, UserRow},
    schema::{tasks, users},
};
use crate::assignment::{
    domain::{NewTask, PersistedTaskData, Priority, Task, TaskId, TaskState, User, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the assignment adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::storage)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::storage)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn create_task(&self, draft: &NewTask) -> TaskStoreResult<Task> {
        let new_row = NewTaskRow {
            owner_id: draft.owner_id().into_inner(),
            text: draft.text().to_owned(),
            priority: draft.priority().as_str().to_owned(),
            assigned_by_name: draft.assigned_by_name().to_owned(),
            assigned_by_id: draft.assigned_by_id().into_inner(),
            created_at: draft.created_at(),
            last_reminder_sent_at: None,
            state: TaskState::Open.as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskStoreError::storage)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::storage)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_open_tasks_by_owner(&self, owner_id: UserId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .filter(tasks::state.eq(TaskState::Open.as_str()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::storage)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_all_open_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::state.eq(TaskState::Open.as_str()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::storage)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn set_state(&self, id: TaskId, state: TaskState) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(tasks::state.eq(state.as_str()))
                .execute(connection)
                .map_err(TaskStoreError::storage)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn set_last_reminder_sent(
        &self,
        id: TaskId,
        sent_at: DateTime<Utc>,
    ) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            // The predicate keeps the stored timestamp monotonic: an older
            // value matches no row and is dropped.
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(
                        tasks::last_reminder_sent_at
                            .is_null()
                            .or(tasks::last_reminder_sent_at.le(sent_at)),
                    ),
            )
            .set(tasks::last_reminder_sent_at.eq(sent_at))
            .execute(connection)
            .map_err(TaskStoreError::storage)?;
            if updated == 0 {
                let exists = diesel::select(diesel::dsl::exists(
                    tasks::table.filter(tasks::id.eq(id.into_inner())),
                ))
                .get_result::<bool>(connection)
                .map_err(TaskStoreError::storage)?;
                if !exists {
                    return Err(TaskStoreError::NotFound(id));
                }
            }
            Ok(())
        })
        .await
    }

    async fn upsert_user(&self, user: &User) -> TaskStoreResult<()> {
        let row = UserRow {
            id: user.id().into_inner(),
            display_name: user.display_name().to_owned(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .on_conflict(users::id)
                .do_update()
                .set(users::display_name.eq(&row.display_name))
                .execute(connection)
                .map_err(TaskStoreError::storage)?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> TaskStoreResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(TaskStoreError::storage)?;
            Ok(row.map(|user| User::new(UserId::new(user.id), user.display_name)))
        })
        .await
    }
}

/// Converts a stored row into the task aggregate.
fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let priority = Priority::try_from(row.priority.as_str()).map_err(TaskStoreError::storage)?;
    let state = TaskState::try_from(row.state.as_str()).map_err(TaskStoreError::storage)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id),
        owner_id: UserId::new(row.owner_id),
        text: row.text,
        priority,
        assigned_by_name: row.assigned_by_name,
        assigned_by_id: UserId::new(row.assigned_by_id),
        created_at: row.created_at,
        last_reminder_sent_at: row.last_reminder_sent_at,
        state,
    }))
}
