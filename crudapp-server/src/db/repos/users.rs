//! User repository
//!
//! Full-table list, insert, replace-by-id and delete-by-id. Update and
//! delete do not check whether the id exists.

use crate::db::connector::{Connector, DbError, Row, SqlValue};
use crate::models::{User, UserFields};

pub(crate) const SELECT_USERS: &str = "SELECT * FROM users";
pub(crate) const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES (?, ?)";
pub(crate) const UPDATE_USER: &str = "UPDATE users SET name = ?, email = ? WHERE id = ?";
pub(crate) const DELETE_USER: &str = "DELETE FROM users WHERE id = ?";

/// User repository
pub struct UserRepo<'a> {
    connector: &'a dyn Connector,
}

impl<'a> UserRepo<'a> {
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self { connector }
    }

    /// Every row in the table, in whatever order the database returns them.
    pub async fn list(&self) -> Result<Vec<Row>, DbError> {
        self.connector
            .execute(SELECT_USERS, &[])
            .await?
            .into_rows()
    }

    /// Insert a user and echo the input alongside the generated id.
    pub async fn create(&self, fields: UserFields) -> Result<User, DbError> {
        let id = self
            .connector
            .execute(
                INSERT_USER,
                &[SqlValue::from(fields.name()), SqlValue::from(fields.email())],
            )
            .await?
            .into_inserted_id()?;

        let id = i64::try_from(id).map_err(|_| DbError::IdOutOfRange(id.to_string()))?;
        let (name, email) = fields.into_parts();
        Ok(User { id, name, email })
    }

    /// Replace name and email of `id`. Zero matched rows is still success.
    pub async fn update(&self, id: i64, fields: &UserFields) -> Result<(), DbError> {
        let outcome = self
            .connector
            .execute(
                UPDATE_USER,
                &[
                    SqlValue::from(fields.name()),
                    SqlValue::from(fields.email()),
                    SqlValue::from(id),
                ],
            )
            .await?;
        tracing::debug!(id, ?outcome, "user updated");
        Ok(())
    }

    /// Delete `id`. Zero matched rows is still success.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let outcome = self
            .connector
            .execute(DELETE_USER, &[SqlValue::from(id)])
            .await?;
        tracing::debug!(id, ?outcome, "user deleted");
        Ok(())
    }
}
