//! Unit of work - transactional boundary around repository calls
//!
//! Repository calls made through [`UnitOfWork::forms`] between
//! `begin_transaction` and `commit_transaction`/`rollback_transaction` share
//! one transaction. Misordered calls are programming errors and fail loudly
//! with [`DbError::InvalidTransition`].

use std::fmt;

use sqlx::SqlitePool;

use formctl_core::{Form, FormId};

use super::{DbError, DbSession, FormRepo};

/// Transaction lifecycle of a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    NotStarted,
    Active,
    Committed,
    RolledBack,
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not-started",
            Self::Active => "active",
            Self::Committed => "committed",
            Self::RolledBack => "rolled-back",
        };
        f.write_str(name)
    }
}

/// One logical operation against the store.
///
/// Dropping it while `Active` rolls the transaction back; the session logs
/// the warning.
pub struct UnitOfWork {
    session: DbSession,
    state: TxState,
}

impl UnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            session: DbSession::new(pool),
            state: TxState::NotStarted,
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    /// Form repository bound to this unit's session.
    pub fn forms(&mut self) -> FormRepo<'_> {
        FormRepo::new(&mut self.session)
    }

    pub async fn begin_transaction(&mut self) -> Result<(), DbError> {
        if self.state == TxState::Active {
            return Err(self.misuse("begin"));
        }
        self.session.begin().await?;
        self.state = TxState::Active;
        Ok(())
    }

    pub async fn commit_transaction(&mut self) -> Result<(), DbError> {
        if self.state != TxState::Active {
            return Err(self.misuse("commit"));
        }
        match self.session.commit().await {
            Ok(()) => {
                self.state = TxState::Committed;
                Ok(())
            }
            Err(e) => {
                // sqlx has consumed the transaction; SQLite discards it
                self.state = TxState::RolledBack;
                Err(e)
            }
        }
    }

    pub async fn rollback_transaction(&mut self) -> Result<(), DbError> {
        if self.state != TxState::Active {
            return Err(self.misuse("rollback"));
        }
        self.state = TxState::RolledBack;
        self.session.rollback().await
    }

    /// No change tracker to flush; always succeeds.
    pub async fn save_changes(&mut self) -> Result<bool, DbError> {
        Ok(true)
    }

    /// Persist a form and all of its fields, or nothing at all.
    pub async fn create_form_atomic(&mut self, form: &Form) -> Result<FormId, DbError> {
        self.begin_transaction().await?;

        match self.forms().create_with_fields(form).await {
            Ok(form_id) => {
                self.commit_transaction().await?;
                tracing::info!(form_id, fields = form.field_count(), "form created");
                Ok(form_id)
            }
            Err(e) => {
                if let Err(rollback_err) = self.rollback_transaction().await {
                    tracing::error!(error = %rollback_err, "rollback after failed form insert failed");
                }
                Err(e)
            }
        }
    }

    fn misuse(&self, op: &'static str) -> DbError {
        tracing::error!(state = %self.state, op, "invalid unit-of-work transition");
        DbError::InvalidTransition {
            from: self.state,
            op,
        }
    }
}
