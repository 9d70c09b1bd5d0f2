//! User Control
//!
//! Priority-filtered lookup and mutation over a shared record store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::context::RequestContext;
use super::envelope::Envelope;
use super::errors::{ControlError, ControlResult};
use super::operation::Operation;
use crate::record::Record;
use crate::store::{Filter, RecordStore, StoreError};

/// Controller for user records.
///
/// Cheap to share: many requests may run against one `Control` concurrently.
/// No operation spans more than one store call atomically.
pub struct Control {
    store: Arc<dyn RecordStore>,
}

impl Control {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Run `op` with the given template
    pub async fn invoke(
        &self,
        op: Operation,
        ctx: &RequestContext,
        template: Option<Record>,
    ) -> ControlResult<Envelope> {
        match op {
            Operation::Create => self.create(ctx, template).await,
            Operation::Get => self.get(ctx, template).await,
            Operation::Delete => self.delete(ctx, template).await,
            Operation::DeleteMany => self.delete_many(ctx, template).await,
        }
    }

    /// Insert a new user with a fresh id and the current time.
    ///
    /// Any `id` or `timestamp` on the template is overwritten.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        template: Option<Record>,
    ) -> ControlResult<Envelope> {
        let mut record = require(template, Operation::Create)?;
        record.id = Uuid::new_v4().to_string();
        record.timestamp = Some(Utc::now());

        let id = record.id.clone();
        self.store.insert(record).await?;

        tracing::info!(request_id = %ctx.request_id, id = %id, "user created");
        Ok(Envelope::created(id))
    }

    /// All users matching the template, newest first
    pub async fn get(
        &self,
        ctx: &RequestContext,
        template: Option<Record>,
    ) -> ControlResult<Envelope> {
        let template = require(template, Operation::Get)?;
        let users = self.find(&template, true).await?;

        tracing::debug!(request_id = %ctx.request_id, count = users.len(), "users fetched");
        Ok(Envelope::users(users))
    }

    /// Remove the newest user matching the template
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        template: Option<Record>,
    ) -> ControlResult<Envelope> {
        let template = require(template, Operation::Delete)?;
        let users = self.find(&template, false).await?;

        for user in &users {
            self.store.remove_by_id(&user.id).await?;
            tracing::info!(request_id = %ctx.request_id, id = %user.id, "user deleted");
        }
        Ok(Envelope::deleted(users.len()))
    }

    /// Remove every user matching the template.
    ///
    /// Stops at the first failed removal; earlier removals stand. Records
    /// inserted after the match snapshot are left alone.
    pub async fn delete_many(
        &self,
        ctx: &RequestContext,
        template: Option<Record>,
    ) -> ControlResult<Envelope> {
        let template = require(template, Operation::DeleteMany)?;
        let users = self.find(&template, true).await?;

        for (removed, user) in users.iter().enumerate() {
            if let Err(err) = self.store.remove_by_id(&user.id).await {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    id = %user.id,
                    removed,
                    remaining = users.len() - removed,
                    error = %err,
                    "delete_many stopped early"
                );
                return Err(err.into());
            }
        }

        tracing::info!(request_id = %ctx.request_id, count = users.len(), "users deleted");
        Ok(Envelope::deleted(users.len()))
    }

    /// Records selected by the template's highest-priority field.
    ///
    /// Returns only the newest match unless `many` is set.
    async fn find(&self, template: &Record, many: bool) -> ControlResult<Vec<Record>> {
        let filter = Filter::from_template(template);
        let query = self
            .store
            .find(filter.clone())
            .sort_by_created_at_descending();

        if query.count().await? == 0 {
            return Err(ControlError::NotFound(filter.to_string()));
        }

        let users = if many {
            query.all().await?
        } else {
            match query.one().await {
                Ok(user) => vec![user],
                Err(StoreError::NoMatch) => Vec::new(),
                Err(err) => return Err(err.into()),
            }
        };

        // A concurrent delete can empty the match set between count and fetch.
        if users.is_empty() {
            return Err(ControlError::NotFound(filter.to_string()));
        }
        Ok(users)
    }
}

fn require(template: Option<Record>, op: Operation) -> ControlResult<Record> {
    template.ok_or_else(|| ControlError::invalid_input(format!("{}: missing template", op)))
}
