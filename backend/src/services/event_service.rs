//! Event business logic service.
//!
//! Every operation takes the session claims: admins see and manage all
//! events, customers only their own. Events owned by someone else are
//! reported as not found so their existence is not disclosed.

use crate::config::Config;
use crate::database::models::{CreateEvent, CreateNewEvent, Event, EventResponse};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::event_repository::EventRepository;
use crate::services::customer_service::CustomerService;
use crate::utils::jwt::Claims;
use crate::utils::new_id;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

/// Service layer for event operations.
pub struct EventService<'a> {
    pool: &'a SqlitePool,
    config: &'a Config,
}

impl<'a> EventService<'a> {
    /// Creates a new EventService instance.
    pub fn new(pool: &'a SqlitePool, config: &'a Config) -> Self {
        Self { pool, config }
    }

    /// Creates an event for the selected customer.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (empty title, past date, missing customer)
    /// - A customer session booking for someone else
    /// - A customer that does not exist
    pub async fn create_event(
        &self,
        claims: &Claims,
        request: CreateNewEvent,
    ) -> ServiceResult<Event> {
        let request = request.normalized();
        request.validate()?;

        let customer_id = request.cust.c_id;
        if !claims.can_access_customer(&customer_id) {
            return Err(ServiceError::permission_denied(
                "Customers can only book events for themselves",
            ));
        }

        CustomerService::new(self.pool, self.config)
            .get_customer_required(&customer_id)
            .await?;

        let repo = EventRepository::new(self.pool);
        let event = repo
            .create_event(CreateEvent {
                id: new_id(),
                title: request.title,
                date: request.date,
                opts: request.opts,
                customer_id,
            })
            .await?;

        info!(
            "Event {} ('{}' on {}) created for customer {} by {} {}",
            event.id,
            event.title,
            event.date.format("%Y-%m-%d"),
            event.customer_id,
            claims.role(),
            claims.user_id()
        );
        Ok(event)
    }

    /// Lists the events visible to the session, ordered by date.
    pub async fn list_events(&self, claims: &Claims) -> ServiceResult<Vec<EventResponse>> {
        let repo = EventRepository::new(self.pool);
        let scope = if claims.is_admin() {
            None
        } else {
            Some(claims.customer_id().ok_or_else(|| {
                ServiceError::permission_denied("Session is not bound to a customer")
            })?)
        };

        let events = repo.list_events(scope).await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// Retrieves one event with its customer populated.
    pub async fn get_event(&self, claims: &Claims, id: &str) -> ServiceResult<EventResponse> {
        let repo = EventRepository::new(self.pool);
        let event = repo
            .get_event_with_customer(id)
            .await?
            .filter(|event| claims.can_access_customer(&event.c_id))
            .ok_or_else(|| ServiceError::not_found("Event", id))?;

        Ok(EventResponse::from(event))
    }

    /// Deletes an event.
    pub async fn delete_event(&self, claims: &Claims, id: &str) -> ServiceResult<()> {
        let repo = EventRepository::new(self.pool);

        let event = repo
            .get_event_by_id(id)
            .await?
            .filter(|event| claims.can_access_customer(&event.customer_id))
            .ok_or_else(|| ServiceError::not_found("Event", id))?;

        if !repo.delete_event(&event.id).await? {
            return Err(ServiceError::not_found("Event", id));
        }

        info!("Event {} deleted by {} {}", id, claims.role(), claims.user_id());
        Ok(())
    }
}
