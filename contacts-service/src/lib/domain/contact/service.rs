use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::contact::ports::ContactServicePort;

/// Domain service implementation for contact operations.
pub struct ContactService<CR>
where
    CR: ContactRepository,
{
    repository: Arc<CR>,
}

impl<CR> ContactService<CR>
where
    CR: ContactRepository,
{
    /// Create a new contact service with an injected repository.
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ContactServicePort for ContactService<CR>
where
    CR: ContactRepository,
{
    async fn create_contact(
        &self,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError> {
        let contact = Contact {
            id: ContactId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            created_at: Utc::now(),
        };

        self.repository.create(contact).await
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ContactError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id.to_string()))
    }

    async fn list_contacts(&self, skip: i64, limit: i64) -> Result<Vec<Contact>, ContactError> {
        self.repository.list(limit, skip).await
    }

    async fn update_contact(
        &self,
        id: &ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError> {
        let mut contact = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id.to_string()))?;

        if let Some(first_name) = command.first_name {
            contact.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            contact.last_name = last_name;
        }

        if let Some(email) = command.email {
            contact.email = Some(email);
        }

        if let Some(phone) = command.phone {
            contact.phone = Some(phone);
        }

        self.repository.update(contact).await
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<Contact, ContactError> {
        let contact = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id.to_string()))?;

        self.repository.delete(id).await?;

        Ok(contact)
    }
}
