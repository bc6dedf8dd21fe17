use async_trait::async_trait;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::UpdateContactCommand;

/// Port for contact domain service operations.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// Create a new contact.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_contact(&self, command: CreateContactCommand)
        -> Result<Contact, ContactError>;

    /// Retrieve a contact by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ContactError>;

    /// List contacts with pagination.
    ///
    /// # Arguments
    /// * `skip` - Number of contacts to skip
    /// * `limit` - Maximum number of contacts to return
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_contacts(&self, skip: i64, limit: i64) -> Result<Vec<Contact>, ContactError>;

    /// Update an existing contact with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_contact(
        &self,
        id: &ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// Delete an existing contact.
    ///
    /// # Returns
    /// The deleted contact entity
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_contact(&self, id: &ContactId) -> Result<Contact, ContactError>;
}

/// Persistence operations for the contact aggregate.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Persist a new contact to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// Retrieve a contact by identifier.
    ///
    /// # Returns
    /// Optional contact entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactError>;

    /// Retrieve a page of contacts ordered by creation time.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Contact>, ContactError>;

    /// Update an existing contact in storage.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// Remove a contact from storage.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ContactId) -> Result<(), ContactError>;
}
