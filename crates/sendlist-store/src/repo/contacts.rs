use crate::error::{Result, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use sendlist_core::domain::{Contact, ContactId, OwnerName};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ContactNew {
    pub owner: OwnerName,
    /// Raw phone as typed; normalized before it is stored.
    pub phone: String,
    pub display_name: Option<String>,
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(
        &self,
        now_utc: i64,
        input: ContactNew,
        default_country_code: Option<&str>,
    ) -> Result<Contact> {
        let phone = Contact::phone_for_storage(&input.phone, default_country_code)?;
        let display_name = input
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let tx = self.conn.unchecked_transaction()?;
        let existing: Option<String> = tx
            .query_row(
                "SELECT id FROM contacts WHERE owner = ?1 AND phone = ?2;",
                params![input.owner.as_str(), phone],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::DuplicateContact(phone));
        }

        let contact = Contact {
            id: ContactId::new(),
            owner: input.owner,
            phone,
            display_name,
            created_at: now_utc,
        };
        tx.execute(
            "INSERT INTO contacts (id, owner, phone, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                contact.id.to_string(),
                contact.owner.as_str(),
                contact.phone,
                contact.display_name,
                contact.created_at,
            ],
        )?;
        tx.commit()?;
        Ok(contact)
    }

    pub fn get(&self, id: ContactId) -> Result<Contact> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, phone, display_name, created_at FROM contacts WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => contact_from_row(row),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    pub fn list_for_owner(&self, owner: &OwnerName) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, phone, display_name, created_at
             FROM contacts
             WHERE owner = ?1
             ORDER BY created_at ASC, phone ASC;",
        )?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(contact_from_row(row)?);
        }
        Ok(contacts)
    }

    /// Normalized phones already known for `owner`; the snapshot a dedupe run
    /// is checked against.
    pub fn phones_for_owner(&self, owner: &OwnerName) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT phone FROM contacts WHERE owner = ?1 ORDER BY phone ASC;")?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut phones = Vec::new();
        while let Some(row) = rows.next()? {
            phones.push(row.get(0)?);
        }
        Ok(phones)
    }

    pub fn delete(&self, id: ContactId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> Result<Contact> {
    let id_str: String = row.get(0)?;
    let id = ContactId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let owner_raw: String = row.get(1)?;
    let owner = OwnerName::new(&owner_raw)?;
    Ok(Contact {
        id,
        owner,
        phone: row.get(2)?,
        display_name: row.get(3)?,
        created_at: row.get(4)?,
    })
}
