use crate::error::{Result, StoreError};
use rusqlite::{params, Connection};
use sendlist_core::domain::{validate_template_fields, MessageTemplate, TemplateId};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct TemplateNew {
    pub name: String,
    pub content: String,
}

pub struct TemplatesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TemplatesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: TemplateNew) -> Result<MessageTemplate> {
        validate_template_fields(&input.name, &input.content)?;
        let template = MessageTemplate {
            id: TemplateId::new(),
            name: input.name.trim().to_string(),
            content: input.content,
            active: true,
            created_at: now_utc,
            updated_at: now_utc,
        };
        self.conn.execute(
            "INSERT INTO templates (id, name, content, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                template.id.to_string(),
                template.name,
                template.content,
                template.active,
                template.created_at,
                template.updated_at,
            ],
        )?;
        Ok(template)
    }

    pub fn get(&self, id: TemplateId) -> Result<MessageTemplate> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, content, active, created_at, updated_at
             FROM templates WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => template_from_row(row),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Like [`get`](Self::get), but refuses templates that were deactivated.
    pub fn get_active(&self, id: TemplateId) -> Result<MessageTemplate> {
        let template = self.get(id)?;
        if !template.active {
            return Err(StoreError::InactiveTemplate(id.to_string()));
        }
        Ok(template)
    }

    pub fn list(&self) -> Result<Vec<MessageTemplate>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, content, active, created_at, updated_at
             FROM templates
             ORDER BY name ASC, created_at ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut templates = Vec::new();
        while let Some(row) = rows.next()? {
            templates.push(template_from_row(row)?);
        }
        Ok(templates)
    }

    pub fn set_active(
        &self,
        now_utc: i64,
        id: TemplateId,
        active: bool,
    ) -> Result<MessageTemplate> {
        let updated = self.conn.execute(
            "UPDATE templates SET active = ?1, updated_at = ?2 WHERE id = ?3;",
            params![active, now_utc, id.to_string()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.get(id)
    }
}

fn template_from_row(row: &rusqlite::Row<'_>) -> Result<MessageTemplate> {
    let id_str: String = row.get(0)?;
    let id = TemplateId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(MessageTemplate {
        id,
        name: row.get(1)?,
        content: row.get(2)?,
        active: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
