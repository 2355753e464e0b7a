use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use sendlist_core::domain::{parse_country_code, OwnerName};

pub struct OwnersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> OwnersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The owner's stored preference, if any.
    pub fn default_country_code(&self, owner: &OwnerName) -> Result<Option<String>> {
        let code: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT default_country_code FROM owners WHERE name = ?1;",
                [owner.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(code.flatten())
    }

    /// Stores the canonical form of `code` and returns it.
    pub fn set_default_country_code(
        &self,
        now_utc: i64,
        owner: &OwnerName,
        code: &str,
    ) -> Result<String> {
        let canonical = parse_country_code(code)?;
        upsert(self.conn, now_utc, owner, Some(&canonical))?;
        Ok(canonical)
    }

    pub fn clear_default_country_code(&self, now_utc: i64, owner: &OwnerName) -> Result<()> {
        upsert(self.conn, now_utc, owner, None)
    }
}

fn upsert(conn: &Connection, now_utc: i64, owner: &OwnerName, code: Option<&str>) -> Result<()> {
    conn.execute(
        "INSERT INTO owners (name, default_country_code, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET
           default_country_code = excluded.default_country_code,
           updated_at = excluded.updated_at;",
        params![owner.as_str(), code, now_utc],
    )?;
    Ok(())
}
