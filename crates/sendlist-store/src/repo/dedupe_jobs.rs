use crate::error::{Result, StoreError};
use rusqlite::{params, Connection};
use sendlist_core::domain::{
    AcceptedRecipient, DedupeJob, DedupeJobId, DuplicateReason, DuplicateRecord, JobEntry,
    OwnerName, TemplateId,
};
use sendlist_core::dto::DedupeResponse;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct DedupeJobNew<'r> {
    pub owner: OwnerName,
    pub template_id: Option<TemplateId>,
    pub default_country_code: Option<String>,
    pub response: &'r DedupeResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeJobListItem {
    pub id: DedupeJobId,
    pub template_id: Option<TemplateId>,
    pub recipients: i64,
    pub duplicates: i64,
    pub created_at: i64,
}

pub struct DedupeJobsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> DedupeJobsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persists the job row together with its accepted and rejected entries.
    pub fn record(&self, now_utc: i64, input: DedupeJobNew<'_>) -> Result<DedupeJob> {
        let job = DedupeJob {
            id: DedupeJobId::new(),
            owner: input.owner,
            template_id: input.template_id,
            default_country_code: input.default_country_code,
            message_preview: input.response.message_preview.clone(),
            recipients: input.response.accepted.clone(),
            duplicates: input.response.duplicates.clone(),
            created_at: now_utc,
        };
        let job_id = job.id.to_string();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO dedupe_jobs
               (id, owner, template_id, default_country_code, message_preview, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                job_id,
                job.owner.as_str(),
                job.template_id.map(|id| id.to_string()),
                job.default_country_code,
                job.message_preview,
                job.created_at,
            ],
        )?;

        {
            let mut accepted_stmt = tx.prepare(
                "INSERT INTO dedupe_job_recipients (job_id, position, raw, normalized)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            let mut rejected_stmt = tx.prepare(
                "INSERT INTO dedupe_job_duplicates (job_id, position, raw, normalized, reason)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for (position, entry) in (0_i64..).zip(job.entries()) {
                match entry {
                    JobEntry::Accepted(recipient) => {
                        accepted_stmt.execute(params![
                            job_id,
                            position,
                            recipient.raw,
                            recipient.normalized
                        ])?;
                    }
                    JobEntry::Rejected(record) => {
                        rejected_stmt.execute(params![
                            job_id,
                            position,
                            record.raw,
                            record.normalized,
                            record.reason.as_str()
                        ])?;
                    }
                }
            }
        }

        tx.commit()?;
        Ok(job)
    }

    pub fn get(&self, id: DedupeJobId) -> Result<DedupeJob> {
        let job_id = id.to_string();
        let mut stmt = self.conn.prepare(
            "SELECT owner, template_id, default_country_code, message_preview, created_at
             FROM dedupe_jobs WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([&job_id])?;
        let Some(row) = rows.next()? else {
            return Err(StoreError::NotFound(job_id.clone()));
        };

        let owner_raw: String = row.get(0)?;
        let template_raw: Option<String> = row.get(1)?;
        let mut job = DedupeJob {
            id,
            owner: OwnerName::new(&owner_raw)?,
            template_id: template_raw.as_deref().map(parse_template_id).transpose()?,
            default_country_code: row.get(2)?,
            message_preview: row.get(3)?,
            recipients: Vec::new(),
            duplicates: Vec::new(),
            created_at: row.get(4)?,
        };

        job.recipients = self.recipients_for(&job_id)?;
        job.duplicates = self.duplicates_for(&job_id)?;
        Ok(job)
    }

    /// Newest first.
    pub fn list_for_owner(&self, owner: &OwnerName) -> Result<Vec<DedupeJobListItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT dedupe_jobs.id, dedupe_jobs.template_id, dedupe_jobs.created_at,
                    (SELECT COUNT(*) FROM dedupe_job_recipients r WHERE r.job_id = dedupe_jobs.id),
                    (SELECT COUNT(*) FROM dedupe_job_duplicates d WHERE d.job_id = dedupe_jobs.id)
             FROM dedupe_jobs
             WHERE dedupe_jobs.owner = ?1
             ORDER BY dedupe_jobs.created_at DESC, dedupe_jobs.rowid DESC;",
        )?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            let id_str: String = row.get(0)?;
            let id =
                DedupeJobId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
            let template_raw: Option<String> = row.get(1)?;
            items.push(DedupeJobListItem {
                id,
                template_id: template_raw.as_deref().map(parse_template_id).transpose()?,
                created_at: row.get(2)?,
                recipients: row.get(3)?,
                duplicates: row.get(4)?,
            });
        }
        Ok(items)
    }

    fn recipients_for(&self, job_id: &str) -> Result<Vec<AcceptedRecipient>> {
        let mut stmt = self.conn.prepare(
            "SELECT position, raw, normalized FROM dedupe_job_recipients
             WHERE job_id = ?1 ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([job_id])?;
        let mut recipients = Vec::new();
        while let Some(row) = rows.next()? {
            let position: i64 = row.get(0)?;
            let index = usize::try_from(position)
                .map_err(|_| StoreError::InvalidStoredValue(position.to_string()))?;
            recipients.push(AcceptedRecipient {
                index,
                raw: row.get(1)?,
                normalized: row.get(2)?,
            });
        }
        Ok(recipients)
    }

    fn duplicates_for(&self, job_id: &str) -> Result<Vec<DuplicateRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT raw, normalized, reason FROM dedupe_job_duplicates
             WHERE job_id = ?1 ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([job_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let reason_raw: String = row.get(2)?;
            let reason = DuplicateReason::parse(&reason_raw)
                .ok_or_else(|| StoreError::InvalidStoredValue(reason_raw.clone()))?;
            records.push(DuplicateRecord {
                raw: row.get(0)?,
                normalized: row.get(1)?,
                reason,
            });
        }
        Ok(records)
    }
}

fn parse_template_id(raw: &str) -> Result<TemplateId> {
    TemplateId::from_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}
