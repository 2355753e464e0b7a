use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{now_utc, parse_id, read_recipients_file, resolve_country_code, resolve_owner};
use anyhow::{Context as _, Result};
use clap::Args;
use sendlist_core::domain::{DedupeJobId, DuplicateRecord, TemplateId};
use sendlist_core::dto::{process_request, DedupeRequest, DedupeResponse};
use sendlist_store::repo::DedupeJobNew;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct DedupeArgs {
    /// Raw recipients; appended to those read from --file.
    pub recipients: Vec<String>,
    /// One recipient per line; `-` reads stdin.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long, value_name = "ID")]
    pub template: Option<String>,
    /// Overrides the template text in the preview.
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long, value_name = "CODE")]
    pub country_code: Option<String>,
    /// Do not record the run.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct DedupeOutputDto {
    #[serde(flatten)]
    response: DedupeResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_id: Option<DedupeJobId>,
}

pub fn dedupe(ctx: &Context<'_>, args: DedupeArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;

    let mut recipients_raw = match args.file.as_deref() {
        Some(path) => read_recipients_file(path)?,
        None => Vec::new(),
    };
    recipients_raw.extend(args.recipients);

    let (template_id, template_content) = match args.template.as_deref() {
        Some(raw) => {
            let id: TemplateId = parse_id(raw, "template")?;
            let template = ctx
                .store
                .templates()
                .get_active(id)
                .with_context(|| format!("load template {}", id))?;
            (Some(id), template.content)
        }
        None => {
            if args.message.as_deref().map_or(true, str::is_empty) {
                return Err(invalid_input("either --template or --message is required"));
            }
            (None, String::new())
        }
    };

    let default_country_code = resolve_country_code(ctx, &owner, args.country_code.as_deref())?;
    let request = DedupeRequest {
        recipients_raw,
        default_country_code,
        existing_contacts_e164: ctx.store.contacts().phones_for_owner(&owner)?,
    };
    debug!(
        owner = %owner,
        recipients = request.recipients_raw.len(),
        existing = request.existing_contacts_e164.len(),
        "dedupe request assembled"
    );

    let response = process_request(&request, &template_content, args.message.as_deref())?;
    let summary = response.summary();
    debug!(
        accepted = summary.accepted,
        rejected = response.duplicates.len(),
        "dedupe finished"
    );

    let job_id = if args.dry_run || !ctx.config.dedupe.record_jobs {
        None
    } else {
        let job = ctx
            .store
            .dedupe_jobs()
            .record(
                now_utc(),
                DedupeJobNew {
                    owner,
                    template_id,
                    default_country_code: request.default_country_code.clone(),
                    response: &response,
                },
            )
            .with_context(|| "record dedupe job")?;
        debug!(job = %job.id, "dedupe job recorded");
        Some(job.id)
    };

    let output = DedupeOutputDto { response, job_id };

    if ctx.json {
        return print_json(&output);
    }

    println!(
        "{} of {} recipients kept ({} in-batch duplicates, {} existing contacts, {} unparseable)",
        summary.accepted,
        summary.total,
        summary.duplicate_in_upload + summary.same_as_another_normalized,
        summary.duplicate_existing_contact,
        summary.unparseable
    );
    for recipient in &output.response.recipients_final {
        println!("  {}", recipient);
    }
    if !output.response.duplicates.is_empty() {
        println!("dropped:");
        for record in &output.response.duplicates {
            println!("  {}", describe_duplicate(record));
        }
    }
    println!("message: {}", output.response.message_preview);
    if let Some(id) = output.job_id {
        println!("job: {}", id);
    }
    Ok(())
}

pub(crate) fn describe_duplicate(record: &DuplicateRecord) -> String {
    match record.normalized.as_deref() {
        Some(normalized) => format!(
            "{:?} -> {} ({})",
            record.raw,
            normalized,
            record.reason.as_str()
        ),
        None => format!("{:?} ({})", record.raw, record.reason.as_str()),
    }
}
