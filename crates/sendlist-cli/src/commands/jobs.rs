use crate::commands::dedupe::describe_duplicate;
use crate::commands::{print_json, Context};
use crate::util::{format_timestamp_datetime, parse_id, resolve_owner};
use anyhow::Result;
use clap::{Args, Subcommand};
use sendlist_core::domain::{DedupeJobId, JobEntry, TemplateId};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    Ls(JobsListArgs),
    Show(JobShowArgs),
}

#[derive(Debug, Args)]
pub struct JobsListArgs {
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct JobShowArgs {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct JobListItemDto {
    id: DedupeJobId,
    template_id: Option<TemplateId>,
    recipients: i64,
    duplicates: i64,
    created_at: i64,
}

pub fn list_jobs(ctx: &Context<'_>, args: JobsListArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    let items: Vec<JobListItemDto> = ctx
        .store
        .dedupe_jobs()
        .list_for_owner(&owner)?
        .into_iter()
        .map(|item| JobListItemDto {
            id: item.id,
            template_id: item.template_id,
            recipients: item.recipients,
            duplicates: item.duplicates,
            created_at: item.created_at,
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no dedupe jobs for {}", owner);
        return Ok(());
    }

    for item in items {
        println!(
            "{}  {}  kept {}  dropped {}",
            item.id,
            format_timestamp_datetime(item.created_at),
            item.recipients,
            item.duplicates
        );
    }
    Ok(())
}

pub fn show_job(ctx: &Context<'_>, args: JobShowArgs) -> Result<()> {
    let id: DedupeJobId = parse_id(&args.id, "job")?;
    let job = ctx.store.dedupe_jobs().get(id)?;

    if ctx.json {
        return print_json(&job);
    }

    println!("job {} ({})", job.id, job.owner);
    println!("created: {}", format_timestamp_datetime(job.created_at));
    if let Some(template_id) = job.template_id {
        println!("template: {}", template_id);
    }
    println!(
        "country code: {}",
        job.default_country_code.as_deref().unwrap_or("none")
    );
    println!(
        "kept {} of {}:",
        job.recipients.len(),
        job.recipients.len() + job.duplicates.len()
    );
    for entry in job.entries() {
        match entry {
            JobEntry::Accepted(recipient) => {
                println!("  kept  {:?} -> {}", recipient.raw, recipient.normalized)
            }
            JobEntry::Rejected(record) => println!("  drop  {}", describe_duplicate(record)),
        }
    }
    println!("message: {}", job.message_preview);
    Ok(())
}
