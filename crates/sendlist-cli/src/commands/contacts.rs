use crate::commands::{print_json, Context};
use crate::util::{
    format_timestamp_datetime, now_utc, parse_id, resolve_country_code, resolve_owner,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use sendlist_core::domain::ContactId;
use sendlist_store::repo::ContactNew;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    Add(ContactAddArgs),
    Ls(ContactListArgs),
    Rm(ContactRemoveArgs),
}

#[derive(Debug, Args)]
pub struct ContactAddArgs {
    pub phone: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long, value_name = "CODE")]
    pub country_code: Option<String>,
}

#[derive(Debug, Args)]
pub struct ContactListArgs {
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct ContactRemoveArgs {
    pub id: String,
}

pub fn add_contact(ctx: &Context<'_>, args: ContactAddArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    let country_code = resolve_country_code(ctx, &owner, args.country_code.as_deref())?;
    let contact = ctx.store.contacts().create(
        now_utc(),
        ContactNew {
            owner,
            phone: args.phone,
            display_name: args.name,
        },
        country_code.as_deref(),
    )?;

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("created {} {}", contact.id, contact.phone);
    }
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ContactListArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    let contacts = ctx.store.contacts().list_for_owner(&owner)?;

    if ctx.json {
        return print_json(&contacts);
    }

    if contacts.is_empty() {
        println!("no contacts for {}", owner);
        return Ok(());
    }

    for contact in contacts {
        println!(
            "{}  {}  {}  {}",
            contact.id,
            contact.phone,
            contact.display_name.as_deref().unwrap_or("-"),
            format_timestamp_datetime(contact.created_at)
        );
    }
    Ok(())
}

pub fn remove_contact(ctx: &Context<'_>, args: ContactRemoveArgs) -> Result<()> {
    let id: ContactId = parse_id(&args.id, "contact")?;
    ctx.store.contacts().delete(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}
