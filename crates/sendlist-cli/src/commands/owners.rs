use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{now_utc, resolve_owner};
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum OwnerCommand {
    #[command(name = "set-country-code")]
    SetCountryCode(OwnerSetCountryCodeArgs),
    #[command(name = "clear-country-code")]
    ClearCountryCode(OwnerArgs),
    Show(OwnerArgs),
}

#[derive(Debug, Args)]
pub struct OwnerSetCountryCodeArgs {
    pub code: String,
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct OwnerArgs {
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Serialize)]
struct OwnerDto {
    owner: String,
    default_country_code: Option<String>,
    contacts: usize,
}

pub fn set_country_code(ctx: &Context<'_>, args: OwnerSetCountryCodeArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    let code = ctx
        .store
        .owners()
        .set_default_country_code(now_utc(), &owner, &args.code)?;

    if ctx.json {
        print_json(&serde_json::json!({ "owner": owner, "default_country_code": code }))?;
    } else {
        println!("default country code for {} set to {}", owner, code);
    }
    Ok(())
}

pub fn clear_country_code(ctx: &Context<'_>, args: OwnerArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    if ctx.store.owners().default_country_code(&owner)?.is_none() {
        return Err(not_found(format!("no stored country code for {}", owner)));
    }
    ctx.store
        .owners()
        .clear_default_country_code(now_utc(), &owner)?;

    if ctx.json {
        print_json(&serde_json::json!({ "owner": owner, "default_country_code": null }))?;
    } else {
        println!("default country code for {} cleared", owner);
    }
    Ok(())
}

pub fn show_owner(ctx: &Context<'_>, args: OwnerArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    let dto = OwnerDto {
        default_country_code: ctx.store.owners().default_country_code(&owner)?,
        contacts: ctx.store.contacts().phones_for_owner(&owner)?.len(),
        owner: owner.as_str().to_string(),
    };

    if ctx.json {
        return print_json(&dto);
    }

    println!("owner: {}", dto.owner);
    println!(
        "default country code: {}",
        dto.default_country_code.as_deref().unwrap_or("-")
    );
    println!("contacts: {}", dto.contacts);
    Ok(())
}
