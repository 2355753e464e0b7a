use crate::commands::{print_json, Context};
use crate::util::{resolve_country_code, resolve_owner};
use anyhow::Result;
use clap::Args;
use sendlist_core::domain::normalize_phone;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(required = true)]
    pub raw: Vec<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long, value_name = "CODE")]
    pub country_code: Option<String>,
}

#[derive(Debug, Serialize)]
struct NormalizedDto {
    raw: String,
    normalized: Option<String>,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let owner = resolve_owner(ctx, args.owner.as_deref())?;
    let country_code = resolve_country_code(ctx, &owner, args.country_code.as_deref())?;
    let items: Vec<NormalizedDto> = args
        .raw
        .into_iter()
        .map(|raw| NormalizedDto {
            normalized: normalize_phone(raw.trim(), country_code.as_deref()),
            raw,
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    for item in items {
        println!(
            "{} -> {}",
            item.raw,
            item.normalized.as_deref().unwrap_or("unparseable")
        );
    }
    Ok(())
}
