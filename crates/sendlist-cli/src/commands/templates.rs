use crate::commands::{print_json, Context};
use crate::util::{format_timestamp_datetime, now_utc, parse_id};
use anyhow::Result;
use clap::{Args, Subcommand};
use sendlist_core::domain::{MessageTemplate, TemplateId};
use sendlist_store::repo::TemplateNew;

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    Add(TemplateAddArgs),
    Ls(TemplateListArgs),
    Show(TemplateIdArgs),
    Activate(TemplateIdArgs),
    Deactivate(TemplateIdArgs),
}

#[derive(Debug, Args)]
pub struct TemplateAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Debug, Args)]
pub struct TemplateListArgs {}

#[derive(Debug, Args)]
pub struct TemplateIdArgs {
    pub id: String,
}

pub fn add_template(ctx: &Context<'_>, args: TemplateAddArgs) -> Result<()> {
    let template = ctx.store.templates().create(
        now_utc(),
        TemplateNew {
            name: args.name,
            content: args.content,
        },
    )?;

    if ctx.json {
        print_json(&template)?;
    } else {
        println!("created template {} {}", template.id, template.name);
    }
    Ok(())
}

pub fn list_templates(ctx: &Context<'_>, _args: TemplateListArgs) -> Result<()> {
    let templates = ctx.store.templates().list()?;

    if ctx.json {
        return print_json(&templates);
    }

    if templates.is_empty() {
        println!("no templates");
        return Ok(());
    }

    for template in templates {
        println!(
            "{}  {}  {}",
            template.id,
            status_label(&template),
            template.name
        );
    }
    Ok(())
}

pub fn show_template(ctx: &Context<'_>, args: TemplateIdArgs) -> Result<()> {
    let id: TemplateId = parse_id(&args.id, "template")?;
    let template = ctx.store.templates().get(id)?;

    if ctx.json {
        return print_json(&template);
    }

    println!("{} ({})", template.name, status_label(&template));
    println!("id: {}", template.id);
    println!("updated: {}", format_timestamp_datetime(template.updated_at));
    println!();
    println!("{}", template.content);
    Ok(())
}

pub fn set_template_active(ctx: &Context<'_>, args: TemplateIdArgs, active: bool) -> Result<()> {
    let id: TemplateId = parse_id(&args.id, "template")?;
    let template = ctx.store.templates().set_active(now_utc(), id, active)?;

    if ctx.json {
        print_json(&template)?;
    } else {
        println!("template {} {}", template.id, status_label(&template));
    }
    Ok(())
}

fn status_label(template: &MessageTemplate) -> &'static str {
    if template.active {
        "active"
    } else {
        "inactive"
    }
}
