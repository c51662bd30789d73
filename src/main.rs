//! CRMDesk dev harness.
//!
//! Loads ~/.crmdesk/config.json, seeds the mock store and prints one page of a
//! collection view as JSON.
//!
//! Usage:
//!   crmdesk <collection> [--search TEXT] [--filter FIELD=VALUE]... [--sort KEY[:desc]] [--page N]
//!   crmdesk nav
//!   crmdesk dashboard
//!   crmdesk refund <invoice>

use anyhow::{anyhow, bail, Context};
use serde_json::Value;

use crmdesk_lib::backend::MockBackend;
use crmdesk_lib::entities::{
    ApiToken, Branch, Company, Deal, Lead, Product, TeamMember, Ticket, Transaction, User,
};
use crmdesk_lib::error::ActionResponse;
use crmdesk_lib::roles::{can_perform, visible_nav_items, AdminAction, AdminNav, ClientNav};
use crmdesk_lib::screen::Screen;
use crmdesk_lib::services::{billing, dashboard};
use crmdesk_lib::state::AppState;
use crmdesk_lib::store::Entity;
use crmdesk_lib::types::{Config, SessionRole};
use crmdesk_lib::view::Criteria;

const USAGE: &str = "usage: crmdesk <collection|nav|dashboard|refund> \
    [--search T] [--filter k=v] [--sort key[:desc]] [--page N]";

#[derive(Debug, Default)]
struct ViewArgs {
    search: Option<String>,
    filters: Vec<(String, String)>,
    sort: Option<(String, bool)>,
    page: usize,
}

fn parse_view_args(args: &[String]) -> anyhow::Result<ViewArgs> {
    let mut out = ViewArgs::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{flag} needs a value"))
        };
        match flag.as_str() {
            "--search" => out.search = Some(value()?),
            "--filter" => {
                let raw = value()?;
                let (field, v) = raw
                    .split_once('=')
                    .ok_or_else(|| anyhow!("--filter expects FIELD=VALUE, got {raw}"))?;
                out.filters.push((field.to_string(), v.to_string()));
            }
            "--sort" => {
                let raw = value()?;
                out.sort = Some(match raw.split_once(':') {
                    Some((key, "desc")) => (key.to_string(), true),
                    Some((key, "asc")) => (key.to_string(), false),
                    Some((_, dir)) => bail!("unknown sort direction: {dir}"),
                    None => (raw.clone(), false),
                });
            }
            "--page" => {
                let raw = value()?;
                let n: usize = raw.parse().with_context(|| format!("bad page number: {raw}"))?;
                out.page = n.saturating_sub(1);
            }
            other => bail!("unknown flag: {other}"),
        }
    }
    Ok(out)
}

async fn show<T: Entity>(
    backend: &MockBackend,
    config: &Config,
    search_fields: &[&str],
    args: ViewArgs,
) -> anyhow::Result<Value> {
    let mut screen: Screen<T> =
        Screen::from_config(Criteria::searching(search_fields.iter().copied()), config);
    screen.load(backend).await;
    if let Some(toast) = screen.toasts().toasts().first() {
        bail!("{}", toast.body);
    }
    if let Some(text) = args.search {
        screen.set_search(text);
    }
    for (field, value) in args.filters {
        screen.set_filter(&field, value);
    }
    if let Some((key, desc)) = args.sort {
        screen.toggle_sort(&key);
        if desc {
            screen.toggle_sort(&key);
        }
    }
    screen.set_page(args.page);
    Ok(serde_json::to_value(screen.page_rows())?)
}

fn nav(role: SessionRole) -> Value {
    let items: Vec<(&str, &str)> = match role {
        SessionRole::Admin(r) => visible_nav_items::<AdminNav>(r)
            .into_iter()
            .map(|n| (n.label(), n.href()))
            .collect(),
        SessionRole::Client(r) => visible_nav_items::<ClientNav>(r)
            .into_iter()
            .map(|n| (n.label(), n.href()))
            .collect(),
    };
    serde_json::json!({
        "role": role,
        "items": items
            .into_iter()
            .map(|(label, href)| serde_json::json!({ "label": label, "href": href }))
            .collect::<Vec<_>>(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{USAGE}");
    };

    let state = AppState::new().map_err(|e| anyhow!("Failed to load CRMDesk config: {e}"))?;
    let backend = &state.backend;
    let config = &state.config;
    let view = || parse_view_args(&args[1..]);

    let output = match command.as_str() {
        "nav" => nav(state.role),
        "dashboard" => match state.role {
            SessionRole::Admin(_) => serde_json::to_value(backend.read(dashboard::admin_overview))?,
            SessionRole::Client(_) => {
                serde_json::to_value(backend.read(dashboard::pipeline_summary))?
            }
        },
        "refund" => {
            let invoice = args.get(1).context("usage: crmdesk refund <invoice>")?;
            match state.role {
                SessionRole::Admin(r) if can_perform(r, AdminAction::RefundTransaction) => {
                    let result = billing::refund_transaction(backend, invoice).await;
                    serde_json::to_value(ActionResponse::from(result))?
                }
                _ => bail!("{} cannot refund transactions", state.role.label()),
            }
        }
        "companies" => show::<Company>(backend, config, &["name", "industry"], view()?).await?,
        "transactions" => {
            show::<Transaction>(backend, config, &["invoice", "company"], view()?).await?
        }
        "tickets" => show::<Ticket>(backend, config, &["subject", "company"], view()?).await?,
        "users" => show::<User>(backend, config, &["name", "email"], view()?).await?,
        "tokens" => show::<ApiToken>(backend, config, &["name", "prefix"], view()?).await?,
        "team" => show::<TeamMember>(backend, config, &["name", "email"], view()?).await?,
        "leads" => show::<Lead>(backend, config, &["name", "company"], view()?).await?,
        "deals" => show::<Deal>(backend, config, &["name", "client"], view()?).await?,
        "products" => show::<Product>(backend, config, &["name", "sku"], view()?).await?,
        "branches" => show::<Branch>(backend, config, &["name", "city"], view()?).await?,
        other => bail!("unknown collection: {other}"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
