use clap::Args;
use serde::Serialize;
use veevent_api::client::ApiClient;
use veevent_api::client::iterate::{Iterate, Pageable};
use veevent_api::{PageInfo, PageQuery};

use crate::error;
use crate::input;

#[derive(Debug, Args)]
pub struct PageArgs {
    /// zero based page to retrieve
    #[arg(long)]
    pub page: Option<u32>,

    /// number of items per page
    #[arg(long)]
    pub size: Option<u32>,

    /// retrieves every page
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

impl PageArgs {
    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }
}

/// retrieves a single page or, with `--all`, every page of the collection
pub fn fetch<P>(
    client: &ApiClient,
    mut pageable: P,
    args: &PageArgs
) -> error::Result<(Vec<P::Item>, Option<PageInfo>)>
where
    P: Pageable
{
    *pageable.query_mut() = args.query();

    if args.all {
        let items = Iterate::new(client, &mut pageable)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, None))
    } else {
        let (page, items) = pageable.send(client)?.into_tuple();

        Ok((items, page))
    }
}

pub fn print_page(page: Option<&PageInfo>) {
    if let Some(page) = page {
        println!(
            "page {} of {} ({} total)",
            page.number + 1,
            page.total_pages.max(1),
            page.total_elements
        );
    }
}

pub fn print_json<T>(value: &T) -> error::Result
where
    T: Serialize
{
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

pub fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// asks before a destructive action unless already confirmed
pub fn confirm<P>(yes: bool, prompt: P) -> error::Result<bool>
where
    P: std::fmt::Display
{
    if yes {
        return Ok(true);
    }

    Ok(input::confirm(prompt)?)
}

/// splits a comma separated list dropping empty entries
pub fn split_list(given: &str) -> Vec<String> {
    given.split(',')
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_owned())
        .collect()
}
