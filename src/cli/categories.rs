use clap::{Subcommand, Args};
use veevent_api::categories::{Category, UpdateCategory};
use veevent_api::client::ApiClient;
use veevent_api::client::categories::{QueryCategories, RetrieveCategory, CreateCategory};
use veevent_api::client::links::{UpdateResource, DeleteResource};
use veevent_lib::validation;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    command: CategoriesCmds
}

#[derive(Debug, Subcommand)]
enum CategoriesCmds {
    /// lists categories
    List(util::PageArgs),

    /// shows a single category
    Show(KeyArgs),

    /// creates a new category
    Create(CreateArgs),

    /// updates a category
    Update(UpdateArgs),

    /// deletes a category
    Delete(DeleteArgs),
}

impl CategoriesCmds {
    /// the route path of the command. keys that would not stay a single
    /// path segment are rejected
    fn path(&self) -> error::Result<String> {
        let key = match self {
            CategoriesCmds::Show(given) => &given.key,
            CategoriesCmds::Update(given) => &given.key,
            CategoriesCmds::Delete(given) => &given.key,
            _ => return Ok(String::from("/categories")),
        };

        if !validation::key_valid(key) {
            return Err(error::Error::from(format!("\"{}\" is not a valid category key", key)));
        }

        Ok(format!("/categories/{}", key))
    }
}

pub fn handle(state: &mut AppState, args: CategoriesArgs) -> error::Result {
    if !super::navigate(state, &args.command.path()?)? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        CategoriesCmds::List(given) => list(client, given),
        CategoriesCmds::Show(given) => show(client, given),
        CategoriesCmds::Create(given) => create(client, given),
        CategoriesCmds::Update(given) => update(client, given),
        CategoriesCmds::Delete(given) => delete(client, given),
    }
}

fn print_category(category: &Category) {
    let trending = if category.trending { " (trending)" } else { "" };

    println!("{} {}{}", category.key, category.name, trending);
}

fn retrieve(client: &ApiClient, key: &str) -> error::Result<Category> {
    RetrieveCategory::key(key).send(client)
        .context("failed to retrieve category")?
        .context(format!("category \"{}\" was not found", key))
}

fn list(client: &ApiClient, args: util::PageArgs) -> error::Result {
    let (categories, page) = util::fetch(client, QueryCategories::new(), &args)?;

    for category in &categories {
        print_category(category);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct KeyArgs {
    /// key of the category
    key: String,
}

fn show(client: &ApiClient, args: KeyArgs) -> error::Result {
    util::print_json(&retrieve(client, &args.key)?)
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// unique key of the new category
    #[arg(long)]
    key: String,

    /// display name of the new category
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    /// marks the category as trending
    #[arg(long)]
    trending: bool,
}

fn create(client: &ApiClient, args: CreateArgs) -> error::Result {
    let mut builder = CreateCategory::new(args.key, args.name);
    builder.trending(args.trending);

    if let Some(description) = args.description {
        builder.description(description);
    }

    let category = builder.send(client)
        .context("failed to create category")?;

    print_category(&category);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// key of the category to update
    key: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// sets the trending flag
    #[arg(long)]
    trending: Option<bool>,
}

fn update(client: &ApiClient, args: UpdateArgs) -> error::Result {
    let category = retrieve(client, &args.key)?;
    let body = UpdateCategory {
        name: args.name,
        description: args.description,
        trending: args.trending,
    };

    let updated: Category = UpdateResource::from_links(&category.links, body)?
        .send(client)
        .context("failed to update category")?;

    print_category(&updated);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// key of the category to delete
    key: String,

    /// skips the confirmation prompt
    #[arg(long)]
    yes: bool,
}

fn delete(client: &ApiClient, args: DeleteArgs) -> error::Result {
    let category = retrieve(client, &args.key)?;

    if !util::confirm(args.yes, format!("delete category \"{}\"", category.name))? {
        return Ok(());
    }

    DeleteResource::from_links(&category.links)?
        .send(client)
        .context("failed to delete category")?;

    println!("deleted {}", category.key);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn show(key: &str) -> CategoriesCmds {
        CategoriesCmds::Show(KeyArgs { key: key.to_owned() })
    }

    #[test]
    fn route_path_keeps_key_in_collection() {
        assert_eq!(show("music").path().unwrap(), "/categories/music");

        for key in ["../users/1", "..", "music?x=1", "a/b"] {
            assert!(show(key).path().is_err(), "key {:?}", key);
        }

        let delete = CategoriesCmds::Delete(DeleteArgs {
            key: String::from("../users/1"),
            yes: true,
        });

        assert!(delete.path().is_err());
    }
}
