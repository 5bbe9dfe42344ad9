//! `forage` — ask for ingredients, get recipe titles, cache the answers.
//!
//! Interactive by default: prompts for an ingredient list and a result
//! count, re-prompting until both are valid. `--ingredients` and
//! `--count` skip the prompts for scripted use.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use dialoguer::Input;

use forage::{Forage, ForageError, IngredientSet, MAX_RESULTS};

#[derive(Parser)]
#[command(name = "forage", about = "recipe suggestions for the ingredients you have")]
struct Args {
    /// Spoonacular API key
    #[arg(long, env = "SPOONACULAR_API_KEY", hide_env_values = true)]
    api_key: String,

    /// directory for cached search results
    #[arg(long, env = "FORAGE_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// search API base URL
    #[arg(long, env = "FORAGE_BASE_URL", hide = true)]
    base_url: Option<String>,

    /// ingredients, comma separated (prompts when omitted)
    #[arg(long)]
    ingredients: Option<String>,

    /// how many recipe titles to fetch (prompts when omitted)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS as i64))]
    count: Option<u32>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Forage::builder().api_key(&args.api_key);
    if let Some(dir) = args.cache_dir {
        builder = builder.cache_dir(dir);
    }
    if let Some(url) = args.base_url {
        builder = builder.base_url(url);
    }
    let forage = builder.build()?;

    let ingredients = match args.ingredients {
        Some(raw) => {
            // validate up front so a bad flag fails fast instead of prompting
            IngredientSet::parse(&raw)?;
            raw
        }
        None => prompt_ingredients()?,
    };

    let count = match args.count {
        Some(count) => count,
        None => prompt_count()?,
    };

    match forage.fulfill(&ingredients, count).await {
        Ok(recipes) if recipes.is_empty() => {
            println!("No recipes found.");
        }
        Ok(recipes) => {
            println!("\nRecipe Names:");
            for (i, recipe) in recipes.iter().enumerate() {
                println!("{}. {}", i + 1, recipe.display_title());
            }
        }
        // Degrade to an empty list: the cache and input were fine, the
        // network was not.
        Err(e) => {
            eprintln!("search failed: {e}");
            println!("No recipes to show.");
        }
    }

    Ok(())
}

/// Prompt until the input normalizes to a valid ingredient set.
fn prompt_ingredients() -> Result<String, Box<dyn std::error::Error>> {
    loop {
        let raw: String = Input::new()
            .with_prompt("What are your ingredients?")
            .interact_text()?;
        match IngredientSet::parse(&raw) {
            Ok(_) => return Ok(raw),
            Err(e @ (ForageError::InvalidIngredient(_) | ForageError::EmptyIngredients)) => {
                println!("{e}. Try again.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prompt until the input parses as a number in `[1, MAX_RESULTS]`.
fn prompt_count() -> Result<u32, Box<dyn std::error::Error>> {
    loop {
        let raw: String = Input::new()
            .with_prompt("How many recipe titles do you want?")
            .interact_text()?;
        match raw.trim().parse::<u32>() {
            Ok(count) if (1..=MAX_RESULTS).contains(&count) => return Ok(count),
            Ok(_) => println!("Please enter a number between 1 and {MAX_RESULTS}."),
            Err(_) => println!("Please enter a valid number."),
        }
    }
}
