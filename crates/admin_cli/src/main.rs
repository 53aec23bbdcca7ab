use std::{error::Error, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use engine::{Engine, NewUser};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

mod import;
mod prompt;

#[derive(Parser, Debug)]
#[command(name = "foodgram_admin")]
#[command(about = "Admin utilities for Foodgram (bootstrap users, tags and ingredients)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./foodgram.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Tag(Tag),
    Ingredient(Ingredient),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create an account; the password is asked on the terminal.
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    /// Staff users may edit and delete any recipe.
    #[arg(long)]
    staff: bool,
}

#[derive(Args, Debug)]
struct Tag {
    #[command(subcommand)]
    command: TagCommand,
}

#[derive(Subcommand, Debug)]
enum TagCommand {
    Create(TagCreateArgs),
}

#[derive(Args, Debug)]
struct TagCreateArgs {
    #[arg(long)]
    name: String,
    /// `#RRGGBB`
    #[arg(long)]
    color: String,
    #[arg(long)]
    slug: String,
}

#[derive(Args, Debug)]
struct Ingredient {
    #[command(subcommand)]
    command: IngredientCommand,
}

#[derive(Subcommand, Debug)]
enum IngredientCommand {
    Create(IngredientCreateArgs),
    /// Load a JSON array of `{name, measurement_unit}` objects.
    Import(IngredientImportArgs),
}

#[derive(Args, Debug)]
struct IngredientCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    unit: String,
}

#[derive(Args, Debug)]
struct IngredientImportArgs {
    path: PathBuf,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt::new_password()?;
            let user = match engine
                .register_user(NewUser {
                    username: args.username,
                    email: args.email,
                    first_name: args.first_name,
                    last_name: args.last_name,
                    password,
                    is_staff: args.staff,
                })
                .await
            {
                Ok(user) => user,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            };
            println!("created user: {} ({})", user.username, user.id);
        }
        Command::Tag(Tag {
            command: TagCommand::Create(args),
        }) => {
            let tag = match engine.create_tag(&args.name, &args.color, &args.slug).await {
                Ok(tag) => tag,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            };
            println!("created tag: {} ({})", tag.slug, tag.id);
        }
        Command::Ingredient(Ingredient {
            command: IngredientCommand::Create(args),
        }) => {
            let ingredient = match engine.create_ingredient(&args.name, &args.unit).await {
                Ok(ingredient) => ingredient,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            };
            println!(
                "created ingredient: {}, {} ({})",
                ingredient.name, ingredient.measurement_unit, ingredient.id
            );
        }
        Command::Ingredient(Ingredient {
            command: IngredientCommand::Import(args),
        }) => {
            let report = import::import_file(&engine, &args.path).await?;
            println!(
                "imported {} ingredients, skipped {} already present",
                report.created, report.skipped
            );
        }
    }

    Ok(())
}
