use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use moviebase::commands::{self, Commands, SessionContext, MENU};
use moviebase::database::Database;
use moviebase::formatting::{banner, heading, menu_entry, notice, warning};
use moviebase::metadata::{MetadataSource, OmdbClient};
use moviebase::models::User;
use moviebase::{registry, store, Result};

/// Track your movie collection from the terminal.
#[derive(Parser, Debug)]
#[command(name = "moviebase")]
#[command(version)]
#[command(about = "A personal movie tracking app backed by an embedded database")]
struct Cli {
    /// Database file (defaults to movies.db inside the data directory)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Directory for the database and generated files
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// OMDb api key; falls back to the OMDB_API_KEY environment variable.
    /// Without a key, movie details are entered manually.
    #[arg(long = "omdb-key")]
    omdb_key: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if cli.no_color {
        colored::control::set_override(false);
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warning(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = cli
        .data_dir
        .or_else(|| dirs::data_dir().map(|dir| dir.join("moviebase")))
        .unwrap_or_else(|| PathBuf::from("data"));
    let db_path = cli
        .database
        .unwrap_or_else(|| data_dir.join("movies.db"));
    let db = Database::open(&db_path)?;

    let api_key = cli.omdb_key.or_else(|| env::var("OMDB_API_KEY").ok());
    let metadata_client = api_key.map(OmdbClient::new);

    let mut editor = DefaultEditor::new()?;
    banner("Welcome to the Movies app");

    let Some(user) = user_menu(&db, &mut editor)? else {
        return Ok(());
    };
    store::ensure_namespace(&db, user.id)?;
    banner(&format!("{}'s Movies Database", user.name));
    movie_session(
        &db,
        user,
        metadata_client.as_ref().map(|client| client as &dyn MetadataSource),
        &mut editor,
        &data_dir,
    )?;
    println!("Bye!");
    Ok(())
}

/// The movie menu loop. The collection is reloaded before every pass so the
/// menu always works against what is persisted.
fn movie_session(
    db: &Database,
    user: User,
    metadata: Option<&dyn MetadataSource>,
    editor: &mut DefaultEditor,
    data_dir: &std::path::Path,
) -> Result<()> {
    loop {
        let movies = store::list_movies(db, user.id)?;
        let mut ctx = SessionContext {
            db,
            user: user.clone(),
            movies,
            metadata,
            editor: &mut *editor,
            data_dir,
        };
        commands::show_menu();
        println!();
        let Some(line) = commands::prompt(
            ctx.editor,
            &format!("Enter choice (0-{}): ", MENU.len() - 1),
        )?
        else {
            break;
        };
        let command = match line.parse::<usize>().map_err(|_| ()).and_then(|choice| {
            Commands::parse(choice).map_err(|_| ())
        }) {
            Ok(command) => command,
            Err(()) => {
                warning(&format!("No number from 0-{} found!", MENU.len() - 1));
                continue;
            }
        };

        println!();
        if let Commands::Exit = command {
            break;
        }
        if let Err(err) = command.invoke(&mut ctx) {
            warning(&format!("Error: {err}"));
        }

        println!();
        if commands::prompt(ctx.editor, "Press enter to continue")?.is_none() {
            break;
        }
        println!();
    }
    Ok(())
}

/// The user menu: pick an existing user, manage users, or leave. `None`
/// means the program should exit.
fn user_menu(db: &Database, editor: &mut DefaultEditor) -> Result<Option<User>> {
    loop {
        let users = registry::list_users(db)?;
        heading("\nSelect a user:");
        for (number, user) in users.iter().enumerate() {
            menu_entry(number, &user.name);
        }
        menu_entry(users.len(), "Create, update or delete user");
        menu_entry(users.len() + 1, "Exit menu");
        println!();

        let Some(line) = commands::prompt(
            editor,
            &format!("Please enter a menu choice: (0-{}): ", users.len() + 1),
        )?
        else {
            return Ok(None);
        };
        let Ok(choice) = line.parse::<usize>() else {
            warning("Please enter a number from the menu!");
            continue;
        };
        if choice < users.len() {
            return Ok(Some(users[choice].clone()));
        }
        if choice == users.len() {
            manage_users(db, editor)?;
        } else if choice == users.len() + 1 {
            return Ok(None);
        } else {
            warning("Please enter a number from the menu!");
        }
    }
}

fn manage_users(db: &Database, editor: &mut DefaultEditor) -> Result<()> {
    loop {
        heading("\nOptions:");
        menu_entry(0, "Go back");
        menu_entry(1, "Add user");
        menu_entry(2, "Rename user");
        menu_entry(3, "Delete user");

        let Some(line) = commands::prompt(editor, "Enter a choice from the menu: (0-3): ")?
        else {
            return Ok(());
        };
        match line.parse::<usize>() {
            Ok(0) => return Ok(()),
            Ok(1) => add_user_flow(db, editor)?,
            Ok(2) => rename_user_flow(db, editor)?,
            Ok(3) => delete_user_flow(db, editor)?,
            _ => warning("Please enter a number from the menu!"),
        }
    }
}

fn add_user_flow(db: &Database, editor: &mut DefaultEditor) -> Result<()> {
    loop {
        let Some(name) = commands::prompt(editor, "\nPlease enter a new user name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            warning("Invalid name!");
            continue;
        }
        registry::add_user(db, &name)?;
        notice("User added successfully");
        return Ok(());
    }
}

fn rename_user_flow(db: &Database, editor: &mut DefaultEditor) -> Result<()> {
    let Some(user_id) = pick_user_id(db, editor)? else {
        return Ok(());
    };
    loop {
        let Some(name) = commands::prompt(editor, "Please enter a new user name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            warning("Invalid name!");
            continue;
        }
        registry::rename_user(db, user_id, &name)?;
        notice("User updated successfully");
        return Ok(());
    }
}

fn delete_user_flow(db: &Database, editor: &mut DefaultEditor) -> Result<()> {
    let Some(user_id) = pick_user_id(db, editor)? else {
        return Ok(());
    };
    registry::delete_user(db, user_id)?;
    notice("User deleted successfully");
    Ok(())
}

/// List users with their ids and ask for one until a valid id is entered.
fn pick_user_id(db: &Database, editor: &mut DefaultEditor) -> Result<Option<i64>> {
    let users = registry::list_users(db)?;
    if users.is_empty() {
        warning("No users yet!");
        return Ok(None);
    }
    heading("\nUsers and id's:");
    for user in &users {
        menu_entry(user.id as usize, &user.name);
    }
    loop {
        let Some(line) = commands::prompt(editor, "\nSelect a user_id to change: ")? else {
            return Ok(None);
        };
        match line.parse::<i64>() {
            Ok(user_id) if users.iter().any(|user| user.id == user_id) => {
                return Ok(Some(user_id));
            }
            _ => warning("No valid id!"),
        }
    }
}
