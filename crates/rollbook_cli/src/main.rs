//! Terminal view over `rollbook_core`.
//!
//! # Responsibility
//! - Parse arguments, render the roster, print per-field form errors.
//! - Own the delete confirmation guard; the store deletes unconditionally.

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use rollbook_core::db::open_db;
use rollbook_core::{
    address_char_count, init_logging, sanitize_phone_input, validate, FormField, SlotRepository,
    SqliteSlotRepository, StoreError, Student, StudentDraft, StudentStore,
};
use std::error::Error;
use std::io::{BufRead, Write};
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "rollbook.sqlite3";

fn cli() -> Command {
    Command::new("rollbook")
        .version(rollbook_core::core_version())
        .about("Student roster backed by a local SQLite slot")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .default_value(DEFAULT_DB_FILE_NAME)
                .help("SQLite file holding the roster"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .global(true)
                .help("Absolute directory for rolling logs; logging is off when unset"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("trace|debug|info|warn|error (defaults by build mode)"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("list").about("Show every student in insertion order"))
        .subcommand(
            Command::new("add")
                .about("Validate and add one student")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("class").long("class").default_value(""))
                .arg(
                    Arg::new("subject")
                        .long("subject")
                        .action(ArgAction::Append)
                        .help("Repeat for several subjects; at least one is required"),
                )
                .arg(
                    Arg::new("phone")
                        .long("phone")
                        .required(true)
                        .help("Non-digits are stripped before validation"),
                )
                .arg(Arg::new("address").long("address").default_value("")),
        )
        .subcommand(
            Command::new("remove")
                .about("Delete one student by id")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode, Box<dyn Error>> {
    if let Some(log_dir) = matches.get_one::<String>("log-dir") {
        let level = matches
            .get_one::<String>("log-level")
            .cloned()
            .unwrap_or_else(|| rollbook_core::default_log_level().to_string());
        init_logging(&level, log_dir)?;
    }

    let db_path = matches
        .get_one::<String>("db")
        .map(String::as_str)
        .unwrap_or(DEFAULT_DB_FILE_NAME);
    let conn = open_db(db_path)?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let mut store = StudentStore::load(repo);
    store.on_change(|students| info!("event=view_refresh module=cli count={}", students.len()));

    match matches.subcommand() {
        Some(("list", _)) => {
            render(store.list());
            Ok(ExitCode::SUCCESS)
        }
        Some(("add", args)) => add(&mut store, args),
        Some(("remove", args)) => remove(&mut store, args),
        _ => Ok(ExitCode::FAILURE),
    }
}

fn add<R: SlotRepository>(
    store: &mut StudentStore<R>,
    args: &ArgMatches,
) -> Result<ExitCode, Box<dyn Error>> {
    let text = |id: &str| args.get_one::<String>(id).cloned().unwrap_or_default();
    let draft = StudentDraft {
        name: text("name"),
        grade: text("class"),
        subjects: args
            .get_many::<String>("subject")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        phone: sanitize_phone_input(&text("phone")),
        address: text("address"),
    };

    let report = validate(&draft);
    if !report.is_valid() {
        for field in report.failed_fields() {
            eprintln!("{field}: {}", field_error_message(field, &draft));
        }
        return Ok(ExitCode::FAILURE);
    }

    let student = store.add(&draft)?;
    store.flush()?;
    println!("Student added successfully! (id {})", student.id);
    render(store.list());
    Ok(ExitCode::SUCCESS)
}

fn remove<R: SlotRepository>(
    store: &mut StudentStore<R>,
    args: &ArgMatches,
) -> Result<ExitCode, Box<dyn Error>> {
    let id = *args
        .get_one::<i64>("id")
        .ok_or("missing required argument `id`")?;
    let Some(student) = store.get(id) else {
        eprintln!("no student with id {id}");
        return Ok(ExitCode::FAILURE);
    };

    if !args.get_flag("yes") && !confirm(&format!("Delete {} (id {id})?", student.name))? {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    if !delete_confirmed(store, id)? {
        eprintln!("no student with id {id}");
        return Ok(ExitCode::FAILURE);
    }
    println!("Student deleted successfully!");
    render(store.list());
    Ok(ExitCode::SUCCESS)
}

/// Runs after the confirmation guard; returns whether a record was removed.
fn delete_confirmed<R: SlotRepository>(
    store: &mut StudentStore<R>,
    id: i64,
) -> Result<bool, StoreError> {
    if !store.remove(id) {
        return Ok(false);
    }
    store.flush()?;
    Ok(true)
}

fn field_error_message(field: FormField, draft: &StudentDraft) -> String {
    match field {
        FormField::Name => "only letters and spaces are allowed".to_string(),
        FormField::Phone => format!(
            "phone must be exactly {} digits",
            rollbook_core::validation::form::PHONE_DIGITS
        ),
        FormField::Subject => "select at least one subject".to_string(),
        FormField::Address => format!(
            "address is {} characters; maximum is {}",
            address_char_count(&draft.address),
            rollbook_core::validation::form::ADDRESS_MAX_CHARS
        ),
    }
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

fn render(students: &[Student]) {
    if students.is_empty() {
        println!("(no students)");
        return;
    }
    println!(
        "{:>4}  {:<24} {:<6} {:<20} {:<10}  {}",
        "ID", "NAME", "CLASS", "SUBJECT", "PHONE", "ADDRESS"
    );
    for student in students {
        println!(
            "{:>4}  {:<24} {:<6} {:<20} {:<10}  {}",
            student.id,
            student.name,
            student.grade,
            student.subject,
            student.phone,
            student.address
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{cli, delete_confirmed};
    use rollbook_core::{MemorySlotRepository, StudentStore};

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn add_collects_repeated_subjects() {
        let matches = cli()
            .try_get_matches_from([
                "rollbook", "add", "--name", "Asha Rao", "--subject", "Math", "--subject",
                "Art", "--phone", "9000000000",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let subjects: Vec<_> = args.get_many::<String>("subject").unwrap().collect();
        assert_eq!(subjects, ["Math", "Art"]);
    }

    #[test]
    fn remove_parses_integer_id() {
        let matches = cli()
            .try_get_matches_from(["rollbook", "remove", "3", "--yes"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<i64>("id"), Some(&3));
        assert!(args.get_flag("yes"));
    }

    #[test]
    fn delete_confirmed_reports_whether_a_record_went_away() {
        let repo = MemorySlotRepository::new();
        let mut store = StudentStore::load(&repo);

        assert!(delete_confirmed(&mut store, 2).unwrap());
        assert!(!delete_confirmed(&mut store, 2).unwrap());
        let ids: Vec<_> = store.list().iter().map(|student| student.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
