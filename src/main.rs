use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Command, CommandLine};
use rollbook::{
    session::{Session, SessionError},
    student::StudentRecord,
};

mod cli;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CommandLine::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CommandLine) -> Result<(), SessionError> {
    let mut session = Session::open(args.session_config())?;

    match args.command {
        Command::Add { roll, name, gpa } => {
            let roll = session.add(&roll, &name, &gpa)?;
            println!("added {roll}");
        }
        Command::Update { roll, name, gpa } => {
            session.update(&roll, name.as_deref(), gpa.as_deref())?;
            print_rows([session.search(&roll)?]);
        }
        Command::Delete { roll } => {
            let removed = session.delete(&roll)?;
            println!("deleted {} ({})", removed.roll, removed.name);
        }
        Command::Search { roll } => {
            print_rows([session.search(&roll)?]);
        }
        Command::List { sort } => {
            let rows = session.view(sort.selection());
            print_rows(&rows);
            println!("{} student(s)", rows.len());
        }
        Command::Sort { key, order } => {
            session.sort_in_place(key, order)?;
            print_rows(session.store());
        }
        Command::Export { path, sort } => {
            let n = session.export_csv(&path, sort.selection())?;
            println!("exported {n} student(s) to {}", path.display());
        }
    }

    if !session.config().autosave {
        tracing::info!("autosave disabled, data file left untouched");
    }
    Ok(())
}

fn print_rows<'a>(rows: impl IntoIterator<Item = &'a StudentRecord>) {
    println!("{:<12} {:<32} {:>5}", "ROLL", "NAME", "GPA");
    for rec in rows {
        println!("{:<12} {:<32} {:>5}", rec.roll.as_str(), rec.name, rec.gpa.to_string());
    }
}
