use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;

use store::models::Reference;
use store::{search_query, DataPaths, Store, SwordDrillable};

/// CLI for looking up Bible verses and Strong's definitions
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding books.csv, interlinear.csv and strongs.csv
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the verses of a reference (e.g. "John 3:16")
    Verse { reference: String },

    /// Print a Strong's definition (e.g. H430)
    Strongs { number: String },

    /// Print the verses whose King James or World English text contains the query
    Search {
        query: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

/// Runs a command against the store, writing results to `out`.
fn run<SD: SwordDrillable, W: Write>(
    command: &Command,
    store: &SD,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Verse { reference } => {
            let reference: Reference = reference.parse()?;
            let (book, verses) = store
                .verses(&reference)
                .ok_or_else(|| format!("'{}' was not found.", reference.book))?;
            if verses.is_empty() {
                return Err(format!("'{}' was not found.", reference).into());
            }

            writeln!(
                out,
                "{}",
                Reference {
                    book: book.name.to_owned(),
                    ..reference
                }
            )?;
            for v in verses {
                writeln!(out, "{} {}", v.verse, v.kjv)?;
            }
        }
        Command::Strongs { number } => {
            let d = store
                .strongs(number)
                .ok_or_else(|| format!("Strong's number '{}' was not found.", number))?;
            writeln!(out, "{} {} ({})", d.number, d.headword, d.part_of_speech)?;
            writeln!(out, "{}", d.gloss)?;
        }
        Command::Search { query, limit } => {
            for v in store.search_verses(search_query(query)?, *limit) {
                writeln!(out, "{} {}:{} {}", v.book_name, v.chapter, v.verse, v.kjv)?;
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let result = Store::open(&DataPaths::in_dir(&cli.data_dir))
        .map_err(Box::<dyn Error>::from)
        .and_then(|store| run(&cli.command, &store, &mut io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(command: Command) -> Result<String, Box<dyn Error>> {
        let store = Store::open(&DataPaths::in_dir("../store/tests/fixtures"))?;
        let mut out = Vec::new();
        run(&command, &store, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn verse() {
        let result = output(Command::Verse {
            reference: "psa 119:105".to_string(),
        })
        .unwrap();
        assert_eq!(
            result,
            "Psalms 119:105\n105 NUN. Thy word is a lamp unto my feet, and a light unto my path.\n"
        );

        assert!(output(Command::Verse {
            reference: "John three".to_string(),
        })
        .is_err());
        assert!(output(Command::Verse {
            reference: "John 5".to_string(),
        })
        .is_err());
    }

    #[test]
    fn strongs() {
        let result = output(Command::Strongs {
            number: "h430".to_string(),
        })
        .unwrap();
        assert!(result.starts_with("H430 אֱלֹהִים (noun)\n1) (plural) rulers, judges\n"));

        assert!(output(Command::Strongs {
            number: "3056".to_string(),
        })
        .is_err());
    }

    #[test]
    fn search() {
        let result = output(Command::Search {
            query: "light".to_string(),
            limit: 2,
        })
        .unwrap();
        assert_eq!(result.lines().count(), 2);
        assert!(result.starts_with("Genesis 1:3 And God said"));

        let err = output(Command::Search {
            query: " l ".to_string(),
            limit: 2,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Search queries need at least 2 characters.");
    }

    #[test]
    fn arguments() {
        let cli = Cli::try_parse_from([
            "cli",
            "--data-dir",
            "/srv/bible",
            "search",
            "lamp",
            "--limit",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/srv/bible"));
        assert!(matches!(cli.command, Command::Search { limit: 5, .. }));
    }
}
