//! `onoma` command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto `NameService` calls.
//! - Print records as JSON lines and plain values one per line.

mod args;

use anyhow::{bail, Context};
use args::{AddArgs, Cli, Command, RandomArgs, SearchArgs};
use clap::Parser;
use onoma_core::{
    default_log_level, init_logging, NameQuery, NameService, PersonName, RandomNameQuery,
    SqliteNameRepository,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let repo = SqliteNameRepository::open(&cli.db)
        .with_context(|| format!("failed to open name store `{}`", cli.db.display()))?;
    let mut service = NameService::new(repo);

    match cli.command {
        Command::Cultures => {
            for culture in service.supported_cultures()? {
                println!("{culture}");
            }
        }
        Command::Get { id } => match service.select_name(id)? {
            Some(name) => println!("{}", serde_json::to_string(&name)?),
            None => bail!("name {id} not found"),
        },
        Command::Search(args) => {
            for name in service.select_names(&search_query(args))? {
                println!("{}", serde_json::to_string(&name)?);
            }
        }
        Command::Random(args) => {
            for value in service.select_names_random(&random_query(args))? {
                println!("{value}");
            }
        }
        Command::Add(args) => {
            let id = service.insert_name(&new_name(args))?;
            println!("{id}");
        }
        Command::Import { file } => {
            let summary = service
                .import_file(&file)
                .with_context(|| format!("failed to import `{}`", file.display()))?;
            println!("{}", summary.imported());
        }
    }

    Ok(())
}

fn search_query(args: SearchArgs) -> NameQuery {
    NameQuery {
        pattern: args.pattern,
        culture: args.culture,
        gender: args.filters.gender,
        component: args.filters.component,
        limit: args.limit,
    }
}

fn random_query(args: RandomArgs) -> RandomNameQuery {
    RandomNameQuery {
        count: args.count,
        cultures: args.cultures,
        gender: args.filters.gender,
        component: args.filters.component,
        field: args.field,
    }
}

fn new_name(args: AddArgs) -> PersonName {
    PersonName::new(args.culture, args.component, args.gender, args.alphabetic)
        .with_ideographic(args.ideographic)
        .with_phonetic(args.phonetic)
}

#[cfg(test)]
mod tests {
    use super::{random_query, search_query};
    use crate::args::{Cli, Command};
    use clap::Parser;
    use onoma_core::{Component, Gender, SpellingField};

    #[test]
    fn search_arguments_map_to_query() {
        let cli = Cli::parse_from([
            "onoma", "--db", "names.db3", "search", "agni", "--culture", "PL", "--gender",
            "f", "--limit", "5",
        ]);
        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };

        let query = search_query(args);
        assert_eq!(query.pattern, "agni");
        assert_eq!(query.culture.as_deref(), Some("PL"));
        assert_eq!(query.gender, Some(Gender::Feminine));
        assert_eq!(query.component, None);
        assert_eq!(query.limit, Some(5));
    }

    #[test]
    fn random_arguments_accept_repeated_cultures() {
        let cli = Cli::parse_from([
            "onoma", "random", "3", "--culture", "PL", "--culture", "DE", "--component",
            "Family", "--field", "phonetic",
        ]);
        let Command::Random(args) = cli.command else {
            panic!("expected random command");
        };

        let query = random_query(args);
        assert_eq!(query.count, 3);
        assert_eq!(query.cultures, vec!["PL", "DE"]);
        assert_eq!(query.component, Some(Component::Family));
        assert_eq!(query.field, SpellingField::Phonetic);
    }

    #[test]
    fn unknown_gender_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["onoma", "search", "a", "--gender", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn log_level_without_log_dir_is_rejected() {
        let err = Cli::try_parse_from(["onoma", "--log-level", "debug", "cultures"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from([
            "onoma",
            "--log-level",
            "debug",
            "--log-dir",
            "/tmp/onoma-logs",
            "cultures",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/onoma-logs"));
    }
}
