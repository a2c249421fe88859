//! Command-line surface of the `olc` binary.
//!
//! # Usage
//!
//! ```bash
//! # Add a link, letting the classifier fill in metadata
//! olc add -l shodan.io
//!
//! # Add with explicit fields
//! olc add -l https://example.com -n "Example" -t forum --sub general --tags osint,people
//!
//! # Pipe the URL in
//! echo "example.com" | olc add
//!
//! # Browse
//! olc ls
//! olc find forum
//! olc view -l example.com
//! olc grouped
//!
//! # Change or remove
//! olc edit -l example.com --rating 4.5
//! olc rm -l example.com
//! ```

mod render;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::application::services::{CatalogService, ClassificationOutcome};
use crate::config::Config;
use crate::domain::entities::LinkFields;
use crate::error::AppError;
use crate::infrastructure::classifier::{Classifier, CohereClassifier, NullClassifier};
use crate::infrastructure::persistence::JsonFileCatalogRepository;
use crate::utils::field_parser::{parse_flag, parse_rating, parse_rating_count, split_list};

type Service = CatalogService<JsonFileCatalogRepository>;

/// OSINT link catalog with AI classification.
#[derive(Parser, Debug)]
#[command(name = "olc")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Catalog file (overrides OLC_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Catalog commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new link (AI auto-fill when only a domain or URL is given)
    Add {
        /// Domain (example.com) or URL (https://example.com); read from stdin when omitted
        #[arg(short, long)]
        link: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List all links
    #[command(visible_alias = "list")]
    Ls,

    /// Edit a link
    Edit {
        /// Domain or URL of the entry to edit
        #[arg(short, long)]
        link: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Remove a link
    #[command(visible_alias = "remove")]
    Rm {
        /// Domain or URL of the entry to remove; read from stdin when omitted
        #[arg(short, long)]
        link: Option<String>,
    },

    /// Search links
    Find {
        /// Search term (case-insensitive)
        query: String,
    },

    /// View detailed information
    View {
        /// Domain or URL of the entry to show
        #[arg(short, long)]
        link: String,
    },

    /// List links grouped by type and subtype
    Grouped,
}

/// Entry fields shared by `add` and `edit`, as typed on the command line.
///
/// Empty values count as not supplied.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Name of the resource
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Description
    #[arg(short = 'd', long = "desc")]
    pub description: Option<String>,

    /// Main type/category
    #[arg(short = 't', long = "type")]
    pub entry_type: Option<String>,

    /// One or more subtypes
    #[arg(long = "sub", num_args = 1.., value_name = "SUBTYPE")]
    pub subtypes: Option<Vec<String>>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Comma-separated user roles
    #[arg(long)]
    pub roles: Option<String>,

    /// Language (default: en)
    #[arg(long = "lang")]
    pub language: Option<String>,

    /// Cost model (free/freemium/paid)
    #[arg(long)]
    pub cost: Option<String>,

    /// Requires account (true/false)
    #[arg(long = "account", value_name = "BOOL")]
    pub requires_account: Option<String>,

    /// Comma-separated data types
    #[arg(long, alias = "data_types")]
    pub data_types: Option<String>,

    /// API available (true/false)
    #[arg(long = "api", value_name = "BOOL")]
    pub api_available: Option<String>,

    /// Rating (0-5)
    #[arg(long, allow_hyphen_values = true)]
    pub rating: Option<String>,

    /// Number of ratings
    #[arg(long, alias = "rating_count", allow_hyphen_values = true)]
    pub rating_count: Option<String>,
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<FieldArgs> for LinkFields {
    type Error = AppError;

    /// Coerces raw flag values: lists are comma-split, booleans are `true`
    /// (any case) or false, numbers must parse.
    fn try_from(args: FieldArgs) -> Result<Self, Self::Error> {
        Ok(LinkFields {
            name: supplied(args.name),
            description: supplied(args.description),
            entry_type: supplied(args.entry_type),
            subtypes: args.subtypes.filter(|s| !s.is_empty()),
            tags: supplied(args.tags).map(|v| split_list(&v)),
            roles: supplied(args.roles).map(|v| split_list(&v)),
            language: supplied(args.language),
            cost: supplied(args.cost),
            requires_account: supplied(args.requires_account).map(|v| parse_flag(&v)),
            data_types: supplied(args.data_types).map(|v| split_list(&v)),
            api_available: supplied(args.api_available).map(|v| parse_flag(&v)),
            rating: supplied(args.rating)
                .map(|v| parse_rating(&v))
                .transpose()?,
            rating_count: supplied(args.rating_count)
                .map(|v| parse_rating_count(&v))
                .transpose()?,
        })
    }
}

/// Runs one command against the configured catalog.
///
/// Missing input, duplicates and unknown entries are printed as status
/// lines and count as success.
///
/// # Errors
///
/// Returns an error for invalid field values, unreadable stdin and catalog
/// read/write failures.
pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let repository = Arc::new(JsonFileCatalogRepository::new(config.data_file.clone()));
    debug!(
        path = %repository.path().display(),
        command = ?cli.command,
        "Dispatching command"
    );

    let service = CatalogService::new(Arc::clone(&repository), build_classifier(config));
    let result = dispatch(cli.command, &service).await;

    for warning in catalog_warnings(&repository) {
        println!("{}", warning.yellow());
    }

    result
}

async fn dispatch(command: Commands, service: &Service) -> Result<()> {
    match command {
        Commands::Add { link, fields } => {
            let link = link_or_stdin(link).await?;
            report(handle_add(service, link, fields).await)
        }
        Commands::Ls => report(handle_list(service).await),
        Commands::Edit { link, fields } => report(handle_edit(service, &link, fields).await),
        Commands::Rm { link } => {
            let link = link_or_stdin(link).await?;
            report(handle_remove(service, link).await)
        }
        Commands::Find { query } => report(handle_find(service, &query).await),
        Commands::View { link } => report(handle_view(service, &link).await),
        Commands::Grouped => report(handle_grouped(service).await),
    }
}

/// Console notes about a catalog file that could not be parsed.
fn catalog_warnings(repository: &JsonFileCatalogRepository) -> Vec<String> {
    let path = repository.path().display();
    let mut warnings = Vec::new();

    if let Some(error) = repository.load_error() {
        warnings.push(format!(
            "⚠ Could not parse {}: {}; treated as empty",
            path, error
        ));
    }
    if let Some(backup) = repository.backup() {
        warnings.push(format!(
            "⚠ Could not parse {}; previous contents saved to {}",
            path,
            backup.display()
        ));
    }

    warnings
}

/// Picks the Cohere classifier when a key is configured.
fn build_classifier(config: &Config) -> Arc<dyn Classifier> {
    if !config.is_classifier_enabled() {
        debug!("No COHERE_API_KEY set, classification disabled");
        return Arc::new(NullClassifier::new());
    }
    let api_key = config.cohere_api_key.clone().unwrap_or_default();

    match CohereClassifier::new(
        api_key,
        config.cohere_api_url.clone(),
        config.cohere_model.clone(),
        config.classifier_temperature,
        config.classifier_timeout(),
    ) {
        Ok(classifier) => Arc::new(classifier),
        Err(e) => {
            warn!("Failed to set up classifier: {}. Using NullClassifier.", e);
            Arc::new(NullClassifier::new())
        }
    }
}

/// Falls back to piped stdin when no link was given.
async fn link_or_stdin(link: Option<String>) -> Result<Option<String>> {
    let piped = !std::io::stdin().is_terminal();
    link_or_reader(link, tokio::io::stdin(), piped).await
}

/// Reads the link from `reader` when none was given and input is piped.
///
/// Empty input yields `Some("")`, which the catalog rejects as missing.
async fn link_or_reader<R>(
    link: Option<String>,
    mut reader: R,
    piped: bool,
) -> Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    if link.as_deref().is_some_and(|l| !l.is_empty()) || !piped {
        return Ok(link);
    }

    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .await
        .context("Failed to read link from stdin")?;

    Ok(Some(input.trim().to_string()))
}

/// Prints reportable outcomes and propagates the rest.
fn report(result: Result<(), AppError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_reportable() => {
            debug!(code = e.code(), details = %e.details(), "{}", e);
            println!("{}", format!("✗ {}", e).red());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn handle_add(
    service: &Service,
    link: Option<String>,
    fields: FieldArgs,
) -> Result<(), AppError> {
    let fields = LinkFields::try_from(fields)?;
    let added = service.add(link.as_deref(), fields).await?;

    match &added.classification {
        ClassificationOutcome::Applied => {
            println!(
                "{}",
                format!("⚡ Classified {} with AI", added.entry.link).yellow()
            );
        }
        ClassificationOutcome::Unavailable(reason) => {
            println!(
                "{}",
                format!("ℹ AI classification unavailable: {}", reason).yellow()
            );
        }
        ClassificationOutcome::NotRequested => {}
    }

    println!(
        "{}",
        format!("✓ Entry added for {}", added.entry.link).green()
    );

    Ok(())
}

async fn handle_list(service: &Service) -> Result<(), AppError> {
    let entries = service.list().await?;

    if entries.is_empty() {
        println!("{}", "No entries found.".yellow());
        return Ok(());
    }

    print!("{}", render::entry_table(&entries));
    Ok(())
}

async fn handle_edit(service: &Service, link: &str, fields: FieldArgs) -> Result<(), AppError> {
    let fields = LinkFields::try_from(fields)?;
    let entry = service.edit(link, fields).await?;

    println!("{}", format!("~ Updated entry for {}", entry.link).blue());
    Ok(())
}

async fn handle_remove(service: &Service, link: Option<String>) -> Result<(), AppError> {
    let (url, _removed) = service.remove(link.as_deref()).await?;

    println!("{}", format!("- Deleted entry for {}", url).red());
    Ok(())
}

async fn handle_find(service: &Service, query: &str) -> Result<(), AppError> {
    let results = service.find(query).await?;

    if results.is_empty() {
        println!("{}", format!("No results for '{}'", query).yellow());
        return Ok(());
    }

    print!("{}", render::search_table(query, &results));
    Ok(())
}

async fn handle_view(service: &Service, link: &str) -> Result<(), AppError> {
    let entry = service.view(link).await?;

    print!("{}", render::entry_details(&entry));
    Ok(())
}

async fn handle_grouped(service: &Service) -> Result<(), AppError> {
    let groups = service.grouped().await?;

    if groups.is_empty() {
        println!("{}", "No entries found.".yellow());
        return Ok(());
    }

    print!("{}", render::grouped_view(&groups));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::CatalogRepository;
    use crate::infrastructure::classifier::{ClassifierError, DEFAULT_API_URL, DEFAULT_MODEL};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn add_fields(cli: Cli) -> FieldArgs {
        match cli.command {
            Commands::Add { fields, .. } => fields,
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_add_parses_all_field_flags() {
        let cli = parse(&[
            "olc", "add", "-l", "example.com", "-n", "Example", "-d", "A forum", "-t", "forum",
            "--sub", "general", "people", "--tags", "osint,search", "--roles", "analyst",
            "--lang", "de", "--cost", "paid", "--account", "TRUE", "--data-types", "emails",
            "--api", "no", "--rating", "4.5", "--rating-count", "12",
        ]);

        let fields = LinkFields::try_from(add_fields(cli)).unwrap();

        assert_eq!(fields.name.as_deref(), Some("Example"));
        assert_eq!(fields.description.as_deref(), Some("A forum"));
        assert_eq!(fields.entry_type.as_deref(), Some("forum"));
        assert_eq!(
            fields.subtypes,
            Some(vec!["general".to_string(), "people".to_string()])
        );
        assert_eq!(
            fields.tags,
            Some(vec!["osint".to_string(), "search".to_string()])
        );
        assert_eq!(fields.roles, Some(vec!["analyst".to_string()]));
        assert_eq!(fields.language.as_deref(), Some("de"));
        assert_eq!(fields.cost.as_deref(), Some("paid"));
        assert_eq!(fields.requires_account, Some(true));
        assert_eq!(fields.data_types, Some(vec!["emails".to_string()]));
        assert_eq!(fields.api_available, Some(false));
        assert_eq!(fields.rating, Some(4.5));
        assert_eq!(fields.rating_count, Some(12));
    }

    #[test]
    fn test_underscore_flag_aliases() {
        let cli = parse(&[
            "olc", "add", "--data_types", "a,b", "--rating_count", "3",
        ]);

        let fields = LinkFields::try_from(add_fields(cli)).unwrap();

        assert_eq!(fields.data_types, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(fields.rating_count, Some(3));
    }

    #[test]
    fn test_empty_values_are_not_supplied() {
        let cli = parse(&["olc", "add", "-l", "x.org", "-n", "", "--rating", "", "--tags", ""]);

        let fields = LinkFields::try_from(add_fields(cli)).unwrap();

        assert_eq!(fields, LinkFields::default());
    }

    #[test]
    fn test_invalid_rating_is_validation_error() {
        let args = FieldArgs {
            rating: Some("great".to_string()),
            ..FieldArgs::default()
        };

        let err = LinkFields::try_from(args).unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert!(!err.is_reportable());
    }

    #[test]
    fn test_negative_rating_count_reaches_parser() {
        let cli = parse(&["olc", "edit", "-l", "x.org", "--rating-count", "-1"]);

        let Commands::Edit { fields, .. } = cli.command else {
            panic!("expected edit");
        };

        assert!(LinkFields::try_from(fields).is_err());
    }

    #[test]
    fn test_command_aliases() {
        assert!(matches!(parse(&["olc", "list"]).command, Commands::Ls));
        assert!(matches!(
            parse(&["olc", "remove", "-l", "x.org"]).command,
            Commands::Rm { link: Some(_) }
        ));
    }

    #[test]
    fn test_global_data_file_flag() {
        let cli = parse(&["olc", "ls", "--data-file", "/tmp/catalog.json"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/catalog.json")));

        let cli = parse(&["olc", "--data-file", "other.json", "grouped"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("other.json")));
        assert!(matches!(cli.command, Commands::Grouped));
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["olc", "edit"]).is_err());
        assert!(Cli::try_parse_from(["olc", "view"]).is_err());
        assert!(Cli::try_parse_from(["olc", "find"]).is_err());
        assert!(Cli::try_parse_from(["olc"]).is_err());
    }

    #[test]
    fn test_rm_link_is_optional() {
        assert!(matches!(
            parse(&["olc", "rm"]).command,
            Commands::Rm { link: None }
        ));
    }

    #[test]
    fn test_report_swallows_reportable_errors() {
        assert!(report(Err(AppError::missing_input("No domain or URL provided"))).is_ok());
        assert!(report(Err(AppError::not_found("gone", serde_json::json!({})))).is_ok());

        let err = report(Err(AppError::storage("disk full", serde_json::json!({})))).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }

    #[tokio::test]
    async fn test_piped_link_is_read_and_trimmed() {
        let link = link_or_reader(None, b"example.com\n".as_slice(), true)
            .await
            .unwrap();

        assert_eq!(link.as_deref(), Some("example.com"));
    }

    #[tokio::test]
    async fn test_explicit_link_wins_over_piped_input() {
        let link = link_or_reader(Some("given.org".to_string()), b"piped.org".as_slice(), true)
            .await
            .unwrap();

        assert_eq!(link.as_deref(), Some("given.org"));
    }

    #[tokio::test]
    async fn test_terminal_without_link_reads_nothing() {
        let link = link_or_reader(None, b"ignored.org".as_slice(), false)
            .await
            .unwrap();

        assert_eq!(link, None);
    }

    #[tokio::test]
    async fn test_empty_piped_input_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(JsonFileCatalogRepository::new(dir.path().join("links.json")));
        let service = CatalogService::new(repository, Arc::new(NullClassifier::new()));

        let link = link_or_reader(None, b"  \n".as_slice(), true).await.unwrap();
        assert_eq!(link.as_deref(), Some(""));

        let err = handle_add(&service, link, FieldArgs::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingInput { .. }));
        assert!(!dir.path().join("links.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_catalog_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repository = JsonFileCatalogRepository::new(&path);

        assert!(catalog_warnings(&repository).is_empty());

        repository.load().await.unwrap();
        let warnings = catalog_warnings(&repository);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("treated as empty"));
        assert!(warnings[0].contains(&path.display().to_string()));

        repository.save(&[]).await.unwrap();
        let warnings = catalog_warnings(&repository);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("previous contents saved to"));
        assert!(warnings[0].contains(".corrupt-"));
    }

    #[test]
    fn test_valid_catalog_has_no_warnings() {
        let repository = JsonFileCatalogRepository::new("unused.json");
        assert!(catalog_warnings(&repository).is_empty());
    }

    #[tokio::test]
    async fn test_no_api_key_builds_disabled_classifier() {
        let config = Config {
            data_file: PathBuf::from("links.json"),
            cohere_api_key: None,
            cohere_api_url: DEFAULT_API_URL.to_string(),
            cohere_model: DEFAULT_MODEL.to_string(),
            classifier_temperature: 0.3,
            classifier_timeout_seconds: 60,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        };
        assert!(!config.is_classifier_enabled());

        let result = build_classifier(&config).classify("https://example.com").await;

        assert!(matches!(result, Err(ClassifierError::Disabled)));
    }
}
