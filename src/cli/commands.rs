//! CLI command implementations
//!
//! Every command loads configuration first (a missing default file means
//! built-in defaults), installs logging, then does one thing and prints one
//! JSON response.

use std::path::Path;

use serde_json::{json, Value};

use crate::character::CharacterFields;
use crate::config::Config;
use crate::executor::MemoryCharacterStore;
use crate::guide::{GuideLoader, Universe};
use crate::observability::{init_logging, log_event_with_fields, Event};
use crate::planner::{CharacterQueryPlanner, SqlParam};
use crate::service::CharacterService;
use crate::validator::validate as validate_fields;

use super::args::{ActorArgs, Command, QueryArgs};
use super::errors::CliResult;
use super::io::{read_json_file, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate {
            config,
            guide,
            character,
        } => validate(&config, guide.as_deref(), &character),
        Command::Plan {
            config,
            actor,
            query,
        } => plan(&config, &actor, &query),
        Command::List {
            config,
            characters,
            allow_lexicographic,
            actor,
            query,
        } => list(&config, &characters, allow_lexicographic, &actor, &query),
        Command::DefaultGuide { config } => default_guide(&config),
    }
}

fn boot(config_path: &Path) -> CliResult<Config> {
    let config = Config::load_or_default(config_path)?;
    init_logging(&config.log_level, config.log_json);
    announce_config(&config, config_path);
    Ok(config)
}

/// Reports the active configuration; call once a subscriber is installed
fn announce_config(config: &Config, config_path: &Path) {
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "defaults".to_string()
    };
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("page_limit", &config.character_page_limit.to_string()),
            ("source", &source),
        ],
    );
}

/// Validate a character fields file and print the normalized fields
pub fn validate(config_path: &Path, guide_path: Option<&Path>, character_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;
    let guide = match guide_path {
        Some(path) => GuideLoader::load_file(path)?,
        None => config.guide_defaults()?.guide,
    };

    let fields = CharacterFields::from_json(read_json_file(character_path)?)?;
    match validate_fields(&fields, &guide) {
        Ok(normalized) => {
            log_event_with_fields(
                Event::CharacterValidated,
                &[("path", &character_path.display().to_string())],
            );
            write_response(normalized.to_json())
        }
        Err(err) => {
            log_event_with_fields(
                Event::ValidationRejected,
                &[
                    ("code", err.code().code()),
                    ("path", &character_path.display().to_string()),
                ],
            );
            write_error(err.code().code(), err.message())?;
            Err(err.into())
        }
    }
}

/// Print the select and count SQL for a list request
pub fn plan(config_path: &Path, actor: &ActorArgs, query: &QueryArgs) -> CliResult<()> {
    let config = boot(config_path)?;
    let planner = CharacterQueryPlanner::new(config.character_page_limit);
    let plan = planner.plan(actor.universe, &actor.context(), &query.filter())?;

    let (select_sql, select_params) = plan.select.to_sql();
    let (count_sql, count_params) = plan.count.to_sql();
    write_response(json!({
        "select": { "sql": select_sql, "params": params_json(&select_params) },
        "count": { "sql": count_sql, "params": params_json(&count_params) },
    }))
}

/// Run a list request against a characters file and print the page
pub fn list(
    config_path: &Path,
    characters_path: &Path,
    allow_lexicographic: bool,
    actor: &ActorArgs,
    query: &QueryArgs,
) -> CliResult<()> {
    let config = boot(config_path)?;
    let defaults = config.guide_defaults()?;
    let store = MemoryCharacterStore::load_file(characters_path)?;

    let mut universe = Universe::new("", "", &defaults);
    universe.id = actor.universe;
    universe.settings.allow_lexicographical_ordering = allow_lexicographic;

    let service = CharacterService::new(config.character_page_limit);
    let page = service.list(&store, &universe, &actor.context(), &query.filter())?;
    write_response(serde_json::to_value(&page)?)
}

/// Print the guide and settings new universes start from
pub fn default_guide(config_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;
    let defaults = config.guide_defaults()?;
    write_response(json!({
        "guide": serde_json::to_value(&defaults.guide)?,
        "settings": serde_json::to_value(&defaults.settings)?,
    }))
}

fn params_json(params: &[SqlParam]) -> Vec<Value> {
    params
        .iter()
        .map(|param| match param {
            SqlParam::Uuid(id) => json!(id.to_string()),
            SqlParam::Text(text) => json!(text),
            SqlParam::Int(n) => json!(n),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_config_announced_to_installed_subscriber() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let missing = Path::new("/nonexistent/charbase.json");
        let config = Config::load_or_default(missing).unwrap();
        tracing::subscriber::with_default(subscriber, || announce_config(&config, missing));

        let output = log.contents();
        assert!(output.contains("CONFIG_LOADED"), "{}", output);
        assert!(output.contains("page_limit=20 source=defaults"), "{}", output);
    }

    #[test]
    fn test_config_load_emits_nothing_on_its_own() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        io::Write::write_all(&mut file, br#"{"character_page_limit": 5}"#).unwrap();
        let config = tracing::subscriber::with_default(subscriber, || Config::load(file.path())).unwrap();

        assert_eq!(config.character_page_limit, 5);
        assert!(log.contents().is_empty());
    }

    #[test]
    fn test_params_json() {
        let id = Uuid::new_v4();
        let values = params_json(&[
            SqlParam::Uuid(id),
            SqlParam::Text("%a%".into()),
            SqlParam::Int(20),
        ]);
        assert_eq!(values, vec![json!(id.to_string()), json!("%a%"), json!(20)]);
    }
}
