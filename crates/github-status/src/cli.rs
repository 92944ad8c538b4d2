use std::collections::HashMap;

use clap::{
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use github_status_core::{
    ConfigFieldType,
    ConfigSchema,
};

/// Build revision baked in at compile time, if any
pub const REVISION: Option<&str> = option_env!("GIT_REVISION");

pub fn version() -> String {
    match REVISION {
        Some(revision) => format!("{} ({revision})", env!("CARGO_PKG_VERSION")),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Command line generated from the input schema
pub fn command(schema: &ConfigSchema) -> Command {
    let mut command = Command::new("github-status")
        .about("github status plugin")
        .version(version());

    for field in schema.fields {
        let mut help = field.description.to_string();
        if !field.env.is_empty() {
            help.push_str(&format!(" [env: {}]", field.env.join(", ")));
        }
        if let Some(default) = field.default_value {
            help.push_str(&format!(" [default: {default}]"));
        }

        let arg = Arg::new(field.key).long(field.key).help(help);
        let arg = match field.field_type {
            ConfigFieldType::Boolean => arg.action(ArgAction::SetTrue),
            ConfigFieldType::List => arg.action(ArgAction::Append).value_delimiter(','),
            ConfigFieldType::Text | ConfigFieldType::Password => arg.action(ArgAction::Set),
        };
        command = command.arg(arg);
    }

    command
}

/// Values given on the command line, keyed by input name.
///
/// Unset switches and absent options are left out so the environment can
/// fill them in.
pub fn flag_values(schema: &ConfigSchema, matches: &ArgMatches) -> HashMap<String, String> {
    let mut flags = HashMap::new();

    for field in schema.fields {
        let value = match field.field_type {
            ConfigFieldType::Boolean => matches.get_flag(field.key).then(|| "true".to_string()),
            ConfigFieldType::List => matches
                .get_many::<String>(field.key)
                .map(|values| values.cloned().collect::<Vec<_>>().join(",")),
            ConfigFieldType::Text | ConfigFieldType::Password => {
                matches.get_one::<String>(field.key).cloned()
            }
        };

        if let Some(value) = value {
            flags.insert(field.key.to_string(), value);
        }
    }

    flags
}
