//! Implementation of the `glossa eval` command.

use std::path::PathBuf;

use glossa::{Args, Bundle, Value};
use icu_locale_core::Locale;
use miette::{miette, IntoDiagnostic};
use serde::Serialize;
use tracing::warn;

use super::load_resource;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// JSON resource files to load, in order (repeatable)
    #[arg(long = "resource", required = true)]
    pub resources: Vec<PathBuf>,

    /// Message to format, as `id` or `id.attribute`
    #[arg(long, required = true)]
    pub message: String,

    /// Arguments in name=value format (repeatable)
    #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,

    /// Locale used for numbers, dates and plural rules
    #[arg(long, default_value = "en-US", env = "GLOSSA_LOCALE")]
    pub locale: String,

    /// Do not wrap placeables in Unicode isolation marks
    #[arg(long)]
    pub no_isolating: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
    pub errors: Vec<String>,
}

/// Parse a name=value argument string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid argument format '{}': expected name=value", s))?;
    if name.is_empty() {
        return Err(format!("invalid argument format '{}': empty name", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Split `id.attribute` into its parts. Only the first `.` separates.
fn split_message_id(message: &str) -> (&str, Option<&str>) {
    match message.split_once('.') {
        Some((id, attribute)) => (id, Some(attribute)),
        None => (message, None),
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let locale = Locale::try_from_str(&args.locale)
        .map_err(|e| miette!("Invalid locale '{}': {}", args.locale, e))?;
    let mut bundle = Bundle::builder()
        .locales(vec![locale])
        .use_isolating(!args.no_isolating)
        .build();

    for path in &args.resources {
        let resource = load_resource(path)?;
        for error in bundle.add_resource(resource) {
            warn!(file = %path.display(), %error, "entry skipped");
        }
    }

    let arguments: Args = args
        .args
        .iter()
        .map(|(name, value)| (name.clone(), Value::try_number(value)))
        .collect();

    let (id, attribute) = split_message_id(&args.message);
    let mut errors = Vec::new();
    let result = match attribute {
        Some(attribute) => {
            bundle.format_attribute(id, attribute, Some(&arguments), Some(&mut errors))
        }
        None => bundle.format_message(id, Some(&arguments), Some(&mut errors)),
    };

    match result {
        Ok(text) => {
            let code = if errors.is_empty() {
                exitcode::OK
            } else {
                exitcode::DATAERR
            };
            let errors: Vec<String> = errors.iter().map(ToString::to_string).collect();
            if args.json {
                let output = EvalResult {
                    result: text,
                    errors,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{}", text);
                for error in &errors {
                    eprintln!("Resolution error: {}", error);
                }
            }
            Ok(code)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Evaluation error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
