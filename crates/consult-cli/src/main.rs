mod wizard;

use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use component_consult::{
    get_answer_schema, get_spec_schema, render_html, render_json_ui, render_text, submit_all,
    validate_answers,
};
use consult_spec::{
    CONSULTATION_FORM_ID, FormState, HeaderState, PageContext, consultation, landing_page,
    render_page,
};
use serde_json::{Map, Value, json};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wizard::{
    AnswerParseError, QuestionKind, Verbosity, WizardPayload, WizardPresenter, WizardQuestion,
    parse_choice, parse_choices,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const OUTPUT_DIR_ENV: &str = "CONSULT_OUTPUT_DIR";
const PAGE_FILE_NAME: &str = "index.html";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consultation questionnaire CLI",
    long_about = "Renders, validates and runs the consultation questionnaire, and writes the landing page"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
    Html,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SchemaKind {
    Spec,
    Answers,
}

#[derive(Subcommand)]
enum Command {
    /// Render the questionnaire with optional pre-filled answers.
    Render {
        /// Questionnaire JSON to use instead of the built-in one.
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        /// JSON file with answers to show in the controls.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Check an answers file against the questionnaire.
    Validate {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Fill in the questionnaire interactively. Nothing is saved.
    Wizard {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        /// Print the whole questionnaire and parse expectations.
        #[arg(long, alias = "debug")]
        verbose: bool,
    },
    /// Print a JSON Schema.
    Schema {
        #[arg(long, value_enum, default_value_t = SchemaKind::Answers)]
        kind: SchemaKind,
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
    },
    /// Write the landing page as a single HTML file.
    Page {
        /// Directory receiving index.html (defaults to CONSULT_OUTPUT_DIR or the working directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite an existing index.html.
        #[arg(long)]
        force: bool,
        /// Copyright year shown in the footer (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,
    },
}

/// Form id plus the component config selecting the questionnaire.
struct FormSource {
    form_id: String,
    config_json: String,
}

impl FormSource {
    fn load(spec: Option<&Path>) -> CliResult<Self> {
        let Some(path) = spec else {
            return Ok(Self {
                form_id: CONSULTATION_FORM_ID.to_string(),
                config_json: String::new(),
            });
        };
        let spec_str = fs::read_to_string(path)?;
        let spec_value: Value = serde_json::from_str(&spec_str)?;
        let form_id = spec_value
            .get("id")
            .and_then(Value::as_str)
            .ok_or("questionnaire is missing an id")?
            .to_string();
        debug!(path = %path.display(), %form_id, "using questionnaire file");
        Ok(Self {
            form_id,
            config_json: json!({ "form_spec_json": spec_str }).to_string(),
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            spec,
            answers,
            format,
        } => run_render(spec, answers, format),
        Command::Validate { spec, answers } => run_validate(spec, answers),
        Command::Wizard { spec, verbose } => run_wizard(spec, verbose),
        Command::Schema { kind, spec } => run_schema(kind, spec),
        Command::Page { out, force, year } => run_page(out, force, year),
    }
}

fn read_answers(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&contents)?;
            Ok(value.to_string())
        }
        None => Ok("{}".to_string()),
    }
}

fn run_render(
    spec: Option<PathBuf>,
    answers: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let source = FormSource::load(spec.as_deref())?;
    let answers = read_answers(answers.as_deref())?;
    let output = match format {
        RenderMode::Text => parse_component_text(&render_text(
            &source.form_id,
            &source.config_json,
            &answers,
        ))?,
        RenderMode::Html => parse_component_text(&render_html(
            &source.form_id,
            &source.config_json,
            &answers,
        ))?,
        RenderMode::Json => {
            let value = parse_component_result(&render_json_ui(
                &source.form_id,
                &source.config_json,
                &answers,
            ))?;
            serde_json::to_string_pretty(&value)?
        }
    };
    println!("{}", output);
    Ok(())
}

fn run_validate(spec: Option<PathBuf>, answers_path: PathBuf) -> CliResult<()> {
    let source = FormSource::load(spec.as_deref())?;
    let answers_json = fs::read_to_string(answers_path)?;
    let result = parse_component_result(&validate_answers(
        &source.form_id,
        &source.config_json,
        &answers_json,
    ))?;

    let valid = result["valid"].as_bool().unwrap_or(false);
    println!(
        "Validation result: {}",
        if valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &Value) {
    if let Some(errors) = result["errors"].as_array()
        && !errors.is_empty()
    {
        println!("Errors:");
        for error in errors {
            println!(
                "  {} - {}",
                error["path"].as_str().unwrap_or("<answers>"),
                error["message"].as_str().unwrap_or("<unknown>")
            );
        }
    }
    if let Some(missing) = result["missing_required"].as_array()
        && !missing.is_empty()
    {
        let missing = missing
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>();
        println!("Missing required answers: {}", missing.join(", "));
    }
}

fn run_schema(kind: SchemaKind, spec: Option<PathBuf>) -> CliResult<()> {
    let schema = match kind {
        SchemaKind::Spec => parse_component_result(&get_spec_schema())?,
        SchemaKind::Answers => {
            let source = FormSource::load(spec.as_deref())?;
            parse_component_result(&get_answer_schema(&source.form_id, &source.config_json))?
        }
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os(OUTPUT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    Ok(candidate)
}

fn run_page(out: Option<PathBuf>, force: bool, year: Option<i32>) -> CliResult<()> {
    let out_root = resolve_output_root(out)?;
    let target = out_root.join(PAGE_FILE_NAME);
    if target.exists() && !force {
        return Err(format!(
            "{} already exists; rerun with --force to overwrite",
            target.display()
        )
        .into());
    }

    let form = FormState::new(consultation());
    let html = render_page(
        landing_page(),
        &PageContext {
            header: HeaderState::default(),
            form: &form,
            modal_open: false,
            year: year.unwrap_or_else(|| chrono::Utc::now().year()),
        },
    )?;

    fs::create_dir_all(&out_root)?;
    fs::write(&target, html)?;
    info!(path = %target.display(), "landing page written");
    println!("Wrote {}", target.display());
    Ok(())
}

fn run_wizard(spec: Option<PathBuf>, verbose: bool) -> CliResult<()> {
    let source = FormSource::load(spec.as_deref())?;
    let ui = parse_component_result(&render_json_ui(&source.form_id, &source.config_json, "{}"))?;
    let payload =
        WizardPayload::from_json(&ui).map_err(|err| format!("wizard UI error: {}", err))?;
    let presenter = WizardPresenter::new(Verbosity::from_verbose(verbose));
    let overview = parse_component_text(&render_text(&source.form_id, &source.config_json, "{}"))?;
    presenter.show_header(&payload, &overview);

    let mut answers = Map::new();
    let total = payload.questions.len();
    for (position, question) in payload.questions.iter().enumerate() {
        presenter.show_question(position + 1, total, question);
        if let Some(value) = prompt_question(question, &presenter)? {
            answers.insert(question.id.clone(), value);
        }
    }

    let response = parse_component_result(&submit_all(
        &source.form_id,
        &source.config_json,
        &Value::Object(answers).to_string(),
    ))?;
    presenter.show_outcome(&response);
    Ok(())
}

fn prompt_question(
    question: &WizardQuestion,
    presenter: &WizardPresenter,
) -> CliResult<Option<Value>> {
    match question.kind {
        QuestionKind::Select | QuestionKind::Radio => loop {
            let raw = read_input()?;
            match parse_choice(&question.choices, &raw) {
                Ok(choice) => return Ok(choice.map(Value::String)),
                Err(err) => presenter.show_parse_error(&err),
            }
        },
        QuestionKind::Checkbox => loop {
            let raw = read_input()?;
            match parse_choices(&question.choices, &raw) {
                Ok(picked) => {
                    return Ok(Some(Value::Array(
                        picked.into_iter().map(Value::String).collect(),
                    )));
                }
                Err(err) => presenter.show_parse_error(&err),
            }
        },
        QuestionKind::Textarea => Ok(Some(Value::String(read_input()?))),
        QuestionKind::Group => {
            let mut values = Map::new();
            for field in &question.fields {
                presenter.show_field(field);
                let value = loop {
                    let raw = read_input()?;
                    match check_field_input(&raw, field.required) {
                        Ok(value) => break value,
                        Err(err) => presenter.show_parse_error(&err),
                    }
                };
                values.insert(field.id.clone(), Value::String(value));
            }
            Ok(Some(Value::Object(values)))
        }
    }
}

fn check_field_input(raw: &str, required: bool) -> Result<String, AnswerParseError> {
    if required && raw.is_empty() {
        Err(AnswerParseError::new(
            "This field is required.",
            Some("any non-empty text".to_string()),
        ))
    } else {
        Ok(raw.to_string())
    }
}

fn read_input() -> CliResult<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err("input closed before the questionnaire was finished".into());
    }
    let trimmed = input.trim_end_matches(['\r', '\n']);
    if trimmed.trim().eq_ignore_ascii_case("exit") {
        return Err("wizard aborted by user".into());
    }
    Ok(trimmed.to_string())
}

fn parse_component_result(response: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(response)?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        Err(error.into())
    } else {
        Ok(value)
    }
}

/// Text responses carry no envelope; failures still arrive as `{"error": ...}`.
fn parse_component_text(response: &str) -> CliResult<String> {
    if let Ok(value) = serde_json::from_str::<Value>(response)
        && let Some(error) = value.get("error").and_then(Value::as_str)
    {
        return Err(error.into());
    }
    Ok(response.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    fn choices(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_choice_accepts_number_or_text() {
        let options = choices(&["Weekly", "Monthly"]);
        assert_eq!(
            parse_choice(&options, "2").unwrap(),
            Some("Monthly".to_string())
        );
        assert_eq!(
            parse_choice(&options, "weekly").unwrap(),
            Some("Weekly".to_string())
        );
        assert_eq!(parse_choice(&options, "  ").unwrap(), None);
        assert!(parse_choice(&options, "3").is_err());
        assert!(parse_choice(&options, "Daily").is_err());
    }

    #[test]
    fn parse_choices_collects_distinct_picks() {
        let options = choices(&["Floor care", "Window cleaning", "Organization"]);
        assert_eq!(
            parse_choices(&options, "1, organization,1").unwrap(),
            choices(&["Floor care", "Organization"])
        );
        assert!(parse_choices(&options, "").unwrap().is_empty());
        assert!(parse_choices(&options, "1,9").is_err());
    }

    #[test]
    fn parse_choices_accepts_option_text_with_commas() {
        let options = choices(&["Floor care", "Dusting, vacuuming and mopping"]);
        assert_eq!(
            parse_choices(&options, " dusting, vacuuming and mopping ").unwrap(),
            choices(&["Dusting, vacuuming and mopping"])
        );
        assert_eq!(
            parse_choices(&options, "2,1").unwrap(),
            choices(&["Dusting, vacuuming and mopping", "Floor care"])
        );
    }

    #[test]
    fn required_fields_reject_empty_input() {
        assert!(check_field_input("", true).is_err());
        assert_eq!(check_field_input("", false).unwrap(), "");
        assert_eq!(check_field_input(" ", true).unwrap(), " ");
    }

    #[test]
    fn component_errors_surface() {
        assert!(parse_component_result(r#"{"error":"boom"}"#).is_err());
        assert!(parse_component_text(r#"{"error":"boom"}"#).is_err());
        assert_eq!(
            parse_component_text("Form: x").unwrap(),
            "Form: x".to_string()
        );
    }

    #[test]
    fn render_command_prints_text() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("dragonfly-consult")?
            .arg("render")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let text = String::from_utf8(output)?;
        assert!(text.contains("1. How often would you like your home cleaned? [frequency]"));
        assert!(text.contains("[Submit Consultation Request]"));
        Ok(())
    }

    #[test]
    fn validate_command_fails_on_missing_contact() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let answers_path = workspace.path().join("answers.json");
        fs::write(
            &answers_path,
            json!({ "contact": { "email": "ada@example.com", "phone": "555-0100" } }).to_string(),
        )?;

        let output = Command::cargo_bin("dragonfly-consult")?
            .arg("validate")
            .arg("--answers")
            .arg(&answers_path)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        let text = String::from_utf8(output)?;
        assert!(text.contains("Validation result: invalid"));
        assert!(text.contains("Missing required answers: contact.name"));
        Ok(())
    }

    #[test]
    fn schema_command_prints_answer_schema() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("dragonfly-consult")?
            .arg("schema")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let schema: Value = serde_json::from_slice(&output)?;
        assert_eq!(schema["required"], json!(["contact"]));
        Ok(())
    }

    #[test]
    fn page_command_writes_index() -> Result<(), Box<dyn std::error::Error>> {
        let out = TempDir::new()?;
        Command::cargo_bin("dragonfly-consult")?
            .arg("page")
            .arg("--out")
            .arg(out.path())
            .arg("--year")
            .arg("2026")
            .assert()
            .success();

        let html = fs::read_to_string(out.path().join("index.html"))?;
        assert!(html.contains("&copy; 2026 The Dragonfly Effect"));
        assert!(html.contains(r#"class="consult-overlay" hidden"#));
        assert!(html.contains("<script>"));

        Command::cargo_bin("dragonfly-consult")?
            .arg("page")
            .arg("--out")
            .arg(out.path())
            .assert()
            .failure();
        Ok(())
    }

    #[test]
    fn wizard_completes_without_saving() -> Result<(), Box<dyn std::error::Error>> {
        let workdir = TempDir::new()?;
        let answers = [
            "1",
            "",
            "1,4",
            "Dog hair on the stairs",
            "yes",
            "Ada",
            "ada@example.com",
            "555-0100",
        ];
        let stdin = format!("{}\n", answers.join("\n"));

        let output = Command::cargo_bin("dragonfly-consult")?
            .current_dir(workdir.path())
            .arg("wizard")
            .write_stdin(stdin)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let text = String::from_utf8(output)?;
        assert!(text.contains("Consultation Questionnaire"));
        assert!(text.contains("6/6 Your Contact Information"));
        assert!(text.contains("Submission accepted; nothing was sent or saved."));
        assert_eq!(fs::read_dir(workdir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn wizard_aborts_on_exit() -> Result<(), Box<dyn std::error::Error>> {
        Command::cargo_bin("dragonfly-consult")?
            .arg("wizard")
            .write_stdin("exit\n")
            .assert()
            .failure();
        Ok(())
    }
}
