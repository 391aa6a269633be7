use serde_json::Value;

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: status line and the full questionnaire before prompting.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts for the questions the component describes.
pub struct WizardPresenter {
    verbosity: Verbosity,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn show_header(&self, payload: &WizardPayload, overview: &str) {
        println!("{}", payload.form_title);
        if self.verbosity.is_verbose() {
            println!("{}", overview);
        }
        println!("(type 'exit' to leave without submitting)");
    }

    pub fn show_question(&self, index: usize, total: usize, question: &WizardQuestion) {
        println!("{}/{} {}", index, total, question.label);
        match &question.kind {
            QuestionKind::Select | QuestionKind::Radio => {
                for (position, choice) in question.choices.iter().enumerate() {
                    println!("  {}) {}", position + 1, choice);
                }
                println!("  (number or text, blank to skip)");
            }
            QuestionKind::Checkbox => {
                for (position, choice) in question.choices.iter().enumerate() {
                    println!("  {}) {}", position + 1, choice);
                }
                println!("  (comma-separated numbers or text, blank for none)");
            }
            QuestionKind::Textarea => {
                if let Some(placeholder) = &question.placeholder {
                    println!("  {}", placeholder);
                }
            }
            QuestionKind::Group => {}
        }
    }

    pub fn show_field(&self, field: &WizardField) {
        let mut line = format!("  {}", field.label);
        if field.required {
            line.push_str(" *");
        }
        if field.input_type != "text" {
            line.push_str(&format!(" ({})", field.input_type));
        }
        println!("{}", line);
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_outcome(&self, response: &Value) {
        match response["status"].as_str() {
            Some("accepted") => {
                println!("Submission accepted; nothing was sent or saved.");
            }
            Some("blocked") => {
                let missing = response["missing_required"]
                    .as_array()
                    .map(|values| {
                        values
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                println!("Submission blocked; still required: {}", missing);
            }
            _ => println!("Unexpected submission response: {}", response),
        }
    }
}

/// Render payload extracted from the component output.
pub struct WizardPayload {
    pub form_title: String,
    pub questions: Vec<WizardQuestion>,
}

impl WizardPayload {
    pub fn from_json(json: &Value) -> Result<Self, String> {
        let form_title = json
            .get("form_title")
            .and_then(Value::as_str)
            .ok_or_else(|| "wizard payload missing form_title".to_string())?
            .to_string();
        let questions = json
            .get("groups")
            .and_then(Value::as_array)
            .ok_or_else(|| "wizard payload missing groups".to_string())?
            .iter()
            .map(WizardQuestion::from_json)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            form_title,
            questions,
        })
    }
}

/// Question kinds the wizard knows how to prompt for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Select,
    Checkbox,
    Textarea,
    Radio,
    Group,
}

impl QuestionKind {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "select" => Some(QuestionKind::Select),
            "checkbox" => Some(QuestionKind::Checkbox),
            "textarea" => Some(QuestionKind::Textarea),
            "radio" => Some(QuestionKind::Radio),
            "group" => Some(QuestionKind::Group),
            _ => None,
        }
    }
}

/// Sub-field of a group question.
pub struct WizardField {
    pub id: String,
    pub label: String,
    pub input_type: String,
    pub required: bool,
}

/// Minimal view of a question used for prompting.
pub struct WizardQuestion {
    pub id: String,
    pub label: String,
    pub kind: QuestionKind,
    pub choices: Vec<String>,
    pub placeholder: Option<String>,
    pub fields: Vec<WizardField>,
}

impl WizardQuestion {
    fn from_json(value: &Value) -> Result<Self, String> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| "question missing id".to_string())?
            .to_string();
        let label = value
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("question '{}' missing label", id))?
            .to_string();
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(QuestionKind::from_label)
            .ok_or_else(|| format!("question '{}' has an unknown type", id))?;
        let control = &value["control"];

        let choices = match kind {
            QuestionKind::Select => control["options"]
                .as_array()
                .map(|options| {
                    options
                        .iter()
                        .filter_map(|option| option["value"].as_str())
                        .filter(|value| !value.is_empty())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            QuestionKind::Checkbox | QuestionKind::Radio => control["toggles"]
                .as_array()
                .map(|toggles| {
                    toggles
                        .iter()
                        .filter_map(|toggle| toggle["value"].as_str())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            QuestionKind::Textarea | QuestionKind::Group => Vec::new(),
        };

        let prefix = format!("{}.", id);
        let fields = control["fields"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|field| {
                        let name = field["name"].as_str()?;
                        Some(WizardField {
                            id: name.strip_prefix(&prefix).unwrap_or(name).to_string(),
                            label: field["label"].as_str().unwrap_or(name).to_string(),
                            input_type: field["input_type"].as_str().unwrap_or("text").to_string(),
                            required: field["required"].as_bool().unwrap_or(false),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            label,
            kind,
            choices,
            placeholder: control["placeholder"].as_str().map(String::from),
            fields,
        })
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

/// Resolves one choice by 1-based number or case-insensitive text.
pub fn parse_choice(choices: &[String], raw: &str) -> Result<Option<String>, AnswerParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(number) = raw.parse::<usize>()
        && let Some(choice) = number.checked_sub(1).and_then(|index| choices.get(index))
    {
        return Ok(Some(choice.clone()));
    }
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(raw))
        .cloned()
        .map(Some)
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("Choose one of: {}.", choices.join(", ")),
                Some(format!("a number between 1 and {} or the option text", choices.len())),
            )
        })
}

/// Resolves a comma-separated list of choices; duplicates collapse.
///
/// A line naming a single option whose text contains a comma is taken whole.
pub fn parse_choices(choices: &[String], raw: &str) -> Result<Vec<String>, AnswerParseError> {
    let whole = raw.trim();
    if let Some(choice) = choices.iter().find(|choice| choice.eq_ignore_ascii_case(whole)) {
        return Ok(vec![choice.clone()]);
    }
    let mut picked = Vec::new();
    for part in raw.split(',') {
        if let Some(choice) = parse_choice(choices, part)?
            && !picked.contains(&choice)
        {
            picked.push(choice);
        }
    }
    Ok(picked)
}
