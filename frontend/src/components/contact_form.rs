use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use gloo_net::http::Request;
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::config;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
}

impl FieldKind {
    fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::TextArea => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: AttrValue,
    pub label: AttrValue,
    pub kind: FieldKind,
    pub required: bool,
}

pub type FieldValues = HashMap<String, String>;

/// Names of fields that fail client-side checks. Required fields must be
/// non-blank; the first email field must look like an address.
pub fn invalid_fields(fields: &[FieldSpec], values: &FieldValues) -> BTreeSet<String> {
    fn value_of<'a>(values: &'a FieldValues, name: &str) -> &'a str {
        values.get(name).map(String::as_str).unwrap_or_default()
    }

    let mut invalid: BTreeSet<String> = fields
        .iter()
        .filter(|field| field.required && value_of(values, &field.name).trim().is_empty())
        .map(|field| field.name.to_string())
        .collect();

    if let Some(email) = fields.iter().find(|field| field.kind == FieldKind::Email) {
        if is_valid_email(value_of(values, &email.name)) {
            invalid.remove(&*email.name);
        } else {
            invalid.insert(email.name.to_string());
        }
    }

    invalid
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{} field(s) failed validation", .0.len())]
    Validation(BTreeSet<String>),
    #[error("form endpoint is not configured")]
    Configuration,
    #[error("form endpoint answered with status {status}")]
    Rejected { status: u16 },
    #[error("network error: {0}")]
    Transport(String),
}

/// The one request a valid submission turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub accept: &'static str,
}

/// Runs every pre-network check. `Ok` means exactly one POST goes out.
pub fn plan_submission(
    fields: &[FieldSpec],
    values: &FieldValues,
    endpoint: &str,
) -> Result<SubmitRequest, SubmitError> {
    let invalid = invalid_fields(fields, values);
    if !invalid.is_empty() {
        return Err(SubmitError::Validation(invalid));
    }
    if config::is_placeholder_endpoint(endpoint) {
        return Err(SubmitError::Configuration);
    }
    Ok(SubmitRequest {
        method: "POST",
        endpoint: endpoint.to_string(),
        accept: "application/json",
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(SubmitError),
}

impl FormStatus {
    pub fn message(&self) -> &'static str {
        match self {
            FormStatus::Idle => "",
            FormStatus::Sending => "Enviando solicitud...",
            FormStatus::Sent => "Listo! Te contactaremos muy pronto.",
            FormStatus::Failed(SubmitError::Validation(_)) => {
                "Revisa los campos marcados e intenta de nuevo."
            }
            FormStatus::Failed(SubmitError::Configuration) => {
                "Configura el endpoint del formulario para enviar la solicitud."
            }
            FormStatus::Failed(SubmitError::Rejected { .. }) => {
                "No pudimos enviar la solicitud. Intenta nuevamente."
            }
            FormStatus::Failed(SubmitError::Transport(_)) => {
                "Hubo un error al enviar. Intenta nuevamente."
            }
        }
    }

    pub fn class(&self) -> Option<&'static str> {
        match self {
            FormStatus::Idle | FormStatus::Sending => None,
            FormStatus::Sent => Some("is-success"),
            FormStatus::Failed(_) => Some("is-error"),
        }
    }
}

/// Numbers submissions so only the newest one may write the status line.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    latest: u64,
}

impl SubmissionTracker {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[derive(Deserialize)]
struct FormErrorBody {
    #[serde(default)]
    errors: Vec<FormErrorDetail>,
}

#[derive(Deserialize)]
struct FormErrorDetail {
    message: String,
}

async fn send(request: SubmitRequest, body: FormData) -> Result<(), SubmitError> {
    debug!("{} {}", request.method, request.endpoint);
    let response = Request::post(&request.endpoint)
        .header("Accept", request.accept)
        .body(body)
        .send()
        .await
        .map_err(|e| SubmitError::Transport(e.to_string()))?;

    if response.ok() {
        return Ok(());
    }

    let status = response.status();
    if let Ok(body) = response.json::<FormErrorBody>().await {
        for detail in body.errors {
            warn!("form endpoint error: {}", detail.message);
        }
    }
    Err(SubmitError::Rejected { status })
}

fn default_endpoint() -> AttrValue {
    AttrValue::from(config::contact_endpoint())
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub fields: Vec<FieldSpec>,
    #[prop_or_else(default_endpoint)]
    pub endpoint: AttrValue,
    #[prop_or(AttrValue::from("Enviar solicitud"))]
    pub submit_label: AttrValue,
}

#[function_component(ContactForm)]
pub fn contact_form(props: &ContactFormProps) -> Html {
    let form_ref = use_node_ref();
    let values = use_state(FieldValues::new);
    let invalid = use_state(BTreeSet::<String>::new);
    let status = use_state(FormStatus::default);
    let tracker = use_mut_ref(SubmissionTracker::default);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let values = values.clone();
        let invalid = invalid.clone();
        let status = status.clone();
        let fields = props.fields.clone();
        let endpoint = props.endpoint.to_string();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let ticket = tracker.borrow_mut().issue();

            invalid.set(invalid_fields(&fields, &values));
            let request = match plan_submission(&fields, &values, &endpoint) {
                Ok(request) => request,
                Err(err) => {
                    warn!("contact form not sent: {}", err);
                    status.set(FormStatus::Failed(err));
                    return;
                }
            };

            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                warn!("contact form element missing");
                return;
            };
            let body = match FormData::new_with_form(&form) {
                Ok(body) => body,
                Err(_) => {
                    status.set(FormStatus::Failed(SubmitError::Transport(
                        "could not read form fields".to_string(),
                    )));
                    return;
                }
            };

            status.set(FormStatus::Sending);

            let tracker = Rc::clone(&tracker);
            let values = values.clone();
            let status = status.clone();
            spawn_local(async move {
                let outcome = send(request, body).await;
                if !tracker.borrow().is_current(ticket) {
                    debug!("dropping outcome of superseded submission {}", ticket);
                    return;
                }
                match outcome {
                    Ok(()) => {
                        info!("contact form submitted");
                        form.reset();
                        values.set(FieldValues::new());
                        status.set(FormStatus::Sent);
                    }
                    Err(err) => {
                        error!("contact form submission failed: {}", err);
                        status.set(FormStatus::Failed(err));
                    }
                }
            });
        })
    };

    html! {
        <form
            ref={form_ref}
            id="contact-form"
            class="contact-form"
            data-endpoint={props.endpoint.clone()}
            novalidate={true}
            onsubmit={onsubmit}
        >
            { for props.fields.iter().map(|field| {
                let name = field.name.to_string();
                let value = values.get(&name).cloned().unwrap_or_default();
                let class = classes!("form-input", invalid.contains(&name).then_some("is-invalid"));
                let field_id = format!("contact-{}", name);

                let oninput = {
                    let values = values.clone();
                    let name = name.clone();
                    let kind = field.kind;
                    Callback::from(move |e: InputEvent| {
                        let value = if kind == FieldKind::TextArea {
                            e.target_unchecked_into::<HtmlTextAreaElement>().value()
                        } else {
                            e.target_unchecked_into::<HtmlInputElement>().value()
                        };
                        let mut next = (*values).clone();
                        next.insert(name.clone(), value);
                        values.set(next);
                    })
                };

                let control = if field.kind == FieldKind::TextArea {
                    html! {
                        <textarea
                            id={field_id.clone()}
                            name={field.name.clone()}
                            class={class}
                            required={field.required}
                            value={value}
                            oninput={oninput}
                        />
                    }
                } else {
                    html! {
                        <input
                            id={field_id.clone()}
                            name={field.name.clone()}
                            type={field.kind.input_type()}
                            class={class}
                            required={field.required}
                            value={value}
                            oninput={oninput}
                        />
                    }
                };

                html! {
                    <label class="form-field" for={field_id}>
                        <span class="form-label">{ field.label.clone() }</span>
                        { control }
                    </label>
                }
            }) }
            <button type="submit" class="form-submit">{ props.submit_label.clone() }</button>
            <p
                id="form-status"
                class={classes!("form-status", status.class())}
                role="status"
                aria-live="polite"
            >
                { status.message() }
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                name: "name".into(),
                label: "Nombre".into(),
                kind: FieldKind::Text,
                required: true,
            },
            FieldSpec {
                name: "email".into(),
                label: "Correo".into(),
                kind: FieldKind::Email,
                required: true,
            },
            FieldSpec {
                name: "company".into(),
                label: "Empresa".into(),
                kind: FieldKind::Text,
                required: false,
            },
        ]
    }

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const ENDPOINT: &str = "https://formspree.io/f/xyzabcd";

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("  ana@mail.example.co  "));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("ana example@x.y"));
        assert!(!is_valid_email("@x.y"));
        assert!(!is_valid_email("ana@x"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn blank_required_name_blocks_submission() {
        let input = values(&[("name", "   "), ("email", "ana@example.com")]);
        let result = plan_submission(&fields(), &input, ENDPOINT);
        let expected: BTreeSet<String> = ["name".to_string()].into_iter().collect();
        assert_eq!(result, Err(SubmitError::Validation(expected)));
    }

    #[test]
    fn malformed_email_is_marked() {
        let input = values(&[("name", "Ana"), ("email", "ana.example.com")]);
        let invalid = invalid_fields(&fields(), &input);
        assert_eq!(invalid.len(), 1);
        assert!(invalid.contains("email"));
    }

    #[test]
    fn placeholder_endpoint_blocks_submission() {
        let input = values(&[("name", "Ana"), ("email", "ana@example.com")]);
        let result = plan_submission(&fields(), &input, "https://formspree.io/f/YOUR_FORM_ID");
        assert_eq!(result, Err(SubmitError::Configuration));
    }

    #[test]
    fn validation_runs_before_endpoint_check() {
        let input = values(&[("email", "ana@example.com")]);
        let result = plan_submission(&fields(), &input, "YOUR_FORM_ID");
        assert!(matches!(result, Err(SubmitError::Validation(_))));
    }

    #[test]
    fn valid_form_plans_one_post() {
        let input = values(&[("name", "Ana"), ("email", "ana@example.com")]);
        let request = plan_submission(&fields(), &input, ENDPOINT).unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.endpoint, ENDPOINT);
        assert_eq!(request.accept, "application/json");
    }

    #[test]
    fn status_messages_and_classes() {
        assert_eq!(FormStatus::Sending.message(), "Enviando solicitud...");
        assert_eq!(FormStatus::Sending.class(), None);
        assert_eq!(FormStatus::Sent.class(), Some("is-success"));
        let rejected = FormStatus::Failed(SubmitError::Rejected { status: 422 });
        assert_eq!(rejected.message(), "No pudimos enviar la solicitud. Intenta nuevamente.");
        assert_eq!(rejected.class(), Some("is-error"));
        let transport = FormStatus::Failed(SubmitError::Transport("offline".into()));
        assert_eq!(transport.message(), "Hubo un error al enviar. Intenta nuevamente.");
    }

    #[test]
    fn only_latest_submission_is_current() {
        let mut tracker = SubmissionTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn validation_failure_supersedes_pending_submission() {
        let mut tracker = SubmissionTracker::default();
        let pending = tracker.issue();
        let filled = values(&[("name", "Ana"), ("email", "ana@example.com")]);
        assert!(plan_submission(&fields(), &filled, ENDPOINT).is_ok());

        // Second submit takes its ticket before validation rejects it.
        let rejected = tracker.issue();
        let blank = values(&[("name", ""), ("email", "ana@example.com")]);
        assert!(plan_submission(&fields(), &blank, ENDPOINT).is_err());

        assert!(!tracker.is_current(pending));
        assert!(tracker.is_current(rejected));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SubmitError::Rejected { status: 500 }.to_string(),
            "form endpoint answered with status 500"
        );
        let invalid: BTreeSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
        assert_eq!(
            SubmitError::Validation(invalid).to_string(),
            "2 field(s) failed validation"
        );
    }
}
