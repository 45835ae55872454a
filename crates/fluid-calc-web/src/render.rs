//! HTML pages for the calculator form and results.
//!
//! Pages are handlebars templates rendered from serde contexts; every
//! `{{value}}` goes through handlebars' HTML escaping.

use fluid_calc_core::validation::{FIELD_AGE, FIELD_DATE, FIELD_GENDER, FIELD_WEIGHT};
use fluid_calc_core::{FieldErrors, Gender, RawSubmission, RecordView};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Daily Fluid Volume Calculator</title>
</head>
<body>
<h1>Daily Fluid Volume Calculator</h1>
"#;

const FOOTER: &str = "</body>\n</html>\n";

const FORM: &str = r#"{{> header}}
<form method="post" action="/">
<fieldset>
<legend>Gender</legend>
{{#each genders}}
<label><input type="radio" name="{{name}}" value="{{value}}"{{#if checked}} checked{{/if}}> {{label}}</label>
{{/each}}
{{#if gender_errors}}<ul class="errors">{{#each gender_errors}}<li>{{this}}</li>{{/each}}</ul>{{/if}}
</fieldset>
{{#each fields}}
<p>
<label for="{{name}}">{{label}}</label>
<input type="{{kind}}"{{#if step}} step="{{step}}"{{/if}} id="{{name}}" name="{{name}}" value="{{value}}">
{{#if errors}}<ul class="errors">{{#each errors}}<li>{{this}}</li>{{/each}}</ul>{{/if}}
</p>
{{/each}}
<button type="submit">Calculate</button>
</form>
{{> footer}}"#;

const RESULT: &str = r#"{{> header}}
<h2>Result</h2>
<dl>
<dt>Gender</dt><dd>{{gender}}</dd>
<dt>Age</dt><dd>{{age}}</dd>
<dt>Weight</dt><dd>{{weight}} kg</dd>
<dt>Symptom onset date</dt><dd>{{date}}</dd>
<dt>Total daily volume</dt><dd>{{volume}}</dd>
<dt>Formula</dt><dd>{{formula}}</dd>
<dt>Proportion</dt><dd>{{guidance}}</dd>
</dl>
<p><a href="/">New calculation</a></p>
{{> footer}}"#;

const NOT_FOUND: &str = r#"{{> header}}
<h2>Record not found</h2>
<p><a href="/">New calculation</a></p>
{{> footer}}"#;

const FAILURE: &str = r#"{{> header}}
<h2>Something went wrong</h2>
<p>The request could not be completed. Please try again later.</p>
<p><a href="/">Back</a></p>
{{> footer}}"#;

/// A page the server can produce.
pub enum Page<'a> {
    /// Input form, optionally re-populated with a rejected submission
    Form {
        raw: &'a RawSubmission,
        errors: &'a FieldErrors,
    },
    /// Calculation result for a stored record
    Result(&'a RecordView),
    NotFound,
    /// Generic failure; carries no partial result
    Failure,
}

/// Registered page templates.
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_partial("header", HEADER)?;
        handlebars.register_partial("footer", FOOTER)?;
        handlebars.register_template_string("form", FORM)?;
        handlebars.register_template_string("result", RESULT)?;
        handlebars.register_template_string("not_found", NOT_FOUND)?;
        handlebars.register_template_string("failure", FAILURE)?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, page: &Page<'_>) -> Result<String, RenderError> {
        match page {
            Page::Form { raw, errors } => {
                self.handlebars.render("form", &FormContext::new(raw, errors))
            }
            Page::Result(view) => self.handlebars.render("result", &ResultContext::new(view)),
            Page::NotFound => self.handlebars.render("not_found", &()),
            Page::Failure => self.handlebars.render("failure", &()),
        }
    }
}

#[derive(Serialize)]
struct GenderOption {
    name: &'static str,
    value: &'static str,
    label: &'static str,
    checked: bool,
}

#[derive(Serialize)]
struct InputField<'a> {
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    step: Option<&'static str>,
    value: &'a str,
    errors: &'a [String],
}

#[derive(Serialize)]
struct FormContext<'a> {
    genders: Vec<GenderOption>,
    gender_errors: &'a [String],
    fields: Vec<InputField<'a>>,
}

impl<'a> FormContext<'a> {
    fn new(raw: &'a RawSubmission, errors: &'a FieldErrors) -> Self {
        let selected = raw
            .value(FIELD_GENDER)
            .and_then(|value| value.parse::<Gender>().ok());
        let genders = Gender::all()
            .into_iter()
            .map(|gender| GenderOption {
                name: FIELD_GENDER,
                value: gender.as_str(),
                label: gender.label(),
                checked: selected == Some(gender),
            })
            .collect();

        let field = |name: &'static str,
                     label: &'static str,
                     kind: &'static str,
                     step: Option<&'static str>| InputField {
            name,
            label,
            kind,
            step,
            value: raw.value(name).unwrap_or_default(),
            errors: errors.get(name),
        };

        Self {
            genders,
            gender_errors: errors.get(FIELD_GENDER),
            fields: vec![
                field(FIELD_AGE, "Age", "number", Some("1")),
                field(FIELD_WEIGHT, "Weight (kg)", "number", Some("any")),
                field(FIELD_DATE, "Symptom onset date", "date", None),
            ],
        }
    }
}

#[derive(Serialize)]
struct ResultContext<'a> {
    gender: &'static str,
    age: u32,
    weight: String,
    date: String,
    volume: String,
    formula: &'a str,
    guidance: &'a str,
}

impl<'a> ResultContext<'a> {
    fn new(view: &'a RecordView) -> Self {
        let record = &view.record;
        let calculation = &view.calculation;
        Self {
            gender: record.gender.label(),
            age: record.age,
            weight: record.weight_kg.to_string(),
            date: record.symptom_onset.format("%Y-%m-%d").to_string(),
            volume: calculation.display_volume(),
            formula: calculation.formula_label,
            guidance: calculation.electrolyte_guidance,
        }
    }
}
