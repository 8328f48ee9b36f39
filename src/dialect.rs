//! The per-language keyword table, embedded at compile time so the binary
//! works from any working directory.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;

const DIALECT_TABLE_JSON: &str = include_str!("../resources/gherkin-languages.json");

pub const DEFAULT_LANGUAGE: &str = "en";

lazy_static! {
    pub static ref DIALECTS: DialectProvider =
        DialectProvider::embedded().expect("embedded dialect table is well-formed");
}

/// One language entry as it appears in the table. Step keywords keep their
/// trailing separator (`"Given "`, `"* "`); title keywords do not.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawDialect {
    and: Vec<String>,
    background: Vec<String>,
    but: Vec<String>,
    examples: Vec<String>,
    feature: Vec<String>,
    given: Vec<String>,
    name: String,
    native: String,
    scenario: Vec<String>,
    scenario_outline: Vec<String>,
    then: Vec<String>,
    when: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    language: String,
    name: String,
    native: String,
    feature_keywords: Vec<String>,
    background_keywords: Vec<String>,
    scenario_keywords: Vec<String>,
    scenario_outline_keywords: Vec<String>,
    examples_keywords: Vec<String>,
    step_keywords: Vec<String>,
}

impl Dialect {
    fn new(language: String, raw: RawDialect) -> Dialect {
        let mut step_keywords = raw.given.clone();
        step_keywords.extend(raw.when);
        step_keywords.extend(raw.then);
        step_keywords.extend(raw.and);
        step_keywords.extend(raw.but);
        Dialect {
            language,
            name: raw.name,
            native: raw.native,
            feature_keywords: raw.feature,
            background_keywords: raw.background,
            scenario_keywords: raw.scenario,
            scenario_outline_keywords: raw.scenario_outline,
            examples_keywords: raw.examples,
            step_keywords,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn native(&self) -> &str {
        &self.native
    }

    pub fn feature_keywords(&self) -> &[String] {
        &self.feature_keywords
    }

    pub fn background_keywords(&self) -> &[String] {
        &self.background_keywords
    }

    pub fn scenario_keywords(&self) -> &[String] {
        &self.scenario_keywords
    }

    pub fn scenario_outline_keywords(&self) -> &[String] {
        &self.scenario_outline_keywords
    }

    pub fn examples_keywords(&self) -> &[String] {
        &self.examples_keywords
    }

    /// All step keywords: given + when + then + and + but, duplicates kept.
    pub fn step_keywords(&self) -> &[String] {
        &self.step_keywords
    }
}

#[derive(Debug)]
pub struct DialectProvider {
    dialects: HashMap<String, Dialect>,
}

impl DialectProvider {
    pub fn embedded() -> Result<DialectProvider, serde_json::Error> {
        let raw: HashMap<String, RawDialect> = serde_json::from_str(DIALECT_TABLE_JSON)?;
        let dialects = raw
            .into_iter()
            .map(|(language, raw)| (language.clone(), Dialect::new(language, raw)))
            .collect();
        Ok(DialectProvider { dialects })
    }

    pub fn get(&self, language: &str) -> Option<&Dialect> {
        self.dialects.get(language)
    }

    pub fn get_default(&self) -> &Dialect {
        self.dialects
            .get(DEFAULT_LANGUAGE)
            .expect("dialect table contains the default language")
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}
