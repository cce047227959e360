//! Restaurant data model.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::phone_regex;
use super::validation::{FieldViolations, TextRule};

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static POST_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z- ']+$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn post_code_regex() -> &'static Regex {
    POST_CODE_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9]{6}$")
            .unwrap_or_else(|error| panic!("post code regex failed to compile: {error}"))
    })
}

const NAME_RULE: TextRule = TextRule {
    field: "name",
    min: 1,
    max: 50,
    pattern: name_regex,
    pattern_message: "Please use a name without numbers or specials",
};

/// Restaurant listing. Equality and hashing are keyed by `phone_number`,
/// the domain-unique field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Restaurant {
    /// Generated identifier; absent until the record is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[schema(example = "Lumley Castle")]
    pub name: String,
    #[schema(example = "NE13AF")]
    pub post_code: String,
    #[schema(example = "01912345678")]
    pub phone_number: String,
}

impl Restaurant {
    /// Build an unpersisted restaurant from its fields.
    pub fn new(
        name: impl Into<String>,
        post_code: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            post_code: post_code.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Attach a persisted identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check every field constraint, collecting the complete reasons map.
    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut violations = FieldViolations::new();
        NAME_RULE.check(&self.name, &mut violations);
        if !post_code_regex().is_match(&self.post_code) {
            violations.push("postCode", "The post code must be six letters or digits");
        }
        if !phone_regex().is_match(&self.phone_number) {
            violations.push(
                "phoneNumber",
                "The phone number must start with 0 and contain eleven digits",
            );
        }
        violations.into_result()
    }
}

impl PartialEq for Restaurant {
    fn eq(&self, other: &Self) -> bool {
        self.phone_number == other.phone_number
    }
}

impl Eq for Restaurant {}

impl Hash for Restaurant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phone_number.hash(state);
    }
}
