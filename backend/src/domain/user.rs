//! User data model.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldViolations, TextRule};

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z- ']+$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

pub(crate) fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new("^0[0-9]{10}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

const NAME_RULE: TextRule = TextRule {
    field: "name",
    min: 1,
    max: 50,
    pattern: name_regex,
    pattern_message: "Please use a name without numbers or specials",
};

/// Registered user.
///
/// ## Invariants
/// - `name` is 1–50 characters of letters, spaces, hyphens, or apostrophes.
/// - `email` is a well-formed address and globally unique among users.
/// - `phone_number` is a `0` followed by ten digits.
/// - `id` is generated by the store; client-supplied values are only
///   meaningful on update, where they must match the path id.
///
/// Equality and hashing are keyed by `email`, the domain-unique field, not
/// by the generated id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Generated identifier; absent until the record is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[schema(example = "Jack Doe")]
    pub name: String,
    #[schema(example = "jack@mailinator.com")]
    pub email: String,
    #[schema(example = "01234567891")]
    pub phone_number: String,
}

impl User {
    /// Build an unpersisted user from its fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
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
        if self.email.trim().is_empty() {
            violations.push("email", "The email address is required");
        } else if !email_regex().is_match(&self.email) {
            violations.push(
                "email",
                "The email address must be in the format of name@domain.com",
            );
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

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_user() -> User {
        User::new("Jack Doe", "jack@mailinator.com", "01234567891")
    }

    #[test]
    fn valid_user_passes() {
        assert!(valid_user().validate().is_ok());
    }

    #[test]
    fn empty_payload_reports_every_field() {
        let user = User::new("", "", "");
        let violations = user.validate().expect_err("empty user must fail");
        assert_eq!(violations.len(), 3);
        assert!(violations.reason("name").is_some());
        assert_eq!(violations.reason("email"), Some("The email address is required"));
        assert!(violations.reason("phoneNumber").is_some());
    }

    #[rstest]
    #[case("Jack Doe", true)]
    #[case("O'Brien-Smith", true)]
    #[case("Jack Doe 3rd", false)]
    #[case("Jack_Doe", false)]
    fn name_charset(#[case] name: &str, #[case] ok: bool) {
        let user = User {
            name: name.to_owned(),
            ..valid_user()
        };
        assert_eq!(user.validate().is_ok(), ok);
    }

    #[test]
    fn name_longer_than_fifty_chars_fails_on_size() {
        let user = User {
            name: "a".repeat(51),
            ..valid_user()
        };
        let violations = user.validate().expect_err("oversized name must fail");
        assert_eq!(
            violations.reason("name"),
            Some("The name must be between 1 and 50 characters")
        );
    }

    #[rstest]
    #[case("jack@mailinator.com", true)]
    #[case("jack.doe+tag@mail.example.org", true)]
    #[case("jack", false)]
    #[case("jack@", false)]
    #[case("jack@mailinator", false)]
    #[case("@mailinator.com", false)]
    fn email_format(#[case] email: &str, #[case] ok: bool) {
        let user = User {
            email: email.to_owned(),
            ..valid_user()
        };
        assert_eq!(user.validate().is_ok(), ok);
    }

    #[rstest]
    #[case("01234567891", true)]
    #[case("11234567891", false)]
    #[case("0123456789", false)]
    #[case("012345678912", false)]
    #[case("0123456789a", false)]
    fn phone_pattern(#[case] phone: &str, #[case] ok: bool) {
        let user = User {
            phone_number: phone.to_owned(),
            ..valid_user()
        };
        assert_eq!(user.validate().is_ok(), ok);
    }

    #[test]
    fn equality_is_keyed_by_email() {
        let a = valid_user().with_id(1);
        let b = User::new("John Doe", "jack@mailinator.com", "01334567894").with_id(2);
        assert_eq!(a, b);
    }

    #[test]
    fn json_shape_is_camel_case_and_id_is_optional() {
        let user: User = serde_json::from_str(
            r#"{"name":"Jack Doe","email":"jack@mailinator.com","phoneNumber":"01234567891"}"#,
        )
        .expect("deserialise user");
        assert!(user.id.is_none());
        let value = serde_json::to_value(&user).expect("serialise user");
        assert!(value.get("phoneNumber").is_some());
        assert!(value.get("id").is_none());
    }
}
