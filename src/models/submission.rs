use lambda_runtime::tracing;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Checkout form as posted by the front end.
///
/// Keys follow the form field names (`nome`, `cpf`, `valor`, ...) and the english
/// names are accepted as aliases. Fields are read one by one so a single odd
/// value never discards the rest of the form.
#[derive(Debug, Default, Clone)]
pub struct Submission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    /// number or numeric string
    pub amount: Option<Value>,
    pub plan_label: Option<String>,
}

/// Submission that passed validation, every required field is present
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub amount: Decimal,
    pub plan_label: Option<String>,
}

const NAME_KEYS: &[&str] = &["nome", "name"];
const EMAIL_KEYS: &[&str] = &["email"];
const TAX_ID_KEYS: &[&str] = &["cpf", "taxId", "cpfCnpj"];
const PHONE_KEYS: &[&str] = &["telefone", "phone"];
const AMOUNT_KEYS: &[&str] = &["valor", "amount"];
const PLAN_LABEL_KEYS: &[&str] = &["plano", "planLabel"];

impl Submission {
    /// Parses the request body. Anything but a json object is read as an empty
    /// submission, which then fails validation.
    pub fn from_body(body: Option<&str>) -> Self {
        let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(form)) => Self::from_form(&form),
            Ok(other) => {
                tracing::debug!("request body is not a json object, using an empty submission: {other}");
                Self::default()
            }
            Err(e) => {
                tracing::debug!("request body is not valid json, using an empty submission: {e}");
                Self::default()
            }
        }
    }

    fn from_form(form: &Map<String, Value>) -> Self {
        Self {
            name: text_field(form, NAME_KEYS),
            email: text_field(form, EMAIL_KEYS),
            tax_id: text_field(form, TAX_ID_KEYS),
            phone: text_field(form, PHONE_KEYS),
            amount: field(form, AMOUNT_KEYS).cloned(),
            plan_label: text_field(form, PLAN_LABEL_KEYS),
        }
    }

    pub fn validate(self) -> Option<ValidSubmission> {
        let name = non_blank(self.name)?;
        let email = non_blank(self.email)?;
        let amount = self.amount.as_ref().and_then(parse_amount)?;

        Some(ValidSubmission {
            name,
            email,
            tax_id: self.tax_id.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            amount,
            plan_label: non_blank(self.plan_label),
        })
    }
}

/// First non-null value among `keys`
fn field<'a>(form: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| form.get(*key))
        .find(|value| !value.is_null())
}

/// Strings as they are, numbers in their json form (`11999990000`)
fn text_field(form: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match field(form, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Coerces the amount to a positive decimal
fn parse_amount(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(n) => {
            let n = n.to_string();
            Decimal::from_str(&n)
                .or_else(|_| Decimal::from_scientific(&n))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }?;

    (amount > Decimal::ZERO).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn submission(value: serde_json::Value) -> Submission {
        Submission::from_body(Some(&value.to_string()))
    }

    #[test]
    fn test_form_field_names() {
        let valid = submission(json!({
            "nome": "Ana",
            "email": "ana@x.com",
            "cpf": "12345678909",
            "telefone": "11999990000",
            "valor": 29.9,
            "plano": "Mensal"
        }))
        .validate()
        .unwrap();

        assert_eq!(
            valid,
            ValidSubmission {
                name: "Ana".into(),
                email: "ana@x.com".into(),
                tax_id: "12345678909".into(),
                phone: "11999990000".into(),
                amount: dec!(29.9),
                plan_label: Some("Mensal".into()),
            }
        );
    }

    #[test]
    fn test_english_aliases() {
        let valid = submission(json!({
            "name": "Ana",
            "email": "ana@x.com",
            "taxId": "12345678909",
            "phone": "11999990000",
            "amount": "49.90",
            "planLabel": "Anual"
        }))
        .validate()
        .unwrap();

        assert_eq!(valid.name, "Ana");
        assert_eq!(valid.tax_id, "12345678909");
        assert_eq!(valid.amount, dec!(49.90));
        assert_eq!(valid.plan_label.as_deref(), Some("Anual"));
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let valid = submission(json!({"nome": "Ana", "email": "ana@x.com", "valor": 10}))
            .validate()
            .unwrap();

        assert_eq!(valid.tax_id, "");
        assert_eq!(valid.phone, "");
        assert_eq!(valid.plan_label, None);
    }

    #[test]
    fn test_missing_required_fields() {
        let cases = [
            json!({"email": "ana@x.com", "valor": 10}),
            json!({"nome": "Ana", "valor": 10}),
            json!({"nome": "Ana", "email": "ana@x.com"}),
            json!({"nome": "", "email": "ana@x.com", "valor": 10}),
            json!({"nome": "Ana", "email": "   ", "valor": 10}),
            json!({"nome": "Ana", "email": "ana@x.com", "valor": null}),
        ];

        for case in cases {
            assert!(submission(case.clone()).validate().is_none(), "{case}");
        }
    }

    #[test]
    fn test_invalid_amounts() {
        for valor in [json!(0), json!("0"), json!(-5), json!(""), json!("abc"), json!(true)] {
            let case = json!({"nome": "Ana", "email": "ana@x.com", "valor": valor});
            assert!(submission(case.clone()).validate().is_none(), "{case}");
        }
    }

    #[test]
    fn test_numeric_text_fields_are_kept() {
        let valid = submission(json!({
            "nome": "Ana",
            "email": "ana@x.com",
            "taxId": 12345678909u64,
            "telefone": 11999990000u64,
            "valor": 10,
            "plano": 2
        }))
        .validate()
        .unwrap();

        assert_eq!(valid.tax_id, "12345678909");
        assert_eq!(valid.phone, "11999990000");
        assert_eq!(valid.plan_label.as_deref(), Some("2"));
    }

    #[test]
    fn test_form_name_and_alias_together() {
        let valid = Submission::from_body(Some(
            r#"{"nome":"Ana","name":"Bia","email":"ana@x.com","valor":10,"amount":99}"#,
        ))
        .validate()
        .unwrap();

        assert_eq!(valid.name, "Ana");
        assert_eq!(valid.amount, dec!(10));
    }

    #[test]
    fn test_null_form_name_falls_back_to_alias() {
        let valid = submission(json!({"nome": null, "name": "Bia", "email": "ana@x.com", "valor": 10}))
            .validate()
            .unwrap();

        assert_eq!(valid.name, "Bia");
    }

    #[test]
    fn test_odd_optional_field_keeps_the_rest() {
        let valid = submission(json!({
            "nome": "Ana",
            "email": "ana@x.com",
            "cpf": {"digits": "123"},
            "telefone": ["11", "99999"],
            "valor": 10,
            "plano": true
        }))
        .validate()
        .unwrap();

        assert_eq!(valid.name, "Ana");
        assert_eq!(valid.tax_id, "");
        assert_eq!(valid.phone, "");
        assert_eq!(valid.plan_label, None);
    }

    #[test]
    fn test_malformed_body_is_empty_submission() {
        let bodies = [
            None,
            Some(""),
            Some("  "),
            Some("{not json"),
            Some("[1,2]"),
            Some(r#"["Ana","ana@x.com",null,null,10]"#),
            Some("\"Ana\""),
        ];
        for body in bodies {
            let parsed = Submission::from_body(body);
            assert!(parsed.name.is_none() && parsed.amount.is_none());
            assert!(parsed.validate().is_none());
        }
    }
}
