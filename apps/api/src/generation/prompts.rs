// Prompt templates for email copy generation.
// Interpolation is plain string replacement; submitted fields go in as-is.

use std::collections::BTreeMap;

use crate::enrichment::RecipientProfile;

/// Template for the direct variant, where the form supplies the recipient
/// name and blurb. Replace `{name}`, `{customer_name}`, `{blurb}`,
/// `{customer_blurb}` before sending.
pub const DIRECT_PROMPT_TEMPLATE: &str =
    "Write an email from {name} to {customer_name} to pitch a product to a startup.

Product details: {blurb}

Customer details: {customer_blurb}";

/// Template for the email-enrichment variant. The customer paragraph comes
/// from the lookup profile instead of the form.
pub const ENRICHED_PROMPT_TEMPLATE: &str =
    "Write an email from {name} from {company} to {recipient_name} to pitch a product to a startup.

Product details: {blurb}

Customer details: {recipient_context}";

fn field<'a>(values: &'a BTreeMap<String, String>, name: &str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or_default()
}

/// Prompt for the direct variant: recipient name and blurb come straight
/// from the submitted fields. Missing fields interpolate as empty strings.
pub fn compose_direct_prompt(values: &BTreeMap<String, String>) -> String {
    DIRECT_PROMPT_TEMPLATE
        .replace("{name}", field(values, "name"))
        .replace("{customer_name}", field(values, "customerName"))
        .replace("{blurb}", field(values, "blurb"))
        .replace("{customer_blurb}", field(values, "customerBlurb"))
}

/// Prompt for the email-enrichment variant. The recipient paragraph is built
/// from the lookup profile, whose fallbacks are already applied.
pub fn compose_enriched_prompt(
    values: &BTreeMap<String, String>,
    profile: &RecipientProfile,
) -> String {
    let mut context = match &profile.company_name {
        Some(company) => format!(
            "{} works as {} at {}.",
            profile.full_name, profile.title, company
        ),
        None => format!("{} works as {}.", profile.full_name, profile.title),
    };
    if !profile.company_description.is_empty() {
        context.push(' ');
        context.push_str(&profile.company_description);
    }

    ENRICHED_PROMPT_TEMPLATE
        .replace("{name}", field(values, "name"))
        .replace("{company}", field(values, "company"))
        .replace("{recipient_name}", &profile.full_name)
        .replace("{blurb}", field(values, "blurb"))
        .replace("{recipient_context}", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn profile(
        full_name: &str,
        title: &str,
        company_name: Option<&str>,
        description: &str,
    ) -> RecipientProfile {
        RecipientProfile {
            full_name: full_name.to_string(),
            title: title.to_string(),
            company_name: company_name.map(str::to_string),
            company_description: description.to_string(),
        }
    }

    #[test]
    fn test_direct_prompt_interpolates_all_fields() {
        let vals = values(&[
            ("name", "A"),
            ("company", "B"),
            ("blurb", "C"),
            ("customerName", "D"),
            ("customerBlurb", "E"),
        ]);
        let prompt = compose_direct_prompt(&vals);
        assert_eq!(
            prompt,
            "Write an email from A to D to pitch a product to a startup.\n\n\
             Product details: C\n\n\
             Customer details: E"
        );
    }

    #[test]
    fn test_direct_prompt_missing_fields_become_empty() {
        let prompt = compose_direct_prompt(&values(&[("name", "A")]));
        assert!(prompt.starts_with("Write an email from A to  to pitch"));
        assert!(prompt.ends_with("Customer details: "));
    }

    #[test]
    fn test_enriched_prompt_uses_profile_fields() {
        let vals = values(&[("name", "A"), ("company", "B"), ("blurb", "C")]);
        let profile = profile("Drew Huston", "CEO", Some("Dropbox"), "Smart workspace.");
        let prompt = compose_enriched_prompt(&vals, &profile);
        assert!(prompt.starts_with("Write an email from A from B to Drew Huston to pitch"));
        assert!(prompt.contains("Product details: C"));
        assert!(prompt.contains("Drew Huston works as CEO at Dropbox. Smart workspace."));
    }

    #[test]
    fn test_enriched_prompt_falls_back_to_email_as_name() {
        let vals = values(&[("name", "A"), ("company", "B"), ("blurb", "C")]);
        let profile = profile("someone@example.com", "employee", None, "");
        let prompt = compose_enriched_prompt(&vals, &profile);
        assert!(prompt.contains("to someone@example.com to pitch"));
        assert!(prompt.contains("someone@example.com works as employee."));
    }

    #[test]
    fn test_enriched_context_omits_empty_description() {
        let vals = values(&[("name", "A"), ("company", "B"), ("blurb", "C")]);
        let profile = profile("D", "engineer", Some("E"), "");
        let prompt = compose_enriched_prompt(&vals, &profile);
        assert!(prompt.ends_with("Customer details: D works as engineer at E."));
    }
}
