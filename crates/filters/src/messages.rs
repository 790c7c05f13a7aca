/// Looks up a user-visible message by key, substituting `{name}`
/// placeholders with `params`.
pub trait Messages: Send + Sync {
    fn t(&self, key: &str, params: &[(&str, String)]) -> String;
}

/// Built-in English catalog. Unknown keys render as the key itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

const CATALOG: &[(&str, &str)] = &[
    ("ledger_actions.filter.asset", "filter by asset"),
    ("ledger_actions.filter.action_type", "filter by ledger action type"),
    ("ledger_actions.filter.start_date", "filter by start date"),
    ("ledger_actions.filter.end_date", "filter by end date"),
    ("ledger_actions.filter.location", "filter by location"),
    ("ledger_actions.filter.date_hint", "format {format}"),
    (
        "table_filter.saved_filters.saving.limited",
        "You can only save up to {limit} filters per table",
    ),
];

impl Messages for EnglishMessages {
    fn t(&self, key: &str, params: &[(&str, String)]) -> String {
        let template = CATALOG
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(*v))
            .unwrap_or(key);
        interpolate(template, params)
    }
}

fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_params() {
        let msg = EnglishMessages.t(
            "table_filter.saved_filters.saving.limited",
            &[("limit", "10".to_string())],
        );
        assert_eq!(msg, "You can only save up to 10 filters per table");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(EnglishMessages.t("nope.missing", &[]), "nope.missing");
    }
}
