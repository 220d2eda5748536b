use crate::customer::Channel;
use crate::shared::entity::{Entity, ID};
use crate::vehicle::ReminderType;
use std::collections::HashMap;

/// A garage's message template for one (reminder type, channel) pair. The
/// body (and subject, for email) may contain `{token}` placeholders from
/// the fixed reminder vocabulary.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub id: ID,
    pub garage_id: ID,
    pub reminder_type: ReminderType,
    pub channel: Channel,
    pub name: String,
    /// Email only; sms/whatsapp templates leave it empty
    pub subject: Option<String>,
    pub body: String,
}

impl MessageTemplate {
    pub fn new(
        garage_id: ID,
        reminder_type: ReminderType,
        channel: Channel,
        name: String,
        body: String,
    ) -> Self {
        Self {
            id: Default::default(),
            garage_id,
            reminder_type,
            channel,
            name,
            subject: None,
            body,
        }
    }
}

impl Entity for MessageTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The fixed token vocabulary for reminder messages. Every reminder render
/// carries exactly these tokens; values that don't apply are empty strings
/// so they never render as "null".
#[derive(Debug, Clone, Default)]
pub struct TemplateTokens {
    pub first_name: String,
    pub last_name: String,
    pub vehicle_reg: String,
    pub due_date: String,
    pub garage_name: String,
    pub garage_phone: String,
    pub unsubscribe_link: String,
}

impl TemplateTokens {
    pub fn into_map(self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("first_name".into(), self.first_name);
        map.insert("last_name".into(), self.last_name);
        map.insert("vehicle_reg".into(), self.vehicle_reg);
        map.insert("due_date".into(), self.due_date);
        map.insert("garage_name".into(), self.garage_name);
        map.insert("garage_phone".into(), self.garage_phone);
        map.insert("unsubscribe_link".into(), self.unsubscribe_link);
        map
    }
}

/// Replaces every `{token}` occurrence with its value from the map.
/// Placeholders with no matching key are left verbatim; a template without
/// placeholders comes back unchanged. Pure, no I/O.
pub fn render_template(template: &str, tokens: &HashMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in tokens {
        rendered = rendered.replace(&format!("{{{}}}", key), value);
    }
    rendered
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens() -> HashMap<String, String> {
        TemplateTokens {
            first_name: "Jane".into(),
            vehicle_reg: "AB12CDE".into(),
            due_date: "12 Jan 2026".into(),
            ..Default::default()
        }
        .into_map()
    }

    #[test]
    fn it_substitutes_known_tokens() {
        let rendered = render_template(
            "Hi {first_name}, your {vehicle_reg} MOT is due {due_date}",
            &tokens(),
        );
        assert_eq!(rendered, "Hi Jane, your AB12CDE MOT is due 12 Jan 2026");
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let rendered = render_template("Hi {first_name} {nickname}", &tokens());
        assert_eq!(rendered, "Hi Jane {nickname}");
    }

    #[test]
    fn missing_values_render_as_empty_string() {
        let rendered = render_template("Call us on {garage_phone}.", &tokens());
        assert_eq!(rendered, "Call us on .");
    }

    #[test]
    fn plain_text_is_unchanged() {
        let body = "No placeholders here";
        assert_eq!(render_template(body, &tokens()), body);
    }

    #[test]
    fn repeated_tokens_are_all_replaced() {
        let rendered = render_template("{first_name} {first_name}", &tokens());
        assert_eq!(rendered, "Jane Jane");
    }
}
