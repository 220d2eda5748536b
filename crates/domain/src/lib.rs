mod consent;
mod customer;
mod date;
mod garage;
mod message_log;
mod phone;
mod schedule;
mod scheduled_reminder;
mod shared;
mod template;
mod vehicle;

pub use consent::{sending_allowed, ConsentMethod, ConsentRecord, ConsentStatus};
pub use customer::{Channel, Customer};
pub use date::format_date_uk;
pub use garage::{Garage, SubscriptionStatus};
pub use message_log::{DeliveryStatus, MessageLog};
pub use phone::{format_uk_phone, is_valid_uk_mobile};
pub use schedule::ReminderSchedule;
pub use scheduled_reminder::{ReminderStatus, ScheduledReminder};
pub use shared::entity::{Entity, ID};
pub use template::{render_template, MessageTemplate, TemplateTokens};
pub use vehicle::{format_registration, ReminderType, Vehicle};
