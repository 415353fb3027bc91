//! Outbound webhook notifications.

mod notifier;

pub use notifier::WebhookNotifier;
