//! Domain model for advisory notifications.

mod event;
mod ids;
mod notification;

pub use event::LifecycleEvent;
pub use ids::NotificationId;
pub use notification::{
    Notification, NotificationKind, PersistedNotificationData, RelatedEntity,
};
