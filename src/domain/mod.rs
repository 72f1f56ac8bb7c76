pub mod catalog;
pub mod common;
pub mod pin;
pub mod session;
pub mod subscription;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use pin::Pin;
pub use session::SessionFlags;
pub use subscription::{BillingPeriod, Subscription, SubscriptionCategory};
