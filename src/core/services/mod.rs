pub mod cancellation_service;
pub mod summary_service;

pub use cancellation_service::{CancellationGuidance, CancellationService};
pub use summary_service::{
    CategoryBreakdown, DashboardSummary, PaymentStatus, SummaryService, UpcomingPayment,
};
