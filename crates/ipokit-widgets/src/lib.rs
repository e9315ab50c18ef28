//! Interactive widgets for ipokit.
//!
//! Each widget owns its own state and timers; nothing is shared between them.
//! Timer-driven widgets are handed the current time by the caller (`tick(now)`)
//! so they can be driven by a real or a manual clock.
//!
//! - Countdown timer to a target instant
//! - Toast notification queue with per-message auto-dismiss
//! - Form fields with declarative validation rules
//! - Infinite scroll sentinel and virtualized list window
//! - FAQ accordion with text and category filtering
//! - Badges, rating stars, skeleton loaders, tooltips and progress indicators

pub mod badge;
pub mod countdown;
pub mod faq;
pub mod form_field;
pub mod infinite_scroll;
pub mod progress;
pub mod rating;
pub mod skeleton;
pub mod toast;
pub mod tooltip;
pub mod validation;
pub mod virtual_scroll;

// Re-export commonly used types
pub use badge::{Badge, BadgeVariant};
pub use countdown::{CountdownState, CountdownTimer, CountdownUnits};
pub use faq::{categories, filter_faqs, matches_query, FaqAccordion, FaqItem};
pub use form_field::{FieldState, Form, FormField};
pub use infinite_scroll::{InfiniteScroll, ScrollMetrics};
pub use progress::{ProgressBar, StepIndicator};
pub use rating::{RatingStars, StarFill};
pub use skeleton::Skeleton;
pub use toast::{Toast, ToastId, ToastKind, ToastMessage, ToastQueue, DEFAULT_TOAST_DURATION};
pub use tooltip::Tooltip;
pub use validation::{validate_value, RuleKind, ValidationOutcome, ValidationRule, REQUIRED_MESSAGE};
pub use virtual_scroll::{VirtualScroll, VirtualWindow};
