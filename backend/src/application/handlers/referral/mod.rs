//! Referral program handlers.

mod referral_overview;

pub use referral_overview::{ReferralOverview, ReferralOverviewHandler, ReferredMember};
