pub mod admins;
pub use admins::{Promotion, PromotionReport, WaitOutcome, promote_all, set_admin, wait_for_api};
