//! Registration command and query handlers.

mod lookup_user;
mod reference_data;
mod register_user;

pub use lookup_user::{CheckEmailHandler, LearningCircleUserHandler};
pub use reference_data::{CollegeListing, LocationLookup, ReferenceDataHandler};
pub use register_user::{RegisterUserHandler, RegisterUserResult, WELCOME_SUBJECT};
