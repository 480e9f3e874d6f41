//! Self-service registration and the reference data the sign-up form needs.
//!
//! - `reference` - locations, organizations, departments and interest groups
//! - `new_user` - submitted registration, field checks and muid allocation
//! - `profile` - what the platform returns about a registered user

mod errors;
mod new_user;
mod profile;
mod reference;

pub use errors::RegistrationError;
pub use new_user::{muid_candidates, FieldErrors, NewRegistration, NewUser, MIN_PASSWORD_LEN};
pub use profile::{LearningCircleUser, TokenPair, UserDetail};
pub use reference::{
    Country, Department, District, InterestGroup, OrgType, Organization, State, Zone,
};
