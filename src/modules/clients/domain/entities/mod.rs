pub mod client_profile;

pub use client_profile::{ClientProfile, ClientProfileDraft, ClientProfileUpdate, NewClientProfile};
