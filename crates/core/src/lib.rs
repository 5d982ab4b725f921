//! `intake-core`: the form configuration model behind the initiative intake
//! portal.
//!
//! The admin editor mutates a [`form_config::FormConfig`] through
//! [`store::FormConfigStore`]; the intake form renders it step by step and
//! checks answers with [`submission`]; approved and denied submissions are
//! tracked by [`initiative`].

pub mod domain_investment;
pub mod error;
pub mod field_name;
pub mod form_config;
pub mod initiative;
pub mod store;
pub mod submission;
pub mod types;
