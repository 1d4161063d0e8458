//! Validation engine tests.

pub mod aggregation;

pub use crate::common::builders::{RecordBuilder, SchemaBuilder};
pub use crate::common::fixtures;
pub use crate::{assert_field_error, assert_validation_success};
