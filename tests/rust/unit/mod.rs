//! Statement-construction and row-mapping tests against the public API.

mod fixtures;
mod row_mapper_tests;
mod scope_tests;
