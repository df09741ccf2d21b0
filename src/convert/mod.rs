//! # Naming and type conversion
//!
//! Pure, infallible helpers shared by the generators and exposed to
//! templates through the function registry:
//!
//! - identifier casing ([`to_snake_case`], [`to_camel_case`],
//!   [`to_lower_camel_case`], [`lc_first`], [`table_name`])
//! - logical field type → SQL / Go / Protobuf / TypeScript type tokens
//!   ([`map_type`])

mod naming;
mod types;

pub use naming::{
    lc_first, remove_last_char, table_name, to_camel_case, to_lower_camel_case, to_snake_case,
};
pub use types::{
    column_type, is_boolean, is_numeric, is_textual, map_type, TypeTarget, DEFAULT_VARCHAR_LENGTH,
};
