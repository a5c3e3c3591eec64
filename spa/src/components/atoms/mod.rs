pub mod checkbox;
pub mod input_datetime_utc;
pub mod input_text;
pub mod select;
