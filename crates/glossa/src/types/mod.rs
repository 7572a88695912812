mod custom;
mod datetime;
mod number;
mod value;

pub use custom::CustomValue;
pub use datetime::{DateTimeOptions, DateTimeStyle, DateTimeValue};
pub use number::{NumberOptions, NumberStyle, NumberValue, PluralType};
pub use value::{NoneValue, Value};
