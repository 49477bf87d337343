//! Zero values
//!
//! A field at its zero value is left out of by-example filters and
//! by-example updates. `Option<T>` is zero only when `None`, so `Some(0)`
//! still filters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait IsZero {
    fn is_zero(&self) -> bool;
}

impl IsZero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_is_zero_numeric {
    ($($ty:ty),*) => {
        $(
            impl IsZero for $ty {
                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

impl_is_zero_numeric!(i16, i32, i64, f64);

impl IsZero for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl IsZero for Uuid {
    fn is_zero(&self) -> bool {
        self.is_nil()
    }
}

impl IsZero for DateTime<Utc> {
    fn is_zero(&self) -> bool {
        *self == DateTime::<Utc>::default()
    }
}

impl IsZero for serde_json::Value {
    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl<T> IsZero for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}
