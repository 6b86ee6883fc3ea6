//! Date query parsing helpers.

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait DateParamExt {
    /// Parse an optional `YYYY-MM-DD` query parameter.
    fn into_date(self, name: &str) -> Result<Option<Date>, StatusError>;
}

impl DateParamExt for QueryParam<String, false> {
    fn into_date(self, name: &str) -> Result<Option<Date>, StatusError> {
        self.into_inner()
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.trim().parse::<Date>())
            .transpose()
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }
}
