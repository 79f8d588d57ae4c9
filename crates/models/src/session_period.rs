use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};
use thiserror::Error;

/// Time of day in which an edition's sessions take place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumProperty, EnumIter)]
pub enum SessionPeriod {
    /// Morning and afternoon
    #[serde(rename = "Tiempo Completo")]
    #[strum(props(display = "Tiempo Completo"))]
    FullTime,

    #[serde(rename = "Mañana")]
    #[strum(props(display = "Mañana"))]
    Morning,

    #[serde(rename = "Tarde")]
    #[strum(props(display = "Tarde"))]
    Afternoon,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown session period `{0}`")]
pub struct ParseSessionPeriodError(pub String);

impl SessionPeriod {
    /// The stored and displayed label
    pub fn as_str(&self) -> &'static str {
        self.get_str("display").unwrap_or_default()
    }
}

impl FromStr for SessionPeriod {
    type Err = ParseSessionPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|period| period.get_str("display") == Some(s))
            .ok_or_else(|| ParseSessionPeriodError(s.to_owned()))
    }
}

impl Display for SessionPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "database")]
crate::column::string_column!(SessionPeriod);
