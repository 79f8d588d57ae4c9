use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use thiserror::Error;

/// Sex recorded for employees (and, historically, courses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Masculino,
    Femenino,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sex `{0}`")]
pub struct ParseSexError(pub String);

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masculino => "Masculino",
            Self::Femenino => "Femenino",
        }
    }
}

impl FromStr for Sex {
    type Err = ParseSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Masculino" => Ok(Self::Masculino),
            "Femenino" => Ok(Self::Femenino),
            other => Err(ParseSexError(other.to_owned())),
        }
    }
}

impl Display for Sex {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "database")]
crate::column::string_column!(Sex);
