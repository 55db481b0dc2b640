//! Sort direction tokens and their icon/inverse mapping

use serde::{Deserialize, Serialize};

use crate::core::config::SortingConfig;
use crate::core::error::SortingError;

/// Direction carried by the `dir` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    /// No `dir` given (empty token)
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
            SortDirection::Unset => "",
        }
    }

    /// Icon shown next to the active column's title
    pub fn icon<'a>(&self, config: &'a SortingConfig) -> &'a str {
        match self {
            SortDirection::Asc => &config.sort_up_icon,
            SortDirection::Desc | SortDirection::Unset => &config.sort_down_icon,
        }
    }

    /// Direction the column toggles to when clicked
    pub fn inverse(&self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc | SortDirection::Unset => SortDirection::Asc,
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == SortDirection::Unset
    }
}

impl std::str::FromStr for SortDirection {
    type Err = SortingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            "" => Ok(SortDirection::Unset),
            other => Err(SortingError::UnknownDirection(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("".parse::<SortDirection>().unwrap(), SortDirection::Unset);
    }

    #[test]
    fn test_unknown_token_is_lookup_error() {
        let err = "ASC".parse::<SortDirection>().unwrap_err();
        assert!(matches!(err, SortingError::UnknownDirection(ref t) if t == "ASC"));
    }

    #[test]
    fn test_descriptor_table() {
        let config = SortingConfig::default();

        assert_eq!(SortDirection::Asc.icon(&config), "&uarr;");
        assert_eq!(SortDirection::Asc.inverse(), SortDirection::Desc);

        assert_eq!(SortDirection::Desc.icon(&config), "&darr;");
        assert_eq!(SortDirection::Desc.inverse(), SortDirection::Asc);

        assert_eq!(SortDirection::Unset.icon(&config), "&darr;");
        assert_eq!(SortDirection::Unset.inverse(), SortDirection::Asc);
    }

    #[test]
    fn test_display_roundtrips_token() {
        for dir in [SortDirection::Asc, SortDirection::Desc, SortDirection::Unset] {
            assert_eq!(dir.to_string().parse::<SortDirection>().unwrap(), dir);
        }
    }
}
