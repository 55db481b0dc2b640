//! Sort-toggle anchors for table column headers
//!
//! `{% anchor name Name asc %}` on `/people/?page=2` renders
//!
//! ```text
//! <a href="/people/?sort=name&page=2&dir=asc" title="Name">Name</a>
//! ```
//!
//! When `name` is the active sort field the link flips the direction and the
//! visible text gets the direction icon appended.

use crate::core::{
    Result, SortDirection, SortRequest, SortingConfig, SortingError, DIR_PARAM, SORT_PARAM,
};
use crate::sorting::collection::is_segment;

const DIRECTIVE: &str = "anchor";

/// One sortable column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortAnchor {
    field: String,
    title: String,
    default_direction: SortDirection,
}

impl SortAnchor {
    /// Anchor for `field` with a capitalized title and no default direction
    pub fn new(field: impl Into<String>) -> Result<Self> {
        let field = field.into().trim().to_string();
        if !is_identifier(&field) {
            return Err(SortingError::syntax(
                DIRECTIVE,
                format!("field '{}' is not a valid field name", field),
            ));
        }
        let title = capitalize(&field);
        Ok(Self {
            field,
            title,
            default_direction: SortDirection::Unset,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default_direction(mut self, direction: SortDirection) -> Self {
        self.default_direction = direction;
        self
    }

    /// Build from directive arguments: `field [title] [default_dir]`
    pub fn from_directive_args(args: &[String]) -> Result<Self> {
        let (field, rest) = args
            .split_first()
            .ok_or_else(|| SortingError::syntax(DIRECTIVE, "takes at least 1 argument"))?;
        if rest.len() > 2 {
            return Err(SortingError::syntax(DIRECTIVE, "takes at most 3 arguments"));
        }

        let mut anchor = Self::new(field.as_str())?;
        if let Some(title) = rest.first() {
            anchor = anchor.with_title(title.as_str());
        }
        if let Some(dir) = rest.get(1) {
            let direction = dir.parse().map_err(|_| {
                SortingError::syntax(DIRECTIVE, format!("unknown default direction '{}'", dir))
            })?;
            anchor = anchor.with_default_direction(direction);
        }
        Ok(anchor)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn default_direction(&self) -> SortDirection {
        self.default_direction
    }

    /// Render the `<a>` tag for `request`
    ///
    /// Fails only when the request is sorted on this field with a `dir` token
    /// outside `asc`/`desc`/empty.
    pub fn render(&self, request: &SortRequest, config: &SortingConfig) -> Result<String> {
        let mut params = request.query().clone();
        let active_field = params.remove(SORT_PARAM).unwrap_or_default();
        let active_dir = params.remove(DIR_PARAM);

        let icon = if active_field == self.field {
            let direction = match active_dir {
                Some(token) => token.parse::<SortDirection>()?,
                None => self.default_direction,
            };
            params.set(DIR_PARAM, direction.inverse().as_str());
            direction.icon(config)
        } else {
            if !self.default_direction.is_unset() {
                params.set(DIR_PARAM, self.default_direction.as_str());
            }
            ""
        };

        let mut href = format!("{}?{}={}", escape_attr(request.path()), SORT_PARAM, self.field);
        if !params.is_empty() {
            href.push('&');
            href.push_str(&params.urlencode());
        }

        let text = if icon.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, icon)
        };

        Ok(format!(
            r#"<a href="{}" title="{}">{}</a>"#,
            href,
            escape_attr(&self.title),
            text
        ))
    }
}

/// First character upper case, the rest lower case
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A sort field path without a direction marker, e.g. `name` or `author.name`
fn is_identifier(s: &str) -> bool {
    s.replace("__", ".").split('.').all(is_segment)
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize("created_AT"), "Created_at");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_directive_defaults() {
        let anchor = SortAnchor::from_directive_args(&args(&["name"])).unwrap();
        assert_eq!(anchor.field(), "name");
        assert_eq!(anchor.title(), "Name");
        assert_eq!(anchor.default_direction(), SortDirection::Unset);
    }

    #[test]
    fn test_directive_all_arguments() {
        let anchor =
            SortAnchor::from_directive_args(&args(&["created", "Date added", "desc"])).unwrap();
        assert_eq!(anchor.title(), "Date added");
        assert_eq!(anchor.default_direction(), SortDirection::Desc);
    }

    #[test]
    fn test_directive_arity_errors() {
        assert!(matches!(
            SortAnchor::from_directive_args(&[]),
            Err(SortingError::Syntax { .. })
        ));
        assert!(matches!(
            SortAnchor::from_directive_args(&args(&["a", "A", "asc", "extra"])),
            Err(SortingError::Syntax { .. })
        ));
    }

    #[test]
    fn test_directive_bad_default_direction() {
        let err = SortAnchor::from_directive_args(&args(&["a", "A", "up"])).unwrap_err();
        assert!(matches!(err, SortingError::Syntax { .. }));
    }

    #[test]
    fn test_invalid_field_name() {
        assert!(SortAnchor::new("").is_err());
        assert!(SortAnchor::new("-name").is_err());
        assert!(SortAnchor::new("na me").is_err());
        assert!(SortAnchor::new("a..b").is_err());
        assert!(SortAnchor::new("name.").is_err());
        assert!(SortAnchor::new(".name").is_err());
        assert!(SortAnchor::new("author__name").is_ok());
        assert!(SortAnchor::new("author.name").is_ok());
    }

    #[test]
    fn test_title_is_escaped_only_in_attribute() {
        let anchor = SortAnchor::new("quote").unwrap().with_title(r#"Say "hi" & <b>"#);
        let request = SortRequest::from_uri("/q?sort=quote&dir=asc");
        assert_eq!(
            anchor.render(&request, &SortingConfig::default()).unwrap(),
            r#"<a href="/q?sort=quote&dir=desc" title="Say &quot;hi&quot; &amp; &lt;b&gt;">Say "hi" & <b> &uarr;</a>"#
        );
    }

    #[test]
    fn test_inactive_column_without_default() {
        let anchor = SortAnchor::new("name").unwrap();
        let html = anchor
            .render(&SortRequest::from_uri("/items/"), &SortingConfig::default())
            .unwrap();
        assert_eq!(html, r#"<a href="/items/?sort=name" title="Name">Name</a>"#);
    }

    #[test]
    fn test_inactive_column_uses_default_direction() {
        let anchor = SortAnchor::new("name")
            .unwrap()
            .with_default_direction(SortDirection::Asc);
        let request = SortRequest::from_uri("/items/?sort=age&dir=desc");
        let html = anchor.render(&request, &SortingConfig::default()).unwrap();
        assert_eq!(
            html,
            r#"<a href="/items/?sort=name&dir=asc" title="Name">Name</a>"#
        );
    }

    #[test]
    fn test_active_ascending_flips_and_shows_up_icon() {
        let anchor = SortAnchor::new("name").unwrap();
        let request = SortRequest::from_uri("/items/?sort=name&dir=asc");
        let html = anchor.render(&request, &SortingConfig::default()).unwrap();
        assert_eq!(
            html,
            r#"<a href="/items/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
        );
    }

    #[test]
    fn test_active_without_dir_falls_back_to_default() {
        let config = SortingConfig::default();
        let request = SortRequest::from_uri("/items/?sort=name");

        let unset = SortAnchor::new("name").unwrap();
        assert_eq!(
            unset.render(&request, &config).unwrap(),
            r#"<a href="/items/?sort=name&dir=asc" title="Name">Name &darr;</a>"#
        );

        let asc = unset.with_default_direction(SortDirection::Asc);
        assert_eq!(
            asc.render(&request, &config).unwrap(),
            r#"<a href="/items/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
        );
    }

    #[test]
    fn test_active_with_unknown_direction_fails() {
        let anchor = SortAnchor::new("name").unwrap();
        let request = SortRequest::from_uri("/items/?sort=name&dir=sideways");
        let err = anchor.render(&request, &SortingConfig::default()).unwrap_err();
        assert!(matches!(err, SortingError::UnknownDirection(_)));
    }

    #[test]
    fn test_unknown_direction_ignored_on_other_columns() {
        let anchor = SortAnchor::new("name").unwrap();
        let request = SortRequest::from_uri("/items/?sort=age&dir=sideways");
        assert!(anchor.render(&request, &SortingConfig::default()).is_ok());
    }

    #[test]
    fn test_forwards_other_parameters_once() {
        let anchor = SortAnchor::new("name").unwrap();
        let request = SortRequest::from_uri("/items/?page=2&sort=name&q=a+b&dir=desc&sort=x");
        let html = anchor.render(&request, &SortingConfig::default()).unwrap();
        assert_eq!(
            html,
            r#"<a href="/items/?sort=name&page=2&q=a+b" title="Name">Name</a>"#
        );
    }

    #[test]
    fn test_custom_icons() {
        let config = SortingConfig {
            sort_down_icon: "&#9660;".to_string(),
            ..SortingConfig::default()
        };
        let anchor = SortAnchor::new("age").unwrap().with_title("Age (years)");
        let request = SortRequest::from_uri("/p?sort=age&dir=desc");
        assert_eq!(
            anchor.render(&request, &config).unwrap(),
            r#"<a href="/p?sort=age&dir=asc" title="Age (years)">Age (years) &#9660;</a>"#
        );
    }
}
