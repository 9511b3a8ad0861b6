//! Content-type library descriptors.
//!
//! The registry hands back raw entries keyed by their qualified ("uber")
//! name, e.g. `H5P.AdvancedText 1.1`. The palette and canvas only need a
//! normalized `RegistryItem`; restricted entries are filtered from the
//! palette but still loaded, because existing content may already use them.

use serde::{Deserialize, Serialize};
use winnow::ascii::space1;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Machine-name prefix stripped when deriving a display class.
const VENDOR_PREFIX: &str = "H5P.";

/// A library entry as delivered by the registry collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLibrary {
    pub title: String,
    /// Qualified name: machine name plus `major.minor` version.
    pub uber_name: String,
    /// Machine name (`H5P.AdvancedText`). Derived from `uber_name` when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub restricted: bool,
}

/// A parsed qualified library name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryName {
    pub machine_name: String,
    pub major: u32,
    pub minor: u32,
}

impl LibraryName {
    /// Parse `Machine.Name major.minor`.
    ///
    /// # Errors
    /// Returns a message describing the first offending position.
    pub fn parse(uber_name: &str) -> Result<Self, String> {
        let mut rest = uber_name.trim();
        let name = parse_uber_name
            .parse_next(&mut rest)
            .map_err(|e| format!("Library name parse error in `{uber_name}`: {e}"))?;
        if !rest.is_empty() {
            return Err(format!(
                "Library name parse error in `{uber_name}`: trailing input `{rest}`"
            ));
        }
        Ok(name)
    }

    pub fn uber_name(&self) -> String {
        format!("{} {}.{}", self.machine_name, self.major, self.minor)
    }
}

/// Authoring-ready descriptor of an insertable content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub title: String,
    /// Qualified name used to insert and load the library.
    pub qualified_name: String,
    /// Lower-cased machine name without vendor prefix, used as a CSS class.
    pub display_class: String,
}

impl RegistryItem {
    /// Normalize a raw registry entry. Entries whose qualified name cannot be
    /// parsed keep it verbatim; the display class then falls back to the raw
    /// machine name (or the qualified name itself).
    pub fn from_raw(raw: &RawLibrary) -> Self {
        let machine_name = match (&raw.name, LibraryName::parse(&raw.uber_name)) {
            (Some(name), _) => name.clone(),
            (None, Ok(parsed)) => parsed.machine_name,
            (None, Err(e)) => {
                log::warn!("{e}");
                raw.uber_name.clone()
            }
        };

        Self {
            title: raw.title.clone(),
            qualified_name: raw.uber_name.clone(),
            display_class: display_class(&machine_name),
        }
    }
}

/// `H5P.AdvancedText` → `advancedtext`.
pub fn display_class(machine_name: &str) -> String {
    machine_name.replacen(VENDOR_PREFIX, "", 1).to_lowercase()
}

/// Build the palette list: restricted entries are dropped, order is kept.
pub fn normalize_libraries(raw: &[RawLibrary]) -> Vec<RegistryItem> {
    raw.iter()
        .filter(|lib| !lib.restricted)
        .map(RegistryItem::from_raw)
        .collect()
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn parse_uber_name(input: &mut &str) -> ModalResult<LibraryName> {
    let machine_name = parse_machine_name.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let major = parse_version_part.parse_next(input)?;
    let _ = '.'.parse_next(input)?;
    let minor = parse_version_part.parse_next(input)?;
    Ok(LibraryName {
        machine_name: machine_name.to_string(),
        major,
        minor,
    })
}

fn parse_machine_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || c == '.' || c == '_' || c == '-'
    })
    .parse_next(input)
}

fn parse_version_part(input: &mut &str) -> ModalResult<u32> {
    let digits: &str = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    digits
        .parse::<u32>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(title: &str, uber: &str, restricted: bool) -> RawLibrary {
        RawLibrary {
            title: title.into(),
            uber_name: uber.into(),
            name: None,
            restricted,
        }
    }

    #[test]
    fn parse_qualified_name() {
        let name = LibraryName::parse("H5P.AdvancedText 1.12").unwrap();
        assert_eq!(
            name,
            LibraryName {
                machine_name: "H5P.AdvancedText".into(),
                major: 1,
                minor: 12,
            }
        );
        assert_eq!(name.uber_name(), "H5P.AdvancedText 1.12");
    }

    #[test]
    fn parse_rejects_missing_version() {
        assert!(LibraryName::parse("H5P.Image").is_err());
        assert!(LibraryName::parse("H5P.Image 1").is_err());
        assert!(LibraryName::parse("H5P.Image 1.x").is_err());
    }

    #[test]
    fn parse_rejects_trailing_input() {
        let err = LibraryName::parse("H5P.Image 1.1 beta").unwrap_err();
        assert!(err.contains("trailing"));
    }

    #[test]
    fn normalize_filters_restricted_and_keeps_order() {
        let items = normalize_libraries(&[
            raw("Text", "H5P.AdvancedText 1.1", false),
            raw("Video", "H5P.Video 1.6", true),
            raw("Image", "H5P.Image 1.1", false),
        ]);
        assert_eq!(
            items,
            vec![
                RegistryItem {
                    title: "Text".into(),
                    qualified_name: "H5P.AdvancedText 1.1".into(),
                    display_class: "advancedtext".into(),
                },
                RegistryItem {
                    title: "Image".into(),
                    qualified_name: "H5P.Image 1.1".into(),
                    display_class: "image".into(),
                },
            ]
        );
    }

    #[test]
    fn explicit_machine_name_wins() {
        let mut lib = raw("Course", "H5P.CoursePresentation 1.25", false);
        lib.name = Some("H5P.CoursePresentation".into());
        assert_eq!(RegistryItem::from_raw(&lib).display_class, "coursepresentation");
    }

    #[test]
    fn unparseable_name_is_kept_verbatim() {
        let item = RegistryItem::from_raw(&raw("Odd", "Vendor.Thing", false));
        assert_eq!(item.qualified_name, "Vendor.Thing");
        assert_eq!(item.display_class, "vendor.thing");
    }

    #[test]
    fn raw_library_deserializes_registry_json() {
        let lib: RawLibrary = serde_json::from_str(
            r#"{"title":"Text","uberName":"H5P.AdvancedText 1.1","name":"H5P.AdvancedText","restricted":false}"#,
        )
        .unwrap();
        assert_eq!(lib.name.as_deref(), Some("H5P.AdvancedText"));
        assert!(!lib.restricted);
    }
}
