//! Attributes a resolved resource actually delivers

use std::fmt;

use fontmatch_xlfd::XlfdName;

use crate::font::score::weight_from_name;
use crate::request::{CharSet, FontRequest, Weight};

/// What the chosen resource provides, which may differ from what was asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    pub family: String,
    pub point_size_deci: u32,
    pub weight: Weight,
    pub italic: bool,
    pub fixed_pitch: bool,
    pub charset: CharSet,
    /// The resource name is not an XLFD and the other fields echo the request
    pub raw_mode: bool,
    pub exact_match: bool,
    pub resource_name: String,
}

impl FontInfo {
    /// Parse the resolved name back into attributes
    ///
    /// Wildcard or unknown fields fall back to the request's values.
    pub fn from_resolved(resource_name: &str, request: &FontRequest, exact_match: bool) -> Self {
        let Ok(name) = XlfdName::parse(resource_name) else {
            return Self::echo(resource_name, request, exact_match);
        };

        let family = match name.family() {
            "" | "*" => request.family().to_string(),
            family => family.to_string(),
        };
        let point_size_deci = name
            .point_size_deci()
            .filter(|size| *size > 0)
            .unwrap_or_else(|| request.point_size_deci());
        let weight = match name.weight() {
            "*" | "0" => request.weight(),
            word => weight_from_name(word, false),
        };
        let italic = match name.slant_code() {
            Some('i') | Some('o') => true,
            Some('r') => false,
            _ => request.italic(),
        };
        let fixed_pitch = match name.spacing_code() {
            Some('m') | Some('c') => true,
            Some('p') => false,
            _ => request.fixed_pitch(),
        };
        let charset = CharSet::from_registry(name.charset_registry(), name.charset_encoding())
            .unwrap_or_else(|| request.charset());

        Self {
            family,
            point_size_deci,
            weight,
            italic,
            fixed_pitch,
            charset,
            raw_mode: false,
            exact_match,
            resource_name: resource_name.to_string(),
        }
    }

    fn echo(resource_name: &str, request: &FontRequest, exact_match: bool) -> Self {
        Self {
            family: request.family().to_string(),
            point_size_deci: request.point_size_deci(),
            weight: request.weight(),
            italic: request.italic(),
            fixed_pitch: request.fixed_pitch(),
            charset: request.charset(),
            raw_mode: true,
            exact_match,
            resource_name: resource_name.to_string(),
        }
    }
}

impl fmt::Display for FontInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}pt weight {}{}{} {}",
            self.family,
            self.point_size_deci / 10,
            self.point_size_deci % 10,
            self.weight,
            if self.italic { " italic" } else { "" },
            if self.fixed_pitch { " fixed" } else { "" },
            self.charset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_from_xlfd() {
        let request = FontRequest::new("Times", 120).unwrap();
        let info = FontInfo::from_resolved(
            "-adobe-courier-bold-o-normal--14-140-75-75-m-90-iso8859-2",
            &request,
            false,
        );
        assert_eq!(info.family, "courier");
        assert_eq!(info.point_size_deci, 140);
        assert_eq!(info.weight, Weight::BOLD);
        assert!(info.italic);
        assert!(info.fixed_pitch);
        assert_eq!(info.charset, CharSet::Latin2);
        assert!(!info.raw_mode);
        assert!(!info.exact_match);
    }

    #[test]
    fn test_uncertain_weight_not_adjusted() {
        let request = FontRequest::new("times", 140).unwrap();
        let info = FontInfo::from_resolved(
            "-adobe-times-extrabold-r-normal--14-140-75-75-p-74-iso8859-1",
            &request,
            false,
        );
        assert_eq!(info.weight, Weight::BOLD);
    }

    #[test]
    fn test_wildcards_echo_request() {
        let request = FontRequest::new("helvetica", 120)
            .unwrap()
            .with_italic(true);
        let info = FontInfo::from_resolved("-*-helvetica-*-*-*-*-*-120-*-*-*-*-*-*", &request, false);
        assert_eq!(info.family, "helvetica");
        assert_eq!(info.point_size_deci, 120);
        assert_eq!(info.weight, Weight::NORMAL);
        assert!(info.italic);
        assert_eq!(info.charset, CharSet::Latin1);
    }

    #[test]
    fn test_non_xlfd_is_raw() {
        let request = FontRequest::new("fixed", 130).unwrap().with_raw_mode(true);
        let info = FontInfo::from_resolved("fixed", &request, true);
        assert!(info.raw_mode);
        assert!(info.exact_match);
        assert_eq!(info.family, "fixed");
        assert_eq!(info.resource_name, "fixed");
        assert_eq!(info.to_string(), "fixed 13.0pt weight 50 latin1");
    }
}
