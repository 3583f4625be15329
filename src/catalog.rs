// Error catalog: integer code -> title + body. Built once, never mutated.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// One canned error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: u32,
    pub title: Cow<'static, str>,
    /// Descriptive text. May contain markup; passed through as-is.
    pub body: Cow<'static, str>,
}

impl CatalogEntry {
    pub const fn new(code: u32, title: &'static str, body: &'static str) -> Self {
        CatalogEntry {
            code,
            title: Cow::Borrowed(title),
            body: Cow::Borrowed(body),
        }
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error #{}: {}{}", self.code, self.title, self.body)
    }
}

/// Immutable code -> entry mapping.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorCatalog {
    entries: BTreeMap<u32, CatalogEntry>,
}

impl ErrorCatalog {
    /// The process-wide catalog of documented chart errors.
    pub fn builtin() -> &'static ErrorCatalog {
        static CATALOG: OnceLock<ErrorCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| ErrorCatalog {
            entries: BUILTIN_ENTRIES
                .iter()
                .map(|entry| (entry.code, entry.clone()))
                .collect(),
        })
    }

    /// Build a catalog from host-supplied entries. Codes must be unique.
    pub fn from_entries<I>(entries: I) -> OverlayResult<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            let code = entry.code;
            if map.insert(code, entry).is_some() {
                return Err(OverlayError::DuplicateErrorCode(code));
            }
        }
        Ok(ErrorCatalog { entries: map })
    }

    /// Look up the entry for `code`.
    pub fn lookup(&self, code: u32) -> OverlayResult<&CatalogEntry> {
        self.entries
            .get(&code)
            .ok_or(OverlayError::UnknownErrorCode(code))
    }

    /// The overlay text for `code`: `Error #<code>: <title><body>`.
    pub fn format_message(&self, code: u32) -> OverlayResult<String> {
        self.lookup(code).map(|entry| entry.to_string())
    }

    pub fn contains(&self, code: u32) -> bool {
        self.entries.contains_key(&code)
    }

    /// All codes, ascending.
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static BUILTIN_ENTRIES: [CatalogEntry; 19] = [
    CatalogEntry::new(
        10,
        "Can not plot zero or subzero values on a logarithmic axis",
        "<p>A zero or subzero data value was added to a logarithmic axis, or the \
         axis minimum or threshold is set to 0 or less.</p>",
    ),
    CatalogEntry::new(
        11,
        "Can not link axes of different type",
        "<p>The linkedTo option links two axes of different types, for example a \
         logarithmic axis to a linear axis. Ticks, extremes and padding are \
         calculated differently for each type.</p>",
    ),
    CatalogEntry::new(
        12,
        "Highcharts expects point configuration to be numbers or arrays in turbo mode",
        "<p>series.data contains object configurations and the number of points \
         exceeds the turboThreshold. Raise the threshold or use numbers or arrays \
         for the points.</p>",
    ),
    CatalogEntry::new(
        13,
        "Rendering div not found",
        "<p>The chart.renderTo option does not resolve to an element the chart can \
         be rendered in.</p>",
    ),
    CatalogEntry::new(
        14,
        "String value sent to series.data, expected Number",
        "<p>A string was passed as a data point. Values parsed from CSV or XML must \
         be converted with parseFloat. Only the first value is checked.</p>",
    ),
    CatalogEntry::new(
        15,
        "Highcharts expects data to be sorted",
        "<p>A line series or stock chart received data that is not sorted in \
         ascending X order. Data must be pre-sorted.</p>",
    ),
    CatalogEntry::new(
        16,
        "Highcharts already defined in the page",
        "<p>The library was loaded a second time in the same page. Highstock \
         includes everything in Highcharts, so only one file is needed.</p>",
    ),
    CatalogEntry::new(
        17,
        "The requested series type does not exist",
        "<p>chart.type or series.type names a series type that is not defined. \
         The module defining it is probably not loaded.</p>",
    ),
    CatalogEntry::new(
        18,
        "The requested axis does not exist",
        "<p>A series' xAxis or yAxis property points to an axis that does not \
         exist.</p>",
    ),
    CatalogEntry::new(
        19,
        "Too many ticks",
        "<p>More ticks were applied to an axis than the axis has pixels, for \
         example with categories and labels.step over a long data range.</p>",
    ),
    CatalogEntry::new(
        20,
        "Can not add object point configuration to a long data series",
        "<p>Points added with the object literal syntax only work below the \
         series' turboThreshold. Use the array syntax instead.</p>",
    ),
    CatalogEntry::new(
        21,
        "Can not find Proj4js library",
        "<p>Latitude/longitude functionality in maps requires the Proj4js library \
         to be loaded.</p>",
    ),
    CatalogEntry::new(
        22,
        "Map does not support latitude/longitude",
        "<p>The loaded map has no latitude/longitude support. Use a map from the \
         official collection or convert projections with Proj4js.</p>",
    ),
    CatalogEntry::new(
        23,
        "Unsupported color format used for color interpolation",
        "<p>Only hex, rgb and rgba colors can be interpolated. Short hex, named \
         colors and gradients jump straight to the end color.</p>",
    ),
    CatalogEntry::new(
        24,
        "Cannot run Point.update on a grouped point",
        "<p>The point is grouped by data grouping, so there is no reference to the \
         raw points.</p>",
    ),
    CatalogEntry::new(
        25,
        "Can not find Moment.js library",
        "<p>The global.timezone option requires the Moment.js library to be \
         loaded.</p>",
    ),
    CatalogEntry::new(
        26,
        "WebGL not supported, and no fallback module included",
        "<p>The browser lacks WebGL and the canvas fallback module is missing or \
         was included after the boost module.</p>",
    ),
    CatalogEntry::new(
        27,
        "This browser does not support SVG.",
        "<p>Old browsers need the oldie module loaded after the main library.</p>",
    ),
    CatalogEntry::new(
        28,
        "Fallback to export server disabled",
        "<p>Offline export could not handle this chart and the fallback to the \
         online export server is disabled. Define exporting.error to inform \
         users.</p>",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builtin_has_documented_range() {
        let catalog = ErrorCatalog::builtin();
        assert_eq!(catalog.len(), 19);
        assert_eq!(catalog.codes().collect::<Vec<_>>(), (10..=28).collect::<Vec<_>>());
    }

    #[test]
    fn every_entry_has_text() {
        let catalog = ErrorCatalog::builtin();
        for code in catalog.codes() {
            let entry = catalog.lookup(code).unwrap();
            assert_eq!(entry.code, code);
            assert!(!entry.title.is_empty(), "#{code} has empty title");
            assert!(!entry.body.is_empty(), "#{code} has empty body");
        }
    }

    #[test]
    fn format_message_layout() {
        let message = ErrorCatalog::builtin().format_message(13).unwrap();
        assert!(message.starts_with("Error #13: Rendering div not found<p>"));
    }

    #[test]
    fn unknown_code_fails() {
        let err = ErrorCatalog::builtin().lookup(9999).unwrap_err();
        assert!(matches!(err, OverlayError::UnknownErrorCode(9999)));
    }

    #[test]
    fn duplicate_custom_code_rejected() {
        let result = ErrorCatalog::from_entries([
            CatalogEntry::new(1, "a", "b"),
            CatalogEntry::new(1, "c", "d"),
        ]);
        assert!(matches!(result, Err(OverlayError::DuplicateErrorCode(1))));
    }

    proptest! {
        #[test]
        fn lookup_matches_contains(code in 0u32..10_000) {
            let catalog = ErrorCatalog::builtin();
            match catalog.lookup(code) {
                Ok(entry) => {
                    prop_assert!(catalog.contains(code));
                    prop_assert_eq!(entry.code, code);
                }
                Err(OverlayError::UnknownErrorCode(missing)) => {
                    prop_assert!(!catalog.contains(code));
                    prop_assert_eq!(missing, code);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
