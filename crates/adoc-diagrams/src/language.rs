//! Diagram kinds and output formats.
//!
//! The extension handles three diagram languages, all rendered by a
//! PlantUML-compatible server: `PlantUML`, Ditaa, and Graphviz.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a source that already carries `@start`/`@end` delimiter lines.
///
/// The opening and closing words are captured separately because the regex
/// crate has no backreferences; callers compare them for equality.
static DELIMITED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^@start([a-z]+)\n.*\n@end([a-z]+)$").unwrap());

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    PlantUml,
    Ditaa,
    Graphviz,
}

impl DiagramKind {
    /// Parse a kind from the block name the host registered.
    ///
    /// Returns None if the name is not a supported diagram block.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "plantuml" => Some(Self::PlantUml),
            "ditaa" => Some(Self::Ditaa),
            "graphviz" => Some(Self::Graphviz),
            _ => None,
        }
    }

    /// Block name this kind is registered under.
    #[must_use]
    pub fn block_name(self) -> &'static str {
        match self {
            Self::PlantUml => "plantuml",
            Self::Ditaa => "ditaa",
            Self::Graphviz => "graphviz",
        }
    }

    /// Delimiter pair wrapped around undelimited sources.
    #[must_use]
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::PlantUml => ("@startuml", "@enduml"),
            Self::Ditaa => ("@startditaa", "@endditaa"),
            Self::Graphviz => ("@startdot", "@enddot"),
        }
    }
}

/// Whether a source already carries matching `@start`/`@end` delimiter lines.
#[must_use]
pub fn is_delimited(source: &str) -> bool {
    DELIMITED
        .captures(source)
        .is_some_and(|caps| caps[1] == caps[2])
}

/// Wrap a source in the kind's delimiters unless it is already delimited.
///
/// Already-delimited sources pass through untouched, even when the delimiter
/// word does not match `kind`; the server accepts any of its own wrappers.
#[must_use]
pub fn ensure_delimited(kind: DiagramKind, source: &str) -> Cow<'_, str> {
    if is_delimited(source) {
        Cow::Borrowed(source)
    } else {
        let (start, end) = kind.delimiters();
        Cow::Owned(format!("{start}\n{source}\n{end}"))
    }
}

/// Output format for rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Raster output (default).
    #[default]
    Png,
    /// Vector output.
    Svg,
}

impl ImageFormat {
    /// Parse a format from the block's `format` attribute.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Format as it appears in the server URL path and as a file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Media type of the rendered image.
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_block_names() {
        assert_eq!(DiagramKind::parse("plantuml"), Some(DiagramKind::PlantUml));
        assert_eq!(DiagramKind::parse("ditaa"), Some(DiagramKind::Ditaa));
        assert_eq!(DiagramKind::parse("graphviz"), Some(DiagramKind::Graphviz));
        assert_eq!(DiagramKind::parse("mermaid"), None);
        assert_eq!(DiagramKind::parse(""), None);
    }

    #[test]
    fn test_block_name_round_trip() {
        for kind in [
            DiagramKind::PlantUml,
            DiagramKind::Ditaa,
            DiagramKind::Graphviz,
        ] {
            assert_eq!(DiagramKind::parse(kind.block_name()), Some(kind));
        }
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            DiagramKind::PlantUml.delimiters(),
            ("@startuml", "@enduml")
        );
        assert_eq!(
            DiagramKind::Ditaa.delimiters(),
            ("@startditaa", "@endditaa")
        );
        assert_eq!(
            DiagramKind::Graphviz.delimiters(),
            ("@startdot", "@enddot")
        );
    }

    #[test]
    fn test_is_delimited() {
        assert!(is_delimited("@startuml\nA -> B\n@enduml"));
        assert!(is_delimited("@startditaa\n+--+\n@endditaa"));
        // Multi-line body
        assert!(is_delimited("@startuml\nA -> B\nB -> C\n@enduml"));
    }

    #[test]
    fn test_is_delimited_mismatched_words() {
        assert!(!is_delimited("@startuml\nA -> B\n@endditaa"));
    }

    #[test]
    fn test_is_delimited_bare_source() {
        assert!(!is_delimited("A -> B"));
        assert!(!is_delimited("@startuml A -> B @enduml"));
        // Trailing newline breaks the end anchor
        assert!(!is_delimited("@startuml\nA -> B\n@enduml\n"));
    }

    #[test]
    fn test_ensure_delimited_wraps_bare_source() {
        let wrapped = ensure_delimited(DiagramKind::PlantUml, "A -> B");
        assert_eq!(wrapped, "@startuml\nA -> B\n@enduml");

        let wrapped = ensure_delimited(DiagramKind::Ditaa, "+--+");
        assert_eq!(wrapped, "@startditaa\n+--+\n@endditaa");

        let wrapped = ensure_delimited(DiagramKind::Graphviz, "a -> b");
        assert_eq!(wrapped, "@startdot\na -> b\n@enddot");
    }

    #[test]
    fn test_ensure_delimited_passes_through() {
        let source = "@startuml\nA -> B\n@enduml";
        let result = ensure_delimited(DiagramKind::PlantUml, source);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, source);
    }

    #[test]
    fn test_ensure_delimited_keeps_foreign_wrapper() {
        // A ditaa block already wrapped in @startuml is not re-wrapped
        let source = "@startuml\nditaa\n+--+\n@enduml";
        let result = ensure_delimited(DiagramKind::Ditaa, source);
        assert_eq!(result, source);
    }

    #[test]
    fn test_image_format_parse() {
        assert_eq!(ImageFormat::parse("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::parse("svg"), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::parse("txt"), None);
        assert_eq!(ImageFormat::parse(""), None);
    }

    #[test]
    fn test_image_format_default_is_png() {
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
    }

    #[test]
    fn test_image_format_media_type() {
        assert_eq!(ImageFormat::Png.media_type(), "image/png");
        assert_eq!(ImageFormat::Svg.media_type(), "image/svg+xml");
    }
}
