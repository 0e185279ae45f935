//! The `--`-delimited front-matter boundary format.
//!
//! A page source either opens with a line containing exactly `--`, followed
//! by front-matter lines, a closing `--` line, and then the body; or it has
//! no front matter at all, in which case a `title` field is synthesized from
//! the file's base name. An opening delimiter that is never closed is an
//! authoring error and fails the build.
//!
//! The block between the delimiters is YAML, parsed into a key/value
//! mapping; pages only ever see it through the `page` template variable.

use serde_yaml::Mapping;
use thiserror::Error;

/// A line consisting of exactly this string opens and closes a front-matter
/// block.
pub const DELIMITER: &str = "--";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with `--` but never closed")]
    UnterminatedBlock,
    #[error("front matter is not a key/value mapping")]
    NotAMapping,
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split page text into its front-matter block (delimiters excluded) and
/// body.
///
/// Returns `(None, text)` untouched when the first line is not a delimiter.
/// The body starts on the line after the closing delimiter.
pub fn extract(text: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let mut offset = 0usize;
    let mut block_start = 0usize;
    let mut opened = false;
    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let is_delimiter = line.trim_end_matches(['\n', '\r']) == DELIMITER;
        if !opened {
            if !is_delimiter {
                return Ok((None, text));
            }
            opened = true;
            block_start = offset;
        } else if is_delimiter {
            return Ok((Some(&text[block_start..line_start]), &text[offset..]));
        }
    }
    if opened {
        Err(FrontMatterError::UnterminatedBlock)
    } else {
        // Empty input: no lines at all.
        Ok((None, text))
    }
}

/// Front matter for a page that has none: a single `title` taken from the
/// file's base name, so every page reaches the template with at least a
/// title.
pub fn synthesize(stem: &str) -> String {
    format!("title: {stem}\n")
}

/// Parse a front-matter block into the mapping handed to templates. An
/// empty block yields an empty mapping.
pub fn load_mapping(block: &str) -> Result<Mapping, FrontMatterError> {
    match serde_yaml::from_str(block)? {
        serde_yaml::Value::Null => Ok(Mapping::new()),
        serde_yaml::Value::Mapping(map) => Ok(map),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_block_and_body() {
        let (block, body) = extract("--\ntitle: T\n--\nBody\n").unwrap();
        assert_eq!(block, Some("title: T\n"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn no_leading_delimiter_passes_through() {
        let (block, body) = extract("# Heading\n\nBody\n").unwrap();
        assert_eq!(block, None);
        assert_eq!(body, "# Heading\n\nBody\n");
    }

    #[test]
    fn closing_delimiter_at_end_of_file() {
        let (block, body) = extract("--\ntitle: T\n--").unwrap();
        assert_eq!(block, Some("title: T\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn empty_block_is_allowed() {
        let (block, body) = extract("--\n--\nBody\n").unwrap();
        assert_eq!(block, Some(""));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let err = extract("--\ntitle: T\nBody\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::UnterminatedBlock));
    }

    #[test]
    fn lone_opening_delimiter_is_an_error() {
        assert!(extract("--").is_err());
        assert!(extract("--\n").is_err());
    }

    #[test]
    fn crlf_delimiters_are_recognized() {
        let (block, body) = extract("--\r\ntitle: T\r\n--\r\nBody").unwrap();
        assert_eq!(block, Some("title: T\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn near_delimiters_are_content() {
        // `---` and `-- ` are ordinary lines, not delimiters.
        let (block, _) = extract("---\ntext\n").unwrap();
        assert_eq!(block, None);
    }

    #[test]
    fn empty_input_has_no_front_matter() {
        let (block, body) = extract("").unwrap();
        assert_eq!(block, None);
        assert_eq!(body, "");
    }

    #[test]
    fn synthesized_title_uses_stem() {
        assert_eq!(synthesize("about-me"), "title: about-me\n");
    }

    #[test]
    fn mapping_from_block() {
        let map = load_mapping("title: T\ndraft: true\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["title"], serde_yaml::Value::from("T"));
    }

    #[test]
    fn empty_block_yields_empty_mapping() {
        assert!(load_mapping("").unwrap().is_empty());
    }

    #[test]
    fn scalar_block_is_rejected() {
        let err = load_mapping("just a string").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping));
    }
}
