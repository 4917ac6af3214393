//! Message body and its plain-text projection

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref SCRIPT_OR_STYLE: Regex =
        Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref BLOCK_END: Regex =
        Regex::new(r"(?i)</(p|div|h[1-6]|li|blockquote|tr|pre|ul|ol|table)\s*>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref ENTITY: Regex =
        Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([a-zA-Z][a-zA-Z0-9]*));").unwrap();
}

/// Markup an empty rich-text editor leaves behind
const EMPTY_PLACEHOLDERS: &[&str] = &[
    "",
    "<br>",
    "<br/>",
    "<br />",
    "<p></p>",
    "<p><br></p>",
    "<p><br/></p>",
    "<div><br></div>",
    "<div></div>",
];

/// A message body: HTML markup plus the plain text derived from it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    markup: String,
    plain: String,
}

impl Body {
    /// Creates a body, deriving the plain-text projection from `markup`
    pub fn from_markup(markup: &str) -> Self {
        Self {
            markup: markup.to_string(),
            plain: html_to_plain(markup),
        }
    }

    /// The HTML markup
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The plain-text projection
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// True for editor placeholders and for markup without visible text
    pub fn is_visually_empty(&self) -> bool {
        let compact: String = self
            .markup
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        EMPTY_PLACEHOLDERS.contains(&compact.as_str()) || self.plain.trim().is_empty()
    }

    /// Returns a copy with `signature` appended to both projections after a
    /// `---` line. Blank signatures leave the body untouched.
    pub fn with_signature(&self, signature: &str) -> Self {
        let signature = signature.trim();

        if signature.is_empty() {
            return self.clone();
        }

        let escaped = escape_html(signature).replace('\n', "<br>");

        Self {
            markup: format!("{}<br>---<br>{}", self.markup, escaped),
            plain: format!("{}\n---\n{}", self.plain, signature),
        }
    }
}

/// Strips markup down to text, turning line breaks and block ends into newlines
pub fn html_to_plain(markup: &str) -> String {
    let text = SCRIPT_OR_STYLE.replace_all(markup, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = BLOCK_END.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let text = lines.join("\n");

    BLANK_LINES.replace_all(&text, "\n\n").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    // Single pass, so "&amp;lt;" decodes to "&lt;" and no further
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let decoded = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(decimal), _, _) => decimal.as_str().parse().ok().and_then(char::from_u32),
                (_, Some(hex), _) => u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32),
                (_, _, Some(name)) => named_entity(name.as_str()),
                _ => None,
            };

            match decoded {
                Some('\u{a0}') => " ".to_string(),
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "bull" => '\u{2022}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "euro" => '\u{20ac}',
        _ => return None,
    };

    Some(c)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
