//! Markdown files with a YAML header block:
//!
//! ```text
//! ---
//! title: About Me
//! image: /images/profile.jpg
//! ---
//! Body text...
//! ```

use recital_core::content::AboutContent;
use serde::{Deserialize, Serialize};

const FENCE: &str = "---";

#[derive(Debug, Default, Serialize, Deserialize)]
struct AboutHeader {
    #[serde(default)]
    title: String,
    #[serde(default)]
    image: String,
}

/// Splits a document into its header text and body. A document without a
/// leading fence has an empty header.
fn split(doc: &str) -> (&str, &str) {
    let doc = doc.strip_prefix('\u{feff}').unwrap_or(doc);
    let Some(rest) = doc.strip_prefix(FENCE).and_then(|r| r.strip_prefix(['\n', '\r'])) else {
        return ("", doc);
    };
    let rest = rest.strip_prefix('\n').unwrap_or(rest);

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return (&rest[..offset], &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    // Unterminated header: treat everything as body.
    ("", doc)
}

pub fn parse_about(doc: &str) -> Result<AboutContent, serde_yaml::Error> {
    let (header, body) = split(doc);
    let header: AboutHeader = if header.trim().is_empty() {
        AboutHeader::default()
    } else {
        serde_yaml::from_str(header)?
    };

    Ok(AboutContent {
        title: header.title,
        image: header.image,
        content: body.trim().to_string(),
    })
}

pub fn render_about(about: &AboutContent) -> Result<String, serde_yaml::Error> {
    let header = serde_yaml::to_string(&AboutHeader {
        title: about.title.clone(),
        image: about.image.clone(),
    })?;
    Ok(format!("{FENCE}\n{header}{FENCE}\n{}\n", about.content.trim()))
}
