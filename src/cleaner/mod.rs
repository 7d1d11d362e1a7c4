// src/cleaner/mod.rs

//! Regex-based HTML cleanup.
//!
//! The cleaner works on the surface text of the markup, it never builds a
//! DOM. Each rule is one global substitution applied in a fixed order:
//! scripts, links, images, then presentation attributes (always).
//!
//! Known gaps of the surface model are kept as-is:
//! * `<script>` is matched case-sensitively, `<SCRIPT>` survives.
//! * Links are only unwrapped when `href` is double-quoted and the link
//!   text sits on a single line.
//! * Only double-quoted `class`/`id`/`style` values preceded by a single
//!   space are stripped.

pub mod batch;

use std::{borrow::Cow, fmt, str::FromStr, sync::LazyLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Whole `<script ...>...</script>` elements, up to the first closing tag.
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script\b.*?</script>").expect("valid script pattern"));

/// Anchors carrying a double-quoted `href`. Group 3 is the link text.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a(?-u:\s)+(?:[^>]*?(?-u:\s)+)?href="([^"]*)"([^>]*)>(.*?)</a>"#)
        .expect("valid link pattern")
});

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img(?-u:\s)+.*?>").expect("valid image pattern"));

/// One presentation attribute inside a tag. The tag prefix is greedy, so a
/// single pass removes the last matching attribute of each tag.
static PRESENTATION_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<[^>]+) (?i-u:class|id|style)=".*?""#).expect("valid attribute pattern")
});

/// A tag from `<` up to (not including) the next `>`.
static TAG_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+").expect("valid tag span pattern"));

/// Every presentation attribute inside one tag span.
static TAG_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#" (?i-u:class|id|style)="[^"\n]*""#).expect("valid tag attribute pattern")
});

/// Which optional cleanup rules to run. Attribute stripping is not optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOptions {
    #[serde(default)]
    pub remove_scripts: bool,
    #[serde(default)]
    pub remove_links: bool,
    #[serde(default)]
    pub remove_images: bool,
}

impl CleaningOptions {
    pub fn all() -> Self {
        Self {
            remove_scripts: true,
            remove_links: true,
            remove_images: true,
        }
    }
}

/// How often the presentation-attribute substitution is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributePolicy {
    /// One global substitution. A tag with several of `class`/`id`/`style`
    /// keeps all but the last one.
    #[default]
    SinglePass,
    /// Strip every `class`, `id` and `style` attribute of every tag, as if
    /// the substitution were repeated until the text stops changing.
    FixedPoint,
}

impl FromStr for AttributePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_pass" | "single" => Ok(Self::SinglePass),
            "fixed_point" | "fixed" => Ok(Self::FixedPoint),
            other => Err(format!("unknown attribute policy '{}'", other)),
        }
    }
}

impl fmt::Display for AttributePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePass => f.write_str("single_pass"),
            Self::FixedPoint => f.write_str("fixed_point"),
        }
    }
}

/// Stateless cleaner; cheap to copy into handlers and worker tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCleaner {
    policy: AttributePolicy,
}

impl HtmlCleaner {
    pub fn new(policy: AttributePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AttributePolicy {
        self.policy
    }

    /// Runs the pipeline over `html` and returns the cleaned copy.
    pub fn clean(&self, html: &str, options: &CleaningOptions) -> String {
        let mut html = Cow::Borrowed(html);

        if options.remove_scripts {
            html = into_owned_if_changed(html, strip_scripts);
        }
        if options.remove_links {
            html = into_owned_if_changed(html, unwrap_links);
        }
        if options.remove_images {
            html = into_owned_if_changed(html, strip_images);
        }

        match self.policy {
            AttributePolicy::SinglePass => {
                html = into_owned_if_changed(html, strip_presentation_attributes);
            }
            AttributePolicy::FixedPoint => {
                html = into_owned_if_changed(html, strip_all_presentation_attributes);
            }
        }

        html.into_owned()
    }
}

fn into_owned_if_changed<'a>(
    html: Cow<'a, str>,
    step: impl for<'h> Fn(&'h str) -> Cow<'h, str>,
) -> Cow<'a, str> {
    let changed = match step(&*html) {
        Cow::Borrowed(_) => None,
        Cow::Owned(changed) => Some(changed),
    };
    changed.map_or(html, Cow::Owned)
}

/// Cleans `html` with the single-pass attribute policy.
pub fn clean_html(
    html: &str,
    remove_scripts: bool,
    remove_links: bool,
    remove_images: bool,
) -> String {
    let options = CleaningOptions {
        remove_scripts,
        remove_links,
        remove_images,
    };
    HtmlCleaner::default().clean(html, &options)
}

/// Removes every `<script>` element together with its content.
pub fn strip_scripts(html: &str) -> Cow<'_, str> {
    SCRIPT_RE.replace_all(html, "")
}

/// Replaces `<a ... href="...">text</a>` with `text`.
pub fn unwrap_links(html: &str) -> Cow<'_, str> {
    LINK_RE.replace_all(html, "${3}")
}

/// Removes `<img ...>` tags. A bare `<img>` without attributes is kept.
pub fn strip_images(html: &str) -> Cow<'_, str> {
    IMAGE_RE.replace_all(html, "")
}

/// One global pass removing a `class`, `id` or `style` attribute per tag.
pub fn strip_presentation_attributes(html: &str) -> Cow<'_, str> {
    PRESENTATION_ATTR_RE.replace_all(html, "${1}")
}

/// Removes every `class`, `id` and `style` attribute from every tag.
///
/// Runs one pass over the tag spans instead of repeating the global
/// substitution, so a tag with many attributes costs time linear in its
/// length. An attribute value has to close before the tag's `>`.
pub fn strip_all_presentation_attributes(html: &str) -> Cow<'_, str> {
    if !TAG_ATTR_RE.is_match(html) {
        return Cow::Borrowed(html);
    }

    TAG_SPAN_RE.replace_all(html, |caps: &Captures<'_>| {
        let mut tag = Cow::Borrowed(&caps[0]);
        // Re-run only when a removal splices a new attribute together,
        // e.g. ` cl class="x"ass="y"`.
        loop {
            let next = match TAG_ATTR_RE.replace_all(&*tag, "") {
                Cow::Borrowed(_) => break,
                Cow::Owned(next) => next,
            };
            tag = Cow::Owned(next);
        }
        tag.into_owned()
    })
}
