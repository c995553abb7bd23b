//! # Post Assembler
//!
//! Builds the Jekyll-style document for a transformed note.
//!
//! ## Filename
//!
//! `{YYYY-MM-DD}-{slug}.md`, where the date is the note's modification date and
//! the slug comes from [`slugify`]. The name is a pure function of those two
//! inputs, so two notes with the same title on the same day collide and the
//! later one overwrites the earlier. Setting
//! [`PostOptions::unique_filenames`] appends a short hash of title and
//! timestamp to tell them apart.
//!
//! ## Document Shape
//!
//! ```text
//! ---
//! layout: post
//! title: "Trip Notes"
//! date: 2024-03-05 09:30:00
//! tags: [bag, travel]
//! ---
//!
//! * Pack bag
//! ```
//!
//! Static site generators read this exact shape. The title is written raw
//! between the quotes. `categories: [..]` follows `tags` only when categories
//! are configured.

use crate::assets::content_hash;
use crate::model::{FrontMatter, PostDocument, TransformedNote};
use chrono::NaiveDateTime;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const EMPTY_SLUG: &str = "untitled";
const TIEBREAKER_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOptions {
    pub layout: String,
    pub categories: Vec<String>,
    pub unique_filenames: bool,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            layout: "post".to_string(),
            categories: Vec::new(),
            unique_filenames: false,
        }
    }
}

/// Lower-cases `title`, maps everything outside `[a-z0-9-]` to `-`, collapses
/// runs of `-` and trims them from both ends. Titles with nothing left become
/// `untitled`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

pub fn post_filename(title: &str, modified_at: NaiveDateTime, options: &PostOptions) -> String {
    let mut slug = slugify(title);
    if options.unique_filenames {
        let key = format!("{}\n{}", title, modified_at.format(TIMESTAMP_FORMAT));
        let hash = content_hash(key.as_bytes());
        slug.push('-');
        slug.push_str(&hash[..TIEBREAKER_LEN]);
    }
    format!("{}-{}.md", modified_at.format(DATE_FORMAT), slug)
}

pub fn assemble(
    note: TransformedNote,
    modified_at: NaiveDateTime,
    options: &PostOptions,
) -> PostDocument {
    PostDocument {
        filename: post_filename(&note.title, modified_at, options),
        front_matter: FrontMatter {
            layout: options.layout.clone(),
            title: note.title,
            date: modified_at,
            tags: note.tags,
            categories: options.categories.clone(),
        },
        body: note.markup_body,
    }
}

impl PostDocument {
    /// Renders front matter and body as the file contents.
    pub fn render(&self) -> String {
        let fm = &self.front_matter;
        let mut out = String::new();
        out.push_str("---\n");
        out.push_str(&format!("layout: {}\n", fm.layout));
        out.push_str(&format!("title: \"{}\"\n", fm.title));
        out.push_str(&format!("date: {}\n", fm.date.format(TIMESTAMP_FORMAT)));
        out.push_str(&format!("tags: [{}]\n", fm.tags.join(", ")));
        if !fm.categories.is_empty() {
            out.push_str(&format!("categories: [{}]\n", fm.categories.join(", ")));
        }
        out.push_str("---\n\n");
        out.push_str(&self.body);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 30, 5)
            .unwrap()
    }

    fn note(title: &str, body: &str, tags: &[&str]) -> TransformedNote {
        TransformedNote {
            title: title.to_string(),
            markup_body: body.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_refs: Vec::new(),
        }
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Trip Notes"), "trip-notes");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify("Version 2.0 -- Release"), "version-2-0-release");
    }

    #[test]
    fn test_slugify_non_ascii_collapses() {
        assert_eq!(slugify("Café Olé"), "caf-ol");
        assert_eq!(slugify("日本語 notes"), "notes");
        assert_eq!(slugify("Ünïcödé"), "n-c-d");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify("日本語"), "untitled");
        assert_eq!(slugify("---"), "untitled");
        assert_eq!(slugify(""), "untitled");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        for title in ["Trip Notes", "Ωmega ☕ #1", "a/b\\c"] {
            assert_eq!(slugify(title), slugify(title));
            let slug = slugify(title);
            assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            assert!(!slug.contains("--"));
        }
    }

    #[test]
    fn test_filename_uses_modification_date() {
        let options = PostOptions::default();
        assert_eq!(
            post_filename("Trip Notes", at(5, 9), &options),
            "2024-03-05-trip-notes.md"
        );
    }

    #[test]
    fn test_same_title_same_day_collides() {
        let options = PostOptions::default();
        assert_eq!(
            post_filename("Trip Notes", at(5, 9), &options),
            post_filename("Trip Notes", at(5, 18), &options)
        );
    }

    #[test]
    fn test_unique_filenames_break_ties() {
        let options = PostOptions {
            unique_filenames: true,
            ..Default::default()
        };
        let morning = post_filename("Trip Notes", at(5, 9), &options);
        let evening = post_filename("Trip Notes", at(5, 18), &options);
        assert_ne!(morning, evening);
        assert!(morning.starts_with("2024-03-05-trip-notes-"));
        assert_eq!(morning, post_filename("Trip Notes", at(5, 9), &options));
    }

    #[test]
    fn test_render_front_matter_shape() {
        let doc = assemble(
            note("Trip Notes", "* Pack bag", &["bag", "travel"]),
            at(5, 9),
            &PostOptions::default(),
        );
        assert_eq!(doc.filename, "2024-03-05-trip-notes.md");
        assert_eq!(
            doc.render(),
            "---\nlayout: post\ntitle: \"Trip Notes\"\ndate: 2024-03-05 09:30:05\ntags: [bag, travel]\n---\n\n* Pack bag\n"
        );
    }

    #[test]
    fn test_render_without_tags() {
        let doc = assemble(note("T", "body", &[]), at(5, 9), &PostOptions::default());
        assert!(doc.render().contains("tags: []\n"));
    }

    #[test]
    fn test_render_title_is_raw() {
        let doc = assemble(
            note("Déjà vu: #1", "body", &[]),
            at(5, 9),
            &PostOptions::default(),
        );
        assert!(doc.render().contains("title: \"Déjà vu: #1\"\n"));
    }

    #[test]
    fn test_render_custom_layout_and_categories() {
        let options = PostOptions {
            layout: "note".to_string(),
            categories: vec!["notes".to_string()],
            ..Default::default()
        };
        let rendered = assemble(note("T", "body", &["x"]), at(5, 9), &options).render();
        assert!(rendered.contains("layout: note\n"));
        assert!(rendered.contains("tags: [x]\ncategories: [notes]\n---\n"));
    }
}
