//! # Blog Content Loader
//!
//! Reads markdown posts (`.md` / `.mdx`) from a content directory. Each file
//! may start with a YAML front matter block:
//!
//! ```text
//! ---
//! title: Walking After Dinner
//! description: Why a short evening walk helps
//! date: 2025-03-14
//! author:
//!   name: Dana
//!   avatar: /avatars/dana.png
//! image: /blog/dinner-walk.jpg
//! ---
//! Post body in markdown...
//! ```
//!
//! Listing never fails: unreadable directories and broken files are logged
//! and left out, so a bad post cannot take the blog index down. The
//! `try_*` methods expose the underlying errors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use steps_core::blog::BlogStore;
//!
//! let store = BlogStore::new("content/blog");
//! let page = store.paginated_posts(1);
//! for post in &page.posts {
//!     println!("{} ({})", post.title, post.date);
//! }
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::errors::{CalcError, CalcResult};
use crate::settings::Settings;

/// Posts shown per listing page
pub const POSTS_PER_PAGE: usize = 10;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_AUTHOR: &str = "Steps Team";

const POST_EXTENSIONS: [&str; 2] = ["mdx", "md"];
const FRONT_MATTER_DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A blog post with front matter defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Publication date as written in the front matter (`YYYY-MM-DD` by default)
    pub date: String,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Markdown body after the front matter
    pub content: String,
}

/// One page of the blog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedPosts {
    pub posts: Vec<BlogPost>,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Front matter fields read leniently: a field with an unexpected shape
/// (a list where a string belongs, `author: Dana`) counts as missing.
#[derive(Debug, Default)]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    author_name: Option<String>,
    author_avatar: Option<String>,
    image: Option<String>,
}

impl FrontMatter {
    fn from_yaml(value: &Value) -> Self {
        let author = value.get("author");
        FrontMatter {
            title: scalar_text(value.get("title")),
            description: scalar_text(value.get("description")),
            date: scalar_text(value.get("date")),
            author_name: scalar_text(author.and_then(|a| a.get("name"))),
            author_avatar: scalar_text(author.and_then(|a| a.get("avatar"))),
            image: scalar_text(value.get("image")),
        }
    }
}

/// Text of a scalar YAML value; anything else is treated as absent.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Split a leading `---` block from the body.
///
/// Returns `(None, text)` when the file has no complete front matter block.
fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(first_break) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_break].trim_end() != FRONT_MATTER_DELIMITER {
        return (None, text);
    }

    let rest = &text[first_break + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, text)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Build a post from a file's text. `today` fills in a missing date.
pub fn parse_post(slug: &str, text: &str, today: &str) -> CalcResult<BlogPost> {
    let (yaml, body) = split_front_matter(text);

    let matter = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => {
            let value: Value = serde_yaml::from_str(yaml)
                .map_err(|e| CalcError::front_matter(slug, e.to_string()))?;
            FrontMatter::from_yaml(&value)
        }
        _ => FrontMatter::default(),
    };

    Ok(BlogPost {
        slug: slug.to_string(),
        title: non_empty(matter.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: matter.description.unwrap_or_default(),
        date: non_empty(matter.date).unwrap_or_else(|| today.to_string()),
        author: Author {
            name: non_empty(matter.author_name).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            avatar: matter.author_avatar,
        },
        image: matter.image,
        content: body.to_string(),
    })
}

/// Parse a front matter date for ordering. Accepts `YYYY-MM-DD`, RFC 3339,
/// and `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_post_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(date) {
        return Some(stamp.naive_utc());
    }
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Newest first; posts with unreadable dates go last.
fn newest_first(a: &BlogPost, b: &BlogPost) -> Ordering {
    match (parse_post_date(&a.date), parse_post_date(&b.date)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Slug for a post file name, or `None` if it is not a post.
pub fn slug_from_file_name(file_name: &str) -> Option<&str> {
    POST_EXTENSIONS.iter().find_map(|ext| {
        file_name
            .strip_suffix(ext)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
    })
}

/// Filesystem-backed post store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogStore {
    dir: PathBuf,
}

impl BlogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        BlogStore { dir: dir.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        BlogStore::new(settings.blog.content_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Post file names in the content directory, sorted by name.
    fn post_files(&self) -> CalcResult<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            CalcError::file_error("read dir", self.dir.display().to_string(), e.to_string())
        })?;

        let mut files: Vec<(String, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let name = path.file_name()?.to_str()?;
                let slug = slug_from_file_name(name)?.to_string();
                path.is_file().then_some((slug, path))
            })
            .collect();
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    fn read_post(&self, slug: &str, path: &Path, today: &str) -> CalcResult<BlogPost> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        parse_post(slug, &text, today)
    }

    /// All posts, newest first. Files that fail to parse are skipped.
    pub fn try_all_posts(&self) -> CalcResult<Vec<BlogPost>> {
        let today = today();
        let mut posts: Vec<BlogPost> = self
            .post_files()?
            .into_iter()
            .filter_map(|(slug, path)| match self.read_post(&slug, &path, &today) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping blog post");
                    None
                }
            })
            .collect();

        posts.sort_by(newest_first);
        tracing::debug!(count = posts.len(), dir = %self.dir.display(), "loaded blog posts");
        Ok(posts)
    }

    /// All posts, newest first; empty if the directory cannot be read.
    pub fn all_posts(&self) -> Vec<BlogPost> {
        self.try_all_posts().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "blog listing unavailable");
            Vec::new()
        })
    }

    /// Look up a post, preferring `.mdx` over `.md`.
    pub fn try_post_by_slug(&self, slug: &str) -> CalcResult<BlogPost> {
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
            return Err(CalcError::post_not_found(slug));
        }

        let path = POST_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| CalcError::post_not_found(slug))?;

        self.read_post(slug, &path, &today())
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        match self.try_post_by_slug(slug) {
            Ok(post) => Some(post),
            Err(CalcError::PostNotFound { .. }) => None,
            Err(e) => {
                tracing::warn!(slug, error = %e, "blog post unreadable");
                None
            }
        }
    }

    /// One page of posts. Out-of-range pages are clamped to the first/last page.
    pub fn paginated_posts(&self, page: i64) -> PaginatedPosts {
        paginate(self.all_posts(), page)
    }

    /// Slugs of every post file, whether or not it parses.
    pub fn all_slugs(&self) -> Vec<String> {
        match self.post_files() {
            Ok(files) => files.into_iter().map(|(slug, _)| slug).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "blog slugs unavailable");
                Vec::new()
            }
        }
    }
}

/// Slice an already sorted post list into pages of [`POSTS_PER_PAGE`].
pub fn paginate(posts: Vec<BlogPost>, page: i64) -> PaginatedPosts {
    let total_pages = posts.len().div_ceil(POSTS_PER_PAGE).max(1);
    let current_page = page.clamp(1, total_pages as i64) as usize;
    let start = (current_page - 1) * POSTS_PER_PAGE;

    PaginatedPosts {
        posts: posts.into_iter().skip(start).take(POSTS_PER_PAGE).collect(),
        total_pages,
        current_page,
    }
}
