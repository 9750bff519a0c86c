mod status;

pub use status::QuestionStatus;

/// Display name used for questions submitted without an author.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Resolve the author shown for a question, falling back to `anonymous` when
/// none was given or it is blank.
pub fn author_or<'a>(author: Option<&'a str>, anonymous: &'a str) -> &'a str {
    author
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .unwrap_or(anonymous)
}
