use crate::crawler::HtmlView;

/// Maximum length of the goal statement, in characters
pub const MAX_GOAL_CHARS: usize = 500;

/// Derives a short statement of the site's purpose from the homepage
///
/// Uses `<meta name="description">` when present, otherwise the page title
/// followed by the first paragraph. The result is cut to
/// [`MAX_GOAL_CHARS`] characters and may be empty.
///
/// # Example
///
/// ```
/// use checklink::crawler::HtmlView;
/// use checklink::site::extract_goal;
///
/// let view = HtmlView::parse_str("<title>Embassy</title><p>Consular services</p>");
/// assert_eq!(extract_goal(&view), "Embassy Consular services");
/// ```
pub fn extract_goal(view: &HtmlView) -> String {
    let goal = match view.meta_description() {
        Some(description) => description,
        None => [view.title(), view.first_paragraph()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    };

    truncate_chars(goal.trim(), MAX_GOAL_CHARS)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
