//! Deterministic search-URL fallback
//!
//! The last resort of the resolution chain: no network call, just the
//! platform's search page with "title artist" URL-encoded into the path.
//! Because this step cannot fail, the resolver as a whole never does.

use url::Url;

/// Builds platform search URLs for tracks
#[derive(Debug, Clone)]
pub struct SearchFallback {
    base: Url,
}

impl SearchFallback {
    /// Creates a fallback around the platform's base URL
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Returns the search URL for a title/artist pair
    ///
    /// The query is "title artist" joined by a single space, URL-encoded as
    /// one path segment.
    ///
    /// # Example
    ///
    /// ```
    /// use chartlink::resolver::SearchFallback;
    /// use url::Url;
    ///
    /// let fallback = SearchFallback::new(Url::parse("https://open.spotify.com").unwrap());
    /// let link = fallback.link("Bad Habit", "Steve Lacy");
    /// assert_eq!(
    ///     link.as_str(),
    ///     "https://open.spotify.com/search/Bad%20Habit%20Steve%20Lacy"
    /// );
    /// ```
    pub fn link(&self, title: &str, artist: &str) -> Url {
        let query = format!("{} {}", title, artist);
        let encoded = urlencoding::encode(query.trim());

        let mut url = self.base.clone();
        url.set_path(&format!("search/{}", encoded));
        url
    }
}
