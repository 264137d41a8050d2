use crate::{UrlError, UrlResult};
use std::borrow::Cow;
use std::fmt;
use url::Url;

/// A URL with its fragment removed
///
/// This is the dedup key of the crawl: two URLs that differ only by their
/// `#...` suffix normalize to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    /// Parses an absolute URL (typically the seed) and drops its fragment
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_glean::url::NormalizedUrl;
    ///
    /// let url = NormalizedUrl::parse("https://x.test/a#top").unwrap();
    /// assert_eq!(url.as_str(), "https://x.test/a");
    /// ```
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
        Ok(Self::from_url(url))
    }

    /// Wraps an already parsed URL, dropping its fragment
    pub fn from_url(mut url: Url) -> Self {
        url.set_fragment(None);
        Self(url)
    }

    /// The serialization with percent-escapes decoded
    ///
    /// `Url` escapes non-ASCII path characters, while match patterns are
    /// usually written with the literal characters. Falls back to the
    /// escaped form when the escapes do not decode to UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_glean::url::NormalizedUrl;
    ///
    /// let url = NormalizedUrl::parse("https://x.test/文档/b").unwrap();
    /// assert_eq!(url.as_str(), "https://x.test/%E6%96%87%E6%A1%A3/b");
    /// assert_eq!(url.decoded(), "https://x.test/文档/b");
    /// ```
    pub fn decoded(&self) -> Cow<'_, str> {
        urlencoding::decode(self.0.as_str()).unwrap_or(Cow::Borrowed(self.0.as_str()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Resolves `raw` against `base` and removes the fragment
///
/// Resolution follows the standard URL-joining rules, so relative paths,
/// `../` segments, protocol-relative `//host/...` references and absolute
/// URLs all work. Everything from the first `#` onward is dropped.
///
/// # Arguments
///
/// * `raw` - The href exactly as found in the page
/// * `base` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Ok(NormalizedUrl)` - Absolute URL without fragment
/// * `Err(UrlError)` - The href cannot be resolved; callers drop it
///
/// # Examples
///
/// ```
/// use sumi_glean::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://x.test/a").unwrap();
/// let url = normalize("/b#frag", &base).unwrap();
/// assert_eq!(url.as_str(), "https://x.test/b");
/// ```
pub fn normalize(raw: &str, base: &Url) -> UrlResult<NormalizedUrl> {
    let joined = base.join(raw.trim()).map_err(|_| UrlError::Unresolvable {
        href: raw.to_string(),
        base: base.to_string(),
    })?;
    Ok(NormalizedUrl::from_url(joined))
}
