use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Where an asset's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Local file. On wasm this is resolved relative to the page URL.
    Path(PathBuf),
    /// `http://` or `https://` resource.
    Url(String),
}

impl AssetSource {
    /// Picks a source kind from the string form: URLs are recognised by
    /// scheme, everything else is a path.
    pub fn parse(source: &str) -> Result<Self> {
        if is_url(source) {
            #[cfg(feature = "http")]
            {
                let url = url::Url::parse(source)?;
                Ok(Self::Url(url.to_string()))
            }
            #[cfg(not(feature = "http"))]
            {
                Err(crate::errors::ViewerError::FeatureNotEnabled(
                    "HTTP feature is not enabled. Enable it with `features = [\"http\"]`".to_string(),
                ))
            }
        } else {
            Ok(Self::Path(PathBuf::from(source)))
        }
    }

    /// Joins `file` onto a root directory or URL prefix.
    pub fn join(root: &str, file: &str) -> Result<Self> {
        if root.is_empty() {
            return Self::parse(file);
        }
        if is_url(root) {
            let sep = if root.ends_with('/') { "" } else { "/" };
            Self::parse(&format!("{root}{sep}{file}"))
        } else {
            Ok(Self::Path(Path::new(root).join(file)))
        }
    }

    /// Final path segment, used in log lines.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Path(p) => p.file_name().and_then(|s| s.to_str()).unwrap_or_default(),
            Self::Url(u) => u.rsplit('/').next().unwrap_or(u),
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_builds_paths_under_a_directory_root() {
        let source = AssetSource::join("asset/", "JamTanganReal.glb").unwrap();
        assert_eq!(source, AssetSource::Path(PathBuf::from("asset/JamTanganReal.glb")));
        assert_eq!(source.filename(), "JamTanganReal.glb");
    }

    #[cfg(feature = "http")]
    #[test]
    fn join_appends_to_url_roots() {
        let source = AssetSource::join("https://example.com/asset", "watch.glb").unwrap();
        assert_eq!(source, AssetSource::Url("https://example.com/asset/watch.glb".to_string()));
        assert_eq!(source.filename(), "watch.glb");
    }
}
