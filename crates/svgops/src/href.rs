// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use svgops_tree::Document;

use crate::{Error, Options};

/// A resolved `href` target.
pub(crate) enum Href<'a> {
    /// An element of the current document.
    Local(&'a str),
    /// An element of another document.
    ///
    /// When there is no fragment, the document's root element is the target.
    External {
        document: Document,
        id: Option<String>,
    },
}

/// Resolves an `href` value.
///
/// Supported forms are `#id`, `file.svg`, `file.svg#id` and `data:` URLs.
/// Relative paths are resolved against `Options::resources_dir`.
pub(crate) fn resolve<'a>(href: &'a str, opt: &Options) -> Result<Href<'a>, Error> {
    let href = href.trim();

    if let Some(id) = href.strip_prefix('#') {
        return Ok(Href::Local(id));
    }

    if href.starts_with("data:") {
        return load_data_url(href);
    }

    let (path, id) = match href.split_once('#') {
        Some((path, id)) => (path, Some(id)),
        None => (href, None),
    };

    let path = opt.get_abs_path(Path::new(path));
    log::debug!("Loading '{}'.", path.display());
    let data = std::fs::read(&path)?;
    let document = crate::load_document(&data)?;

    Ok(Href::External {
        document,
        id: id.filter(|id| !id.is_empty()).map(str::to_string),
    })
}

fn load_data_url<'a>(href: &str) -> Result<Href<'a>, Error> {
    let url = data_url::DataUrl::process(href)
        .map_err(|_| Error::HrefResolvingFailed(href.to_string()))?;
    let (data, fragment) = url
        .decode_to_vec()
        .map_err(|_| Error::HrefResolvingFailed(href.to_string()))?;
    let document = crate::load_document(&data)?;

    Ok(Href::External {
        document,
        id: fragment
            .map(|f| f.to_percent_encoded())
            .filter(|id| !id.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local() {
        assert!(matches!(resolve(" #rect1 ", &Options::default()), Ok(Href::Local("rect1"))));
    }

    #[test]
    fn data_url() {
        let href = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='5'/%3E";
        match resolve(href, &Options::default()).unwrap() {
            Href::External { document, id } => {
                assert_eq!(document.root_element().tag_name_str(), "svg");
                assert_eq!(id, None);
            }
            Href::Local(_) => panic!("expected an external document"),
        }
    }

    #[test]
    fn data_url_with_fragment() {
        let href = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg'%3E\
                    %3Crect id='r'/%3E%3C/svg%3E#r";
        match resolve(href, &Options::default()).unwrap() {
            Href::External { id, .. } => assert_eq!(id.as_deref(), Some("r")),
            Href::Local(_) => panic!("expected an external document"),
        }
    }

    #[test]
    fn missing_file() {
        let opt = Options {
            resources_dir: Some("/nonexistent-svgops-dir".into()),
            ..Options::default()
        };
        assert!(matches!(resolve("image.svg#id", &opt), Err(Error::Io(_))));
    }
}
