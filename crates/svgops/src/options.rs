// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

/// Rendering options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Directory that will be used during relative `use` and `tref` hrefs resolving.
    ///
    /// When `None`, relative paths are resolved against the current directory.
    ///
    /// Default: `None`
    pub resources_dir: Option<PathBuf>,

    /// Font family used when no `font-family` is present.
    ///
    /// Default: Sans
    pub font_family: String,

    /// Font size used when no `font-size` is present.
    ///
    /// Can have a unit.
    ///
    /// Default: 12pt
    pub font_size: String,

    /// Image size used when the root element has neither a size nor a `viewBox`.
    ///
    /// Default: 100x100
    pub default_size: (f64, f64),

    /// The maximum element nesting depth.
    ///
    /// Default: 256
    pub max_depth: u32,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            resources_dir: None,
            font_family: "Sans".to_string(),
            font_size: "12pt".to_string(),
            default_size: (100.0, 100.0),
            max_depth: 256,
        }
    }
}

impl Options {
    /// Converts a relative path into absolute relative to the resources directory.
    pub fn get_abs_path(&self, rel_path: &std::path::Path) -> std::path::PathBuf {
        match self.resources_dir {
            Some(ref dir) => dir.join(rel_path),
            None => rel_path.into(),
        }
    }
}
