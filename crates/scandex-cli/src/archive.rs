// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The archive a command works on: configuration, catalog, and text source,
// loaded once per invocation.

use std::path::{Path, PathBuf};

use scandex_catalog::Catalog;
use scandex_core::ScandexConfig;
use scandex_core::error::Result;
use scandex_document::TextSource;
use tracing::info;

pub struct Archive {
    pub config: ScandexConfig,
    pub catalog: Catalog,
    pub text: TextSource,
}

impl Archive {
    pub fn open(root: &Path) -> Result<Self> {
        let config = ScandexConfig::load(root)?;
        let catalog = Catalog::build(root)?;
        let text = TextSource::from_config(&config);
        info!(root = %root.display(), scans = catalog.len(), "Archive opened");
        Ok(Self {
            config,
            catalog,
            text,
        })
    }

    pub fn root(&self) -> &Path {
        self.catalog.root()
    }

    /// Directory of the default category, where new scans land.
    pub fn default_category_dir(&self) -> PathBuf {
        self.root().join(&self.config.default_category)
    }

    /// `path` as shown to the user: relative to the root.
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        self.catalog.relative(path)
    }
}
