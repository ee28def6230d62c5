//! Terminal rendition of the analysis page.

use std::{io::Write, path::Path};

use anyhow::{anyhow, Context};
use client_core::{InputSurface, NoticeSink, OutputSurface};
use shared::domain::{ArtifactLink, SelectedFile};
use tracing::{debug, warn};
use url::Url;

use crate::config::Settings;

pub async fn load_selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("'{}' does not name a file", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(SelectedFile::new(name, bytes))
}

/// Form filled from settings and the command line.
pub struct TerminalForm {
    settings: Settings,
    file: Option<SelectedFile>,
}

impl TerminalForm {
    pub fn new(settings: Settings, file: Option<SelectedFile>) -> Self {
        Self { settings, file }
    }
}

impl InputSurface for TerminalForm {
    fn selected_file(&self) -> Option<SelectedFile> {
        self.file.clone()
    }

    fn microns_per_pixel(&self) -> String {
        self.settings.microns_per_pixel.clone()
    }

    fn fps(&self) -> String {
        self.settings.fps.clone()
    }

    fn drop_volume_ul(&self) -> String {
        self.settings.drop_volume_ul.clone()
    }

    fn confidence_threshold(&self) -> String {
        self.settings.confidence_threshold.clone()
    }

    fn weights(&self) -> Option<String> {
        self.settings.weights.clone()
    }

    fn max_frames(&self) -> Option<String> {
        self.settings.max_frames.clone()
    }
}

/// Resolves a server-relative artifact path the way a browser would against the page origin.
pub fn resolve_artifact_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Prints result-area changes as lines. Clearing is a no-op; stale lines stay in scrollback.
pub struct TerminalOutput<W: Write> {
    out: W,
    base_url: Url,
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(out: W, base_url: Url) -> Self {
        Self { out, base_url }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!(error = %err, "failed to write result output");
        }
    }
}

impl<W: Write> OutputSurface for TerminalOutput<W> {
    fn set_submit_enabled(&mut self, enabled: bool) {
        debug!(enabled, "submit control");
    }

    fn set_progress_visible(&mut self, visible: bool) {
        if visible {
            self.emit("Analisando...");
        }
    }

    fn set_results_visible(&mut self, visible: bool) {
        if visible {
            self.emit("Resultados");
        }
    }

    fn set_summary(&mut self, text: &str) {
        self.emit(text);
    }

    fn clear_summary(&mut self) {}

    fn set_video_source(&mut self, url: Option<&str>) {
        if let Some(url) = url {
            let resolved = resolve_artifact_url(&self.base_url, url);
            self.emit(&format!("Vídeo processado: {resolved}"));
        }
    }

    fn clear_links(&mut self) {}

    fn push_link(&mut self, link: &ArtifactLink) {
        let resolved = resolve_artifact_url(&self.base_url, &link.href);
        self.emit(&format!("{}: {resolved}", link.label()));
    }
}

pub struct TerminalNotices<W: Write> {
    out: W,
}

impl<W: Write> TerminalNotices<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NoticeSink for TerminalNotices<W> {
    fn notify(&mut self, message: &str) {
        if let Err(err) = writeln!(self.out, "{message}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write notice");
        }
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
