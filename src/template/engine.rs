//! Tera wrapper that understands sorting directives

use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};

use crate::core::{Result, SortRequest, SortingConfig, SortingError};
use crate::sorting::{CollectionSorter, SortableCollection};
use crate::template::directive::{extract_named, Directives, ANCHORS_VAR};

/// Templates with `{% anchor %}` and `{% autosort %}` support
pub struct SortingTemplates {
    tera: Tera,
    directives: HashMap<String, Directives>,
    sorter: CollectionSorter,
}

impl std::fmt::Debug for SortingTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortingTemplates")
            .field("templates", &self.directives.keys().collect::<Vec<_>>())
            .field("config", self.sorter.config())
            .finish()
    }
}

impl SortingTemplates {
    pub fn new(config: SortingConfig) -> Self {
        Self {
            tera: Tera::default(),
            directives: HashMap::new(),
            sorter: CollectionSorter::new(config),
        }
    }

    pub fn config(&self) -> &SortingConfig {
        self.sorter.config()
    }

    /// Compile a template from source
    pub fn add_raw_template(&mut self, name: &str, source: &str) -> Result<()> {
        let (text, directives) = extract_named(name, source)?;
        self.tera.add_raw_template(name, &text)?;
        self.directives.insert(name.to_string(), directives);
        Ok(())
    }

    /// Compile a template file, named after its file name
    pub fn add_template_file(&mut self, path: &Path) -> Result<String> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| SortingError::Config(format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.add_raw_template(&name, &source)?;
        Ok(name)
    }

    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }

    /// Render `name` for `request`
    ///
    /// Every autosort binding in `context` is reordered in place before the
    /// template runs.
    pub fn render(&self, name: &str, context: &mut Context, request: &SortRequest) -> Result<String> {
        self.render_with(name, context, request, &[])
    }

    /// Render `name`, sourcing autosort bindings from `collections` first and
    /// from `context` otherwise
    pub fn render_with(
        &self,
        name: &str,
        context: &mut Context,
        request: &SortRequest,
        collections: &[(&str, &dyn SortableCollection)],
    ) -> Result<String> {
        let directives = self
            .directives
            .get(name)
            .ok_or_else(|| SortingError::Template(tera::Error::template_not_found(name)))?;

        let field = request.field();
        for autosort in &directives.autosorts {
            let binding = autosort.binding();
            match collections.iter().find(|(key, _)| *key == binding) {
                Some((_, collection)) => {
                    self.sorter
                        .sort_binding_with(context, binding, *collection, &field)?
                }
                None => self.sorter.sort_binding(context, binding, &field)?,
            }
        }

        let anchors = directives
            .anchors
            .iter()
            .map(|anchor| anchor.render(request, self.config()))
            .collect::<Result<Vec<_>>>()?;
        context.insert(ANCHORS_VAR, &anchors);

        Ok(self.tera.render(name, context)?)
    }
}

impl Default for SortingTemplates {
    fn default() -> Self {
        Self::new(SortingConfig::default())
    }
}
