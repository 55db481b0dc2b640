//! `tsort render` command - render a sortable table template

use miette::{IntoDiagnostic, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tera::Context;
use tracing::debug;

use crate::cli::{load_config, GlobalOpts};
use crate::core::SortRequest;
use crate::sorting::{SortableCollection, SqliteCollection};
use crate::template::SortingTemplates;

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Template file to render
    #[arg(long, short = 't')]
    pub template: PathBuf,

    /// Request target, e.g. "/people/?sort=name&dir=desc"
    #[arg(long, short = 'u', default_value = "/")]
    pub uri: String,

    /// YAML file whose top-level mapping becomes the template context
    #[arg(long, short = 'd')]
    pub data: Option<PathBuf>,

    /// SQLite database to read rows from
    #[arg(long, requires = "table")]
    pub db: Option<PathBuf>,

    /// Table whose rows are bound into the context
    #[arg(long, requires = "db")]
    pub table: Option<String>,

    /// Context variable the table rows are bound to
    #[arg(long, default_value = "rows")]
    pub bind: String,
}

pub fn run(args: RenderArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let mut templates = SortingTemplates::new(config);
    let name = templates.add_template_file(&args.template)?;

    let mut context = match &args.data {
        Some(path) => load_context(path)?,
        None => Context::new(),
    };
    let request = SortRequest::from_uri(&args.uri);
    debug!(template = %name, field = %request.field(), "rendering");

    let html = match (&args.db, &args.table) {
        (Some(db), Some(table)) => {
            let conn = Connection::open_with_flags(db, OpenFlags::SQLITE_OPEN_READ_ONLY)
                .into_diagnostic()?;
            let rows = SqliteCollection::new(&conn, table)?;
            let collections: [(&str, &dyn SortableCollection); 1] = [(args.bind.as_str(), &rows)];
            // Rows are bound even when the template does not autosort them
            context.insert(args.bind.as_str(), &rows.records()?);
            templates.render_with(&name, &mut context, &request, &collections)?
        }
        _ => templates.render(&name, &mut context, &request)?,
    };

    print!("{}", html);
    Ok(())
}

fn load_context(path: &Path) -> Result<Context> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    let value: serde_json::Value = serde_yml::from_str(&content).into_diagnostic()?;
    if !value.is_object() {
        return Err(miette::miette!(
            "{}: context data must be a mapping at the top level",
            path.display()
        ));
    }
    Context::from_value(value).into_diagnostic()
}
