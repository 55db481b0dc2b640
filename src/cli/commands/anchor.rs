//! `tsort anchor` command - render one column-header link

use miette::Result;

use crate::cli::{load_config, GlobalOpts};
use crate::core::SortRequest;
use crate::sorting::SortAnchor;

#[derive(clap::Args, Debug)]
pub struct AnchorArgs {
    /// Field the column sorts by
    pub field: String,

    /// Column title (defaults to the capitalized field name)
    pub title: Option<String>,

    /// Default direction when the column is not active (asc/desc)
    pub dir: Option<String>,

    /// Request target the link is rendered for
    #[arg(long, short = 'u', default_value = "/")]
    pub uri: String,
}

pub fn run(args: AnchorArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;

    let directive_args: Vec<String> = std::iter::once(args.field)
        .chain(args.title)
        .chain(args.dir)
        .collect();
    let anchor = SortAnchor::from_directive_args(&directive_args)?;

    let request = SortRequest::from_uri(&args.uri);
    println!("{}", anchor.render(&request, &config)?);
    Ok(())
}
