//! CLI logic for the Assay diagram tool.
//!
//! Loads an assurance-case document, applies the requested visibility
//! operations and writes the rendered graph as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::{debug, info};

use assay::{
    AssayError, DiagramBuilder,
    identifier::Id,
    session::DiagramSession,
    visibility::{FileStore, MemoryStore, SnapshotStore},
};

/// Run the Assay CLI application
///
/// This function converts the input document into a graph, applies the
/// visibility operations named in `args` and writes the rendered graph.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `AssayError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document parsing errors
/// - Operations naming unknown nodes
pub fn run(args: &Args) -> Result<(), AssayError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let json = match &args.state_dir {
        Some(dir) => {
            if app_config.visibility().snapshot_key().is_none() {
                let key = snapshot_key(&args.input);
                debug!(key = key.as_str(); "Using input file name as snapshot key");
                app_config.visibility_mut().set_snapshot_key(Some(key));
            }
            let builder = DiagramBuilder::new(app_config);
            let document = builder.parse(&source)?;
            let session = builder.session(&document, FileStore::new(dir));
            render_json(session, args)?
        }
        None => {
            let builder = DiagramBuilder::new(app_config);
            let document = builder.parse(&source)?;
            let session = builder.session(&document, MemoryStore::new());
            render_json(session, args)?
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file = path.as_str(); "Graph exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Applies the operations in `args` and serializes the rendered graph.
fn render_json<S: SnapshotStore>(
    mut session: DiagramSession<S>,
    args: &Args,
) -> Result<String, AssayError> {
    if args.expand_all {
        session.expand_all();
    }
    if args.collapse_all {
        session.collapse_all();
    }
    if !args.focus.is_empty() {
        let focus = ids(&args.focus);
        session.focus(&focus);
    }
    for id in ids(&args.reveal) {
        session.reveal_path(id)?;
    }
    for id in ids(&args.reveal_subtree) {
        session.reveal_subtree(id)?;
    }

    let rendered = session.render();
    debug!(
        nodes = rendered.nodes().len(),
        visible = rendered.visible_ids().len();
        "Rendered graph"
    );

    serde_json::to_string_pretty(&rendered).map_err(|err| AssayError::Io(io::Error::from(err)))
}

fn ids(names: &[String]) -> Vec<Id> {
    names.iter().map(|name| Id::new(name)).collect()
}

/// Derives a snapshot key from the input path's file stem.
fn snapshot_key(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_string())
}
